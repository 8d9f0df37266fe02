use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::domain::IssueKey;

static ISSUE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]+-[0-9]+)\b").expect("issue key regex"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*").expect("url regex"));

/// Scan a message body for issue-key candidates.
///
/// Whole-word `[A-Z]+-[0-9]+` matches, optionally filtered for URL context,
/// deduplicated keeping the first occurrence, capped at `max_issues`.
pub fn extract_issue_keys(body: &str, respond_to_urls: bool, max_issues: usize) -> Vec<IssueKey> {
    let mut candidates: Vec<&str> = ISSUE_KEY_RE.find_iter(body).map(|m| m.as_str()).collect();

    if !respond_to_urls && URL_RE.is_match(body) {
        candidates.retain(|key| !in_url_context(body, key));
    }

    let mut seen = HashSet::new();
    let mut out: Vec<IssueKey> = Vec::new();
    for key in candidates {
        if seen.insert(key) {
            out.push(IssueKey(key.to_string()));
        }
    }
    out.truncate(max_issues);
    out
}

/// Textual, best-effort URL test: an `http(s)://` run of non-whitespace
/// ending in the key means the key sits inside a URL. This can both under-
/// and over-match (e.g. a key merely adjacent to a URL); kept approximate
/// rather than parsing URLs, as a known limitation.
fn in_url_context(body: &str, key: &str) -> bool {
    let pattern = format!(r"https?://\S*{}\b", regex::escape(key));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(body),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(body: &str, respond_to_urls: bool, max: usize) -> Vec<String> {
        extract_issue_keys(body, respond_to_urls, max)
            .into_iter()
            .map(|k| k.0)
            .collect()
    }

    #[test]
    fn finds_keys_in_first_occurrence_order() {
        assert_eq!(
            keys("fixing BAR-7 after JIRA-42, see BAR-7", true, 10),
            vec!["BAR-7", "JIRA-42"]
        );
    }

    #[test]
    fn ignores_key_like_substrings_of_longer_tokens() {
        assert!(keys("xFOO-1 and FOO-12x and foo-3", true, 10).is_empty());
    }

    #[test]
    fn caps_at_max_issues() {
        assert_eq!(keys("A-1 B-2 C-3 D-4", true, 2), vec!["A-1", "B-2"]);
        assert!(keys("A-1 B-2", true, 0).is_empty());
    }

    #[test]
    fn drops_keys_inside_urls_when_not_responding_to_urls() {
        let body = "see https://x/FOO-1 and BAR-2";
        assert_eq!(keys(body, false, 10), vec!["BAR-2"]);
        // Same text with the flag on keeps both.
        assert_eq!(keys(body, true, 10), vec!["FOO-1", "BAR-2"]);
    }

    #[test]
    fn drops_every_url_embedded_candidate() {
        let body = "https://j/browse/AAA-1 https://j/browse/BBB-2 CCC-3";
        assert_eq!(keys(body, false, 10), vec!["CCC-3"]);
    }

    #[test]
    fn url_filter_is_textual_and_approximate() {
        // The key follows a URL in the same whitespace run, so the filter
        // over-matches and drops it. Documented best-effort behavior.
        let body = "https://example.org/x,FOO-9";
        assert!(keys(body, false, 10).is_empty());
    }

    #[test]
    fn no_urls_means_no_filtering_work() {
        assert_eq!(keys("plain FOO-1 mention", false, 10), vec!["FOO-1"]);
    }
}
