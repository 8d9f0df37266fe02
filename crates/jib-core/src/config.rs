use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bot.
///
/// Loaded once at startup from the environment (with `.env` support); the
/// pipeline takes a `&Config` per operation and never caches a snapshot
/// beyond a single call, so a host that swaps snapshots between messages
/// is honored.
#[derive(Clone, Debug)]
pub struct Config {
    // Transport
    pub telegram_bot_token: String,

    // Tracker
    pub jira_url: String,
    pub rest_api_suffix: String,
    pub http_timeout: Duration,

    // Behavior
    pub ignored_users: Vec<String>,
    pub issue_cooldown: u64,
    pub max_issues_per_message: usize,
    pub include_url: bool,
    pub respond_to_urls: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        // Required env vars
        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let jira_url = env_str("JIRA_URL").and_then(non_empty).ok_or_else(|| {
            Error::Config("JIRA_URL environment variable is required".to_string())
        })?;

        let rest_api_suffix =
            env_str("JIRA_REST_API_SUFFIX").unwrap_or_else(|| "rest/api/2".to_string());

        let http_timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECS").unwrap_or(10));

        let ignored_users = parse_csv(env_str("IGNORED_USERS"));
        let issue_cooldown = env_u64("ISSUE_COOLDOWN").unwrap_or(300);
        let max_issues_per_message = env_usize("MAX_ISSUES_PER_MESSAGE").unwrap_or(5);
        let include_url = env_bool("INCLUDE_URL").unwrap_or(true);
        let respond_to_urls = env_bool("RESPOND_TO_URLS").unwrap_or(false);

        Ok(Self {
            telegram_bot_token,
            jira_url,
            rest_api_suffix,
            http_timeout,
            ignored_users,
            issue_cooldown,
            max_issues_per_message,
            include_url,
            respond_to_urls,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parsing_trims_and_drops_empties() {
        let got = parse_csv(Some(" alice, bob ,, carol".to_string()));
        assert_eq!(got, vec!["alice", "bob", "carol"]);
        assert!(parse_csv(None).is_empty());
    }

    #[test]
    fn bool_parsing_accepts_common_truthy_forms() {
        env::set_var("JIB_TEST_BOOL", "Yes");
        assert_eq!(env_bool("JIB_TEST_BOOL"), Some(true));
        env::set_var("JIB_TEST_BOOL", "0");
        assert_eq!(env_bool("JIB_TEST_BOOL"), Some(false));
        env::remove_var("JIB_TEST_BOOL");
        assert_eq!(env_bool("JIB_TEST_BOOL"), None);
    }
}
