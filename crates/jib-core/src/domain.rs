use std::fmt;

/// A Jira-style issue key, e.g. `PROJECT-123`.
///
/// Only ever constructed from text that already matched the extractor's
/// `[A-Z]+-[0-9]+` pattern; equality is exact string match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IssueKey(pub String);

impl IssueKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The project portion of the key (everything before the first hyphen).
    pub fn project_prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved display data for one issue. Built per lookup, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueSummary {
    pub key: IssueKey,
    pub title: String,
}

/// A plain-text message as the transport hands it to the pipeline.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    /// Sender identity as the platform reports it (`@user:server`, a bare
    /// username, ...).
    pub sender: String,
    pub body: String,
}

/// Extract the local part of a sender identity for ignore-list matching:
/// strip a leading `@` and anything from the first `:` on. Handles
/// Matrix-style ids and bare usernames alike.
pub fn sender_localpart(sender: &str) -> &str {
    let s = sender.split(':').next().unwrap_or(sender);
    s.strip_prefix('@').unwrap_or(s)
}
