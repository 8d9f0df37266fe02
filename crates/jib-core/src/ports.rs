use async_trait::async_trait;

use crate::{
    config::Config,
    domain::{IssueKey, IssueSummary},
    Result,
};

/// Hexagonal port for the remote issue tracker.
///
/// Jira REST is the first implementation; the shape is tracker-agnostic so
/// other HTTP/JSON trackers can fit behind the same interface.
///
/// Both calls take the current config snapshot so the endpoint follows
/// whatever configuration is live at the time of the call. Neither call
/// retries: a failure is terminal for that call and the caller decides
/// whether to skip or surface it.
#[async_trait]
pub trait TrackerPort: Send + Sync {
    /// Look up a single issue. `Ok(None)` means the tracker answered with a
    /// non-success status (unknown issue, permission wall, ...); `Err`
    /// means the call itself failed (transport or malformed body).
    async fn fetch_issue(&self, cfg: &Config, key: &IssueKey) -> Result<Option<IssueSummary>>;

    /// Fetch the full list of project keys.
    async fn fetch_projects(&self, cfg: &Config) -> Result<Vec<String>>;
}
