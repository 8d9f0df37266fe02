use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    cooldown::CooldownTracker,
    domain::{sender_localpart, InboundMessage, IssueSummary},
    extract::extract_issue_keys,
    ports::TrackerPort,
    projects::ProjectDirectory,
    util::join_url,
    Result,
};

/// Orchestrates one message's worth of work: sender filtering, key
/// extraction, project/cooldown gates, issue lookups, reply assembly.
///
/// Shared across concurrent handler invocations behind an `Arc`; the
/// cooldown ledger and project directory are the only mutable state and
/// both are guarded so checks stay atomic. No lock is held across an await.
pub struct MessagePipeline {
    tracker: Arc<dyn TrackerPort>,
    directory: ProjectDirectory,
    cooldown: Mutex<CooldownTracker>,
    self_localpart: RwLock<Option<String>>,
}

impl MessagePipeline {
    pub fn new(tracker: Arc<dyn TrackerPort>) -> Self {
        Self {
            tracker,
            directory: ProjectDirectory::new(),
            cooldown: Mutex::new(CooldownTracker::new()),
            self_localpart: RwLock::new(None),
        }
    }

    /// Record the bot's own identity once the transport has resolved it,
    /// so the bot never replies to its own messages.
    pub fn set_self_identity(&self, identity: &str) {
        let local = sender_localpart(identity).to_string();
        *self
            .self_localpart
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(local);
    }

    /// Process one inbound text message. Returns the reply to send into the
    /// same conversation, or `None` when there is nothing to say.
    ///
    /// Never fails: per-issue lookup errors are logged and that issue is
    /// skipped, so one bad issue cannot block the rest of the message and
    /// one bad message cannot affect the next.
    pub async fn handle_message(&self, msg: &InboundMessage, cfg: &Config) -> Option<String> {
        let sender = sender_localpart(&msg.sender);

        if cfg.ignored_users.iter().any(|u| u.trim() == sender) {
            debug!(sender, "skipping message from ignored user");
            return None;
        }
        if self.is_self(sender) {
            return None;
        }

        let candidates =
            extract_issue_keys(&msg.body, cfg.respond_to_urls, cfg.max_issues_per_message);
        if candidates.is_empty() {
            return None;
        }

        let mut lines: Vec<String> = Vec::new();
        for key in &candidates {
            if !self.directory.contains(key.project_prefix()) {
                debug!(%key, "skipping unknown project");
                continue;
            }

            let on_cooldown = self
                .cooldown
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .check_and_mark(key, cfg.issue_cooldown);
            if on_cooldown {
                debug!(%key, "issue on cooldown");
                continue;
            }

            match self.tracker.fetch_issue(cfg, key).await {
                Ok(Some(summary)) => lines.push(format_issue_line(cfg, &summary)),
                Ok(None) => debug!(%key, "issue lookup returned nothing"),
                Err(e) => error!(%key, error = %e, "issue lookup failed"),
            }
        }

        if lines.is_empty() {
            return None;
        }

        // Propagate the offtopic marker convention from the source message.
        let reply = if msg.body.to_lowercase().starts_with("[off]") {
            lines
                .iter()
                .map(|line| format!("[off] {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            lines.join("\n")
        };

        Some(reply)
    }

    /// Re-fetch the full project list and atomically replace the directory.
    /// On any failure the previously cached set is left untouched.
    pub async fn refresh_projects(&self, cfg: &Config) -> Result<usize> {
        let keys = self.tracker.fetch_projects(cfg).await?;
        let count = self.directory.replace(keys);
        info!(count, "updated project directory");
        Ok(count)
    }

    /// Startup behavior: one refresh attempt if the directory is empty.
    /// A failure is non-fatal; until a manual refresh succeeds every
    /// candidate is treated as an unknown project.
    pub async fn load_projects_if_empty(&self, cfg: &Config) {
        if !self.directory.is_empty() {
            return;
        }
        if let Err(e) = self.refresh_projects(cfg).await {
            warn!(error = %e, "startup project refresh failed; continuing with empty directory");
        }
    }

    fn is_self(&self, sender: &str) -> bool {
        self.self_localpart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(sender)
    }
}

fn format_issue_line(cfg: &Config, summary: &IssueSummary) -> String {
    if cfg.include_url {
        let browse = join_url(&cfg.jira_url, &format!("browse/{}", summary.key));
        format!("[{}]({}): {}", summary.key, browse, summary.title)
    } else {
        format!("{}: {}", summary.key, summary.title)
    }
}
