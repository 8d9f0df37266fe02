use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::domain::IssueKey;

/// Per-issue-key suppression ledger with a sliding window.
///
/// Entries older than the window are purged on every check, so the ledger
/// only ever holds keys mentioned within the last window.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    recent: HashMap<IssueKey, u64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` is on cooldown (caller must suppress). When it
    /// is not, the key's timestamp is recorded in the same call, so two
    /// near-simultaneous mentions cannot both pass.
    pub fn check_and_mark(&mut self, key: &IssueKey, window_seconds: u64) -> bool {
        self.check_and_mark_at(key, unix_now(), window_seconds)
    }

    pub fn check_and_mark_at(&mut self, key: &IssueKey, now: u64, window_seconds: u64) -> bool {
        self.recent
            .retain(|_, &mut stamp| now.saturating_sub(stamp) < window_seconds);

        if self.recent.contains_key(key) {
            return true;
        }

        self.recent.insert(key.clone(), now);
        false
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.recent.len()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> IssueKey {
        IssueKey(s.to_string())
    }

    #[test]
    fn second_mention_inside_window_is_suppressed() {
        let mut cd = CooldownTracker::new();
        assert!(!cd.check_and_mark_at(&key("FOO-1"), 100, 60));
        assert!(cd.check_and_mark_at(&key("FOO-1"), 130, 60));
    }

    #[test]
    fn mention_after_window_elapses_proceeds() {
        let mut cd = CooldownTracker::new();
        assert!(!cd.check_and_mark_at(&key("FOO-1"), 100, 60));
        assert!(!cd.check_and_mark_at(&key("FOO-1"), 161, 60));
    }

    #[test]
    fn keys_cool_down_independently() {
        let mut cd = CooldownTracker::new();
        assert!(!cd.check_and_mark_at(&key("FOO-1"), 100, 60));
        assert!(!cd.check_and_mark_at(&key("BAR-2"), 101, 60));
        assert!(cd.check_and_mark_at(&key("BAR-2"), 102, 60));
    }

    #[test]
    fn expired_entries_are_purged_on_check() {
        let mut cd = CooldownTracker::new();
        cd.check_and_mark_at(&key("FOO-1"), 100, 60);
        cd.check_and_mark_at(&key("BAR-2"), 110, 60);
        // FOO-1 expired by now, BAR-2 still live.
        cd.check_and_mark_at(&key("BAZ-3"), 165, 60);
        assert_eq!(cd.len(), 2);
    }
}
