//! Short-lived cache of username availability results.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::username::{UsernameStatus, normalize};

/// Default lifetime of a cached check result.
pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(900);

/// Remembers the last availability status seen for each username.
///
/// Keys are normalized, so `@Name` and `name` share an entry.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<String, (UsernameStatus, Instant)>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_TTL)
    }
}

impl ResultCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached status if it is still fresh.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<UsernameStatus> {
        self.get_at(username, Instant::now())
    }

    /// Same as [`ResultCache::get`] evaluated at `now`.
    #[must_use]
    pub fn get_at(&self, username: &str, now: Instant) -> Option<UsernameStatus> {
        self.entries
            .get(&normalize(username))
            .filter(|(_, checked_at)| now.saturating_duration_since(*checked_at) < self.ttl)
            .map(|(status, _)| *status)
    }

    /// Stores a check result, replacing any previous one.
    pub fn insert(&mut self, username: &str, status: UsernameStatus) {
        self.insert_at(username, status, Instant::now());
    }

    pub fn insert_at(&mut self, username: &str, status: UsernameStatus, at: Instant) {
        let key = normalize(username);
        debug!("Caching status {} for @{}", status, key);
        self.entries.insert(key, (status, at));
    }

    /// Drops results older than the TTL; returns how many were removed.
    pub fn purge(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, (_, checked_at)| now.saturating_duration_since(*checked_at) < ttl);

        let removed = before - self.entries.len();
        if removed > 0 {
            info!("Purged {} cached check results", removed);
        }
        removed
    }

    pub fn purge_expired(&mut self) -> usize {
        self.purge(Instant::now())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(900);

    #[test]
    fn test_insert_and_get() {
        let mut cache = ResultCache::default();
        cache.insert("freename", UsernameStatus::Available);

        assert_eq!(cache.get("freename"), Some(UsernameStatus::Available));
        assert_eq!(cache.get("@FreeName"), Some(UsernameStatus::Available));
        assert_eq!(cache.get("othername"), None);
    }

    #[test]
    fn test_newer_result_replaces_older() {
        let mut cache = ResultCache::new(TTL);
        let start = Instant::now();
        cache.insert_at("takenname", UsernameStatus::Available, start);
        cache.insert_at("takenname", UsernameStatus::User, start + Duration::from_secs(600));

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get_at("takenname", start + Duration::from_secs(1200)),
            Some(UsernameStatus::User)
        );
    }

    #[test]
    fn test_expired_results_are_not_returned() {
        let mut cache = ResultCache::new(TTL);
        let start = Instant::now();
        cache.insert_at("freename", UsernameStatus::Available, start);

        assert!(cache.get_at("freename", start + TTL - Duration::from_secs(1)).is_some());
        assert!(cache.get_at("freename", start + TTL).is_none());
    }

    #[test]
    fn test_purge_keeps_fresh_results() {
        let mut cache = ResultCache::new(TTL);
        let start = Instant::now();
        cache.insert_at("oldname", UsernameStatus::Channel, start);
        cache.insert_at("newname", UsernameStatus::Bot, start + Duration::from_secs(800));

        assert_eq!(cache.purge(start + Duration::from_secs(1000)), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get_at("newname", start + Duration::from_secs(1000)),
            Some(UsernameStatus::Bot)
        );

        assert_eq!(cache.purge(start + Duration::from_secs(5000)), 1);
        assert!(cache.is_empty());
    }
}
