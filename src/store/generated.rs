//! Time-bounded record of generated usernames.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Default retention for generated usernames.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct Entry {
    username: String,
    created_at: Instant,
}

/// Remembers which usernames were generated from which base name.
///
/// Entries older than the TTL are treated as absent and are dropped by
/// [`UsernameStore::cleanup`].
#[derive(Debug)]
pub struct UsernameStore {
    entries: HashMap<String, Vec<Entry>>,
    ttl: Duration,
}

impl Default for UsernameStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl UsernameStore {
    /// Creates an empty store with the given retention.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Returns the retention period.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Records a generated username for a base name.
    pub fn add(&mut self, base_name: &str, generated: &str) {
        self.add_at(base_name, generated, Instant::now());
    }

    /// Records a generated username with an explicit creation time.
    ///
    /// Re-adding an existing username refreshes its timestamp.
    pub fn add_at(&mut self, base_name: &str, generated: &str, at: Instant) {
        let entries = self.entries.entry(base_name.to_owned()).or_default();
        match entries.iter_mut().find(|e| e.username == generated) {
            Some(entry) => entry.created_at = at,
            None => entries.push(Entry {
                username: generated.to_owned(),
                created_at: at,
            }),
        }
        debug!("Stored generated username '{}' for base name '{}'", generated, base_name);
    }

    /// Checks whether `username` was generated from `base_name` and is still live.
    #[must_use]
    pub fn is_generated(&self, base_name: &str, username: &str) -> bool {
        self.is_generated_at(base_name, username, Instant::now())
    }

    /// Same as [`UsernameStore::is_generated`] evaluated at `now`.
    #[must_use]
    pub fn is_generated_at(&self, base_name: &str, username: &str, now: Instant) -> bool {
        self.entries.get(base_name).is_some_and(|entries| {
            entries
                .iter()
                .any(|e| e.username == username && self.is_live(e, now))
        })
    }

    /// Returns the live usernames generated from a base name, oldest first.
    #[must_use]
    pub fn generated_for(&self, base_name: &str) -> Vec<&str> {
        let now = Instant::now();
        self.entries.get(base_name).map_or_else(Vec::new, |entries| {
            entries
                .iter()
                .filter(|e| self.is_live(e, now))
                .map(|e| e.username.as_str())
                .collect()
        })
    }

    /// Removes expired entries; returns how many were removed.
    pub fn cleanup(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let mut removed = 0;

        self.entries.retain(|base_name, entries| {
            let before = entries.len();
            entries.retain(|e| now.saturating_duration_since(e.created_at) < ttl);
            let dropped = before - entries.len();
            removed += dropped;

            if entries.is_empty() {
                debug!("Removed all entries for base name '{}' ({} usernames)", base_name, before);
                false
            } else {
                if dropped > 0 {
                    debug!("Removed {} old usernames for base name '{}'", dropped, base_name);
                }
                true
            }
        });

        if removed > 0 {
            info!("Cleaned up {} old username entries", removed);
        }
        removed
    }

    /// Removes entries that are expired as of now.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup(Instant::now())
    }

    /// Returns the number of stored usernames across all base names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Checks if the store holds no usernames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct base names.
    #[must_use]
    pub fn base_count(&self) -> usize {
        self.entries.len()
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.created_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_add_and_lookup() {
        let mut store = UsernameStore::default();
        store.add("jaemin", "jaemins");
        store.add("jaemin", "jaemln");

        assert!(store.is_generated("jaemin", "jaemins"));
        assert!(!store.is_generated("jaemin", "jaemin"));
        assert!(!store.is_generated("other", "jaemins"));
        assert_eq!(store.generated_for("jaemin"), vec!["jaemins", "jaemln"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.base_count(), 1);
    }

    #[test]
    fn test_re_adding_refreshes_instead_of_duplicating() {
        let mut store = UsernameStore::default();
        let start = Instant::now();
        store.add_at("base", "bases", start);
        store.add_at("base", "bases", start + Duration::from_secs(1800));
        assert_eq!(store.len(), 1);

        // Refreshed entry is still live 90 minutes after the first insert.
        assert!(store.is_generated_at("base", "bases", start + Duration::from_secs(5400)));
    }

    #[test]
    fn test_expired_entries_are_not_reported() {
        let mut store = UsernameStore::new(HOUR);
        let start = Instant::now();
        store.add_at("base", "bases", start);
        assert!(store.is_generated_at("base", "bases", start + HOUR - Duration::from_secs(1)));
        assert!(!store.is_generated_at("base", "bases", start + HOUR));
    }

    #[test]
    fn test_cleanup_removes_old_entries_and_empty_bases() {
        let mut store = UsernameStore::new(HOUR);
        let start = Instant::now();
        store.add_at("alpha", "alphas", start);
        store.add_at("alpha", "alpah", start + Duration::from_secs(3000));
        store.add_at("bravo", "bravos", start);

        let removed = store.cleanup(start + Duration::from_secs(3700));
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.base_count(), 1);
        assert!(store.is_generated_at("alpha", "alpah", start + Duration::from_secs(3700)));

        assert_eq!(store.cleanup(start + Duration::from_secs(10_000)), 1);
        assert!(store.is_empty());
    }
}
