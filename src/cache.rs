//! In-memory TTL cache for scraped listing and search results.
//!
//! Thread-safe via `DashMap`. Expiry is lazy: a stale entry is only
//! removed when `get` touches it, there is no background sweep. Entries
//! are written wholesale, so a last-writer-wins race between concurrent
//! requests for the same key is acceptable.

use dashmap::DashMap;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Shared cache with a fixed per-entry TTL set at construction.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get a cached value by key. Returns `None` if missing or expired;
    /// expired entries are evicted on access.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            // release the read guard before removing
            drop(entry);
            self.entries.remove(key);
            None
        } else {
            Some(entry.value.clone())
        }
    }

    /// Store a value under the key, replacing any previous entry and
    /// restarting its TTL.
    pub fn insert(&self, key: String, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("mangaPage:1".to_string(), vec!["a".to_string()]);
        assert_eq!(cache.get("mangaPage:1"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_expired_entry_is_miss_and_evicted() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("mangaPage:1".to_string(), vec![1, 2, 3]);
        sleep(Duration::from_millis(25));
        assert_eq!(cache.get("mangaPage:1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("search:".to_string(), vec![0]);
        cache.insert("search:naruto".to_string(), vec![1]);
        assert_eq!(cache.get("search:"), Some(vec![0]));
        assert_eq!(cache.get("search:naruto"), Some(vec![1]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_insert_replaces_and_restarts_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), vec![1]);
        cache.insert("k".to_string(), vec![2]);
        assert_eq!(cache.get("k"), Some(vec![2]));
        assert_eq!(cache.len(), 1);
    }
}
