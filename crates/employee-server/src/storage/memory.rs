//! In-memory cache using DashMap

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Simple in-memory cache with TTL support
///
/// Must be created inside a tokio runtime: it spawns the sweep task that
/// drops expired entries.
///
/// Every invalidation bumps a generation counter. A caller that loads a
/// value from the backing store records `generation()` first and stores
/// the result with `set_if_unchanged`, which refuses the write if anything
/// was invalidated in between.
pub struct MemoryCache {
    data: Arc<DashMap<String, CacheEntry>>,
    generation: AtomicU64,
}

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|expires| now > expires).unwrap_or(false)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        let cache = Self {
            data: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
        };

        cache.start_cleanup_task();

        cache
    }

    /// Get a value from cache
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.data.get(key)?;
        if entry.is_expired(Instant::now()) {
            drop(entry);
            self.data.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Current invalidation generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Set a value unconditionally
    #[cfg(test)]
    pub fn set(&self, key: String, value: Vec<u8>, ttl: Option<Duration>) {
        self.bump();
        self.data.insert(key, CacheEntry::new(value, ttl));
    }

    /// Set a value only if nothing was invalidated since `seen` was read.
    /// Returns whether the value was stored.
    pub fn set_if_unchanged(
        &self,
        key: String,
        value: Vec<u8>,
        ttl: Option<Duration>,
        seen: u64,
    ) -> bool {
        // The entry guard holds the shard lock, so a `delete` of this key
        // that bumped after the check still runs after the insert.
        let entry = self.data.entry(key);
        if self.generation() != seen {
            return false;
        }
        entry.insert(CacheEntry::new(value, ttl));
        true
    }

    /// Delete a key from cache
    pub fn delete(&self, key: &str) {
        self.bump();
        self.data.remove(key);
    }

    /// Delete every key starting with `prefix`
    pub fn delete_prefix(&self, prefix: &str) {
        self.bump();
        self.data.retain(|key, _| !key.starts_with(prefix));
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Check if key exists
    #[cfg(test)]
    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn start_cleanup_task(&self) {
        let data = self.data.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;

                let now = Instant::now();
                data.retain(|_, entry| !entry.is_expired(now));
            }
        });
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let cache = MemoryCache::new();

        cache.set("key1".to_string(), vec![1, 2, 3], None);
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        assert_eq!(cache.get("nonexistent"), None);

        cache.delete("key1");
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn test_ttl() {
        let cache = MemoryCache::new();

        cache.set(
            "key1".to_string(),
            vec![1, 2, 3],
            Some(Duration::from_millis(10)),
        );
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("key1"), None);
        assert!(!cache.exists("key1"));
    }

    #[tokio::test]
    async fn test_delete_prefix() {
        let cache = MemoryCache::new();

        cache.set("employee:1".to_string(), vec![1], None);
        cache.set("employee:2".to_string(), vec![2], None);
        cache.set("employees:all".to_string(), vec![3], None);

        cache.delete_prefix("employee:");

        assert!(!cache.exists("employee:1"));
        assert!(!cache.exists("employee:2"));
        assert!(cache.exists("employees:all"));
    }

    #[tokio::test]
    async fn test_set_if_unchanged_stores_when_nothing_invalidated() {
        let cache = MemoryCache::new();

        let seen = cache.generation();
        assert!(cache.set_if_unchanged("key1".to_string(), vec![1], None, seen));
        assert_eq!(cache.get("key1"), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_set_if_unchanged_refused_after_delete() {
        let cache = MemoryCache::new();

        let seen = cache.generation();
        cache.delete("key1");

        assert!(!cache.set_if_unchanged("key1".to_string(), vec![1], None, seen));
        assert!(!cache.exists("key1"));
    }

    #[tokio::test]
    async fn test_set_if_unchanged_refused_after_prefix_delete() {
        let cache = MemoryCache::new();

        // The key was never present, the prefix sweep still counts
        let seen = cache.generation();
        cache.delete_prefix("employee:");

        assert!(!cache.set_if_unchanged("employee:9".to_string(), vec![9], None, seen));
        assert!(!cache.exists("employee:9"));
    }
}
