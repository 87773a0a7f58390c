use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub keys: Vec<String>,
}

/// In-memory key/value cache with per-entry expiry.
///
/// Interior mutability so a shared `&Vault` can fill it lazily.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Value for `key` unless missing or expired; expired entries are evicted
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => Instant::now() > entry.expires_at,
        };

        if expired {
            entries.remove(key);
            log::debug!("Cache miss (expired): {}", key);
            return None;
        }

        log::debug!("Cache hit: {}", key);
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.to_string(), entry);
        log::debug!("Cache set: {} (TTL: {}s)", key, ttl.as_secs());
    }

    /// Return the cached value or compute, store and return a fresh one
    pub fn get_or_insert_with(&self, key: &str, load: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = load();
        self.set(key, value.clone());
        value
    }

    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.lock().remove(key).is_some();
        if removed {
            log::debug!("Cache invalidated: {}", key);
        }
        removed
    }

    /// Clear every entry, returning how many were dropped
    pub fn invalidate_all(&self) -> usize {
        let mut entries = self.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let now = Instant::now();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            total_entries: entries.len(),
            valid_entries: entries.values().filter(|e| now <= e.expires_at).count(),
            keys,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<V>>> {
        // A poisoned map only holds plain values; keep serving them.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache: TtlCache<u32> = TtlCache::default();
        cache.set("answer", 42);
        assert_eq!(cache.get("answer"), Some(42));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache: TtlCache<&str> = TtlCache::default();
        cache.set_with_ttl("short", "value", Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.stats().total_entries, 0, "expired entry should be removed on get");
    }

    #[test]
    fn test_invalidate_all_counts_entries() {
        let cache: TtlCache<u8> = TtlCache::default();
        cache.set("a", 1);
        cache.set("b", 2);

        let stats = cache.stats();
        assert_eq!(stats.valid_entries, 2);
        assert_eq!(stats.keys, vec!["a".to_string(), "b".to_string()]);

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.invalidate_all(), 1);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_get_or_insert_with_loads_once() {
        let cache: TtlCache<String> = TtlCache::default();
        let mut calls = 0;

        let first = cache.get_or_insert_with("k", || {
            calls += 1;
            "loaded".to_string()
        });
        let second = cache.get_or_insert_with("k", || {
            calls += 1;
            "reloaded".to_string()
        });

        assert_eq!(first, "loaded");
        assert_eq!(second, "loaded");
        assert_eq!(calls, 1);
    }
}
