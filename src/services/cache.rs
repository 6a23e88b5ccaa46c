use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Thread-safe TTL cache keyed by upper-cased ticker.
///
/// A zero TTL disables the cache: inserts are dropped and lookups miss.
pub struct TickerCache<V> {
    data: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

fn cache_key(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

impl<V: Clone> TickerCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Get a live entry; expired entries are evicted on read.
    pub fn get(&self, ticker: &str) -> Option<V> {
        let key = cache_key(ticker);
        let expired = match self.data.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            // Re-checked under the write lock so a concurrent refresh survives.
            self.data
                .remove_if(&key, |_, entry| entry.expires_at <= Instant::now());
        }
        None
    }

    pub fn insert(&self, ticker: &str, value: V) {
        if !self.is_enabled() {
            return;
        }
        self.data.insert(
            cache_key(ticker),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.data.len();
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.data.len())
    }

    /// Number of entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic() {
        let cache = TickerCache::new(Duration::from_secs(60));
        cache.insert("msft", 1);
        assert_eq!(cache.get("MSFT"), Some(1));
        assert_eq!(cache.get(" msft "), Some(1));
        assert_eq!(cache.get("AAPL"), None);
    }

    #[test]
    fn test_cache_expiration() {
        let cache = TickerCache::new(Duration::from_millis(10));
        cache.insert("MSFT", 1);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("MSFT"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_disables() {
        let cache = TickerCache::new(Duration::ZERO);
        assert!(!cache.is_enabled());
        cache.insert("MSFT", 1);
        assert_eq!(cache.get("MSFT"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_purge_expired() {
        let cache = TickerCache::new(Duration::from_millis(10));
        cache.insert("MSFT", 1);
        cache.insert("AAPL", 2);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_read_keeps_refreshed_entry() {
        let cache = TickerCache::new(Duration::from_millis(10));
        cache.insert("MSFT", 1);
        std::thread::sleep(Duration::from_millis(20));

        // refreshed between the stale read and the eviction
        cache.insert("MSFT", 2);
        cache
            .data
            .remove_if("MSFT", |_, entry| entry.expires_at <= Instant::now());
        assert_eq!(cache.get("MSFT"), Some(2));

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("MSFT"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let cache = TickerCache::new(Duration::from_secs(60));
        cache.insert("MSFT", 1);
        cache.insert("MSFT", 2);
        assert_eq!(cache.get("MSFT"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
