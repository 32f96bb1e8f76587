use async_trait::async_trait;

pub mod disk;

pub use disk::{default_staleness_threshold, DocsCache, DEFAULT_STALENESS_SECS};

/// Simplified cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Unified cache trait that cache implementations follow.
///
/// There is no removal operation: expiry is policy-based, a stale entry
/// stays in storage, is reported as a miss, and is overwritten by the
/// next insert for its key.
#[async_trait]
pub trait Cache: Send + Sync {
    type Key: Send + Sync;
    type Value: Send + Sync;
    type Error: Send + Sync + 'static;

    /// Get a fresh value from the cache
    async fn get(&self, key: &Self::Key) -> Result<Option<Self::Value>, Self::Error>;

    /// Insert a value into the cache, overwriting any previous entry
    async fn insert(&self, key: Self::Key, value: Self::Value) -> Result<(), Self::Error>;

    /// Get cache statistics (non-async for simplicity)
    fn stats(&self) -> CacheStats;
}
