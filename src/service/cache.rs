use dracin_source_manager::prelude::SourceId;
use std::time::Duration;

pub use moka::future::Cache;

/// Values keyed by source and query or drama key.
pub type SourceCache<V> = Cache<(SourceId, String), V>;

#[derive(Debug, serde::Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: u64,
    /// Seconds a result stays valid.
    #[serde(default = "CacheConfig::default_ttl")]
    pub ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            ttl: Self::default_ttl(),
        }
    }
}

impl CacheConfig {
    fn default_capacity() -> u64 {
        100
    }

    fn default_ttl() -> u64 {
        300
    }

    pub fn build<V>(&self) -> SourceCache<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        Cache::builder()
            .max_capacity(self.capacity)
            .time_to_live(Duration::from_secs(self.ttl))
            .build()
    }
}
