//! In-process implementation of the `CacheStore` capability

use async_trait::async_trait;
use melodia_core::{error::Result, CacheStore, MelodiaError};
use moka::future::Cache;
use std::time::Duration;

/// String cache with a per-entry time to live
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<String> {
        self.inner
            .get(key)
            .await
            .ok_or_else(|| MelodiaError::CacheMiss(key.to_string()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.inner.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}
