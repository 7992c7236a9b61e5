use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier snapshot cache
///
/// L1 (moka, in-process) over L2 (Redis, shared across instances). Snapshot
/// reads go L1 -> L2 -> backend; a cache failure never fails a request, the
/// caller falls through to the backend and logs.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);

            let bytes = json.as_bytes().to_vec();
            self.l1_cache.insert(key.to_string(), bytes).await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both L1 and L2)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        let bytes = json.as_bytes().to_vec();
        self.l1_cache.insert(key.to_string(), bytes).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }

    /// Drop every snapshot touching one venue plus the directory listing.
    ///
    /// Called after admin mutations and review submissions so the next
    /// render sees the backend's latest state.
    pub async fn invalidate_venue(&self, venue_id: i64) -> Result<(), CacheError> {
        self.delete(&CacheKey::venues()).await?;
        self.delete(&CacheKey::venue(venue_id)).await?;
        self.delete(&CacheKey::menu(venue_id)).await?;
        self.delete(&CacheKey::reviews(venue_id)).await?;
        tracing::debug!("Invalidated cached snapshots for venue {}", venue_id);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// The full venue snapshot
    pub fn venues() -> String {
        "venues:all".to_string()
    }

    /// The faculty list
    pub fn faculties() -> String {
        "faculties:all".to_string()
    }

    /// A single venue record
    pub fn venue(id: i64) -> String {
        format!("venues:{}", id)
    }

    /// A venue's menu snapshot
    pub fn menu(venue_id: i64) -> String {
        format!("menu:{}", venue_id)
    }

    /// A venue's review snapshot
    pub fn reviews(venue_id: i64) -> String {
        format!("reviews:{}", venue_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = CacheKey::venue(1);

        cache.set(&key, &"snapshot").await.unwrap();
        let result: String = cache.get(&key).await.unwrap();
        assert_eq!(result, "snapshot");

        cache.delete(&key).await.unwrap();
        assert!(cache.get::<String>(&key).await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::venues(), "venues:all");
        assert_eq!(CacheKey::faculties(), "faculties:all");
        assert_eq!(CacheKey::venue(7), "venues:7");
        assert_eq!(CacheKey::menu(7), "menu:7");
        assert_eq!(CacheKey::reviews(7), "reviews:7");
    }
}
