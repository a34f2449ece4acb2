use redis::aio::ConnectionManager;
use std::time::Duration;
use thiserror::Error;
use crate::models::SessionResult;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Computed results keyed by quiz session
///
/// Session ids are minted once per submission, so an entry never goes
/// stale and is only dropped by TTL. Lookups hit the in-process tier
/// first, then Redis, which is shared across instances.
pub struct ResultCache {
    redis: ConnectionManager,
    local: moka::future::Cache<String, SessionResult>,
    ttl_secs: u64,
}

impl ResultCache {
    pub async fn new(redis_url: &str, local_capacity: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let local = moka::future::CacheBuilder::new(local_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self { redis, local, ttl_secs })
    }

    /// Redis key for a session's result
    pub fn key(session_id: &str) -> String {
        format!("result:{}", session_id)
    }

    pub async fn get_result(&self, session_id: &str) -> Result<Option<SessionResult>, CacheError> {
        if let Some(hit) = self.local.get(session_id).await {
            tracing::trace!("Local result hit for {}", session_id);
            return Ok(Some(hit));
        }

        // Multiplexed handle; clones share one connection
        let mut conn = self.redis.clone();
        let stored: Option<String> = redis::cmd("GET")
            .arg(Self::key(session_id))
            .query_async(&mut conn)
            .await?;

        let Some(json) = stored else {
            return Ok(None);
        };

        let result: SessionResult = serde_json::from_str(&json)?;
        self.local.insert(session_id.to_string(), result.clone()).await;

        tracing::trace!("Redis result hit for {}", session_id);
        Ok(Some(result))
    }

    pub async fn set_result(&self, session_id: &str, result: &SessionResult) -> Result<(), CacheError> {
        let json = serde_json::to_string(result)?;

        self.local.insert(session_id.to_string(), result.clone()).await;

        let mut conn = self.redis.clone();
        let _: () = redis::cmd("SETEX")
            .arg(Self::key(session_id))
            .arg(self.ttl_secs)
            .arg(json)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}
