//! Usage counter storage for Redis.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

/// Counter store with per-key expiry backing the admission controller.
///
/// The store offers independent get/set only; callers must not assume an
/// atomic read-modify-write. See `AdmissionController` for the race this
/// implies and its bound.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Current counter value, or None if never set or expired.
    async fn get(&self, key: &str) -> Result<Option<i64>>;

    /// Set the counter, expiring `ttl` after this call.
    async fn set_with_expiry(&self, key: &str, value: i64, ttl: Duration) -> Result<()>;
}

/// Redis implementation of QuotaStore.
#[derive(Clone)]
pub struct RedisQuotaStore {
    client: redis::Client,
}

impl RedisQuotaStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuotaStore for RedisQuotaStore {
    async fn get(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let value: Option<i64> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: i64, ttl: Duration) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        // SET EX takes whole seconds; sub-second windows round up rather than
        // producing a key that never expires.
        let ttl_secs = ttl.as_secs().max(1);

        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }
}
