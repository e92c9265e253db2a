use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::store::ProfileStore;

const KEY_PREFIX: &str = "formfill:profile:";

/// Profiles stored as JSON strings under `formfill:profile:<key>`.
pub struct RedisProfileStore {
    client: redis::Client,
}

impl RedisProfileStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn redis_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl ProfileStore for RedisProfileStore {
    async fn get(&self, key: &str) -> Result<Option<Profile>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::redis_key(key)).await?;
        debug!(key, found = raw.is_some(), "Redis profile lookup");
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, profile: &Profile) -> Result<(), AppError> {
        let json = serde_json::to_string(profile)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(Self::redis_key(key), json).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
