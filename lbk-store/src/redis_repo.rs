use async_trait::async_trait;
use lbk_core::{CoreError, CoreResult, KeyValueStore};
use redis::AsyncCommands;

/// Key-value storage backed by Redis, all keys under `lbk:`
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// The connection is opened lazily on first use
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    fn key(key: &str) -> String {
        format!("lbk:{}", key)
    }

    async fn connection(&self) -> CoreResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(storage_error)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(Self::key(key)).await.map_err(storage_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(Self::key(key), value).await.map_err(storage_error)
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(Self::key(key)).await.map_err(storage_error)
    }
}

fn storage_error(e: redis::RedisError) -> CoreError {
    CoreError::StorageError(e.to_string())
}
