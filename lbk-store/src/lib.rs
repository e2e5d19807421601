pub mod app_config;
pub mod redis_repo;

use std::sync::Arc;
use lbk_core::{InMemoryStore, KeyValueStore};
use tracing::info;
use app_config::{StorageBackend, StorageConfig};

pub use redis_repo::RedisStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage.redis_url is required for the redis backend")]
    MissingRedisUrl,
    #[error("Redis connection error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Open the key-value backend selected in configuration
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or(StoreError::MissingRedisUrl)?;
            info!("Using Redis storage");
            Ok(Arc::new(RedisStore::new(url)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend() {
        let store = open_store(&StorageConfig::default()).unwrap();
        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            redis_url: None,
            ..Default::default()
        };
        assert!(matches!(open_store(&config), Err(StoreError::MissingRedisUrl)));
    }
}
