use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::{CoreError, CoreResult};

/// Opaque string key-value storage for carts, settings and the capped logs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> CoreResult<()>;

    async fn delete(&self, key: &str) -> CoreResult<()>;
}

/// Read and decode a JSON value, `None` when the key is absent
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CoreError::CorruptValue { key: key.to_string(), source }),
        None => Ok(None),
    }
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> CoreResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// Append `item` to the JSON list under `key`, keeping only the most recent
/// `capacity` entries. Returns the stored length.
///
/// Read-modify-write: callers sharing a key must not append concurrently.
pub async fn append_capped<T: Serialize + DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    item: T,
    capacity: usize,
) -> CoreResult<usize> {
    let capacity = capacity.max(1);
    let mut entries: Vec<T> = load_json(store, key).await?.unwrap_or_default();
    entries.push(item);

    if entries.len() > capacity {
        let overflow = entries.len() - capacity;
        entries.drain(..overflow);
    }

    save_json(store, key, &entries).await?;
    Ok(entries.len())
}

/// Process-local store, used by tests and the `memory` storage backend
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
