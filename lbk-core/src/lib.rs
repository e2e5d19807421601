pub mod repository;
pub mod analytics;

pub use repository::{KeyValueStore, InMemoryStore};
pub use analytics::EventTracker;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage backend error: {0}")]
    StorageError(String),
    #[error("Stored value under {key} is not valid JSON: {source}")]
    CorruptValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
