//! Durable key-value storage seam.
//!
//! The cache layer only ever talks to a [`KeyValueStore`]: string keys,
//! string values, `get`/`set`/`remove`. Serialization is the caller's job;
//! [`read_json`] and [`write_json`] cover the common case.
//!
//! Two backends ship with the crate:
//! - [`FileStore`]: one JSON file per key in a directory
//! - [`MemoryStore`]: an in-process map, used by tests and embedders

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CacheError, StoreError};

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a key that does not exist succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and deserialize a JSON value. Missing keys yield `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, CacheError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| CacheError::serialization(key, e))?;
    Ok(Some(value))
}

/// Serialize and write a JSON value, returning the stored byte length.
pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<usize, CacheError> {
    let raw = serde_json::to_string(value).map_err(|e| CacheError::serialization(key, e))?;
    store.set(key, &raw).await?;
    Ok(raw.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_read_json_missing_key() {
        let store = MemoryStore::new();
        let value: Option<Sample> = read_json(&store, "absent").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_json() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "fajr".to_string(),
            count: 2,
        };
        let bytes = write_json(&store, "sample", &sample).await.unwrap();
        assert_eq!(bytes, store.get("sample").await.unwrap().unwrap().len());

        let loaded: Option<Sample> = read_json(&store, "sample").await.unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[tokio::test]
    async fn test_read_json_malformed_is_serialization_error() {
        let store = MemoryStore::new();
        store.set("sample", "{not json").await.unwrap();
        let result: Result<Option<Sample>, _> = read_json(&store, "sample").await;
        assert!(matches!(result, Err(CacheError::Serialization { .. })));
    }
}
