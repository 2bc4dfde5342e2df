use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::KeyValueStore;
use crate::error::StoreError;

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place so a
/// crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(|c: char| c == '/' || c == '\\') || key.contains("..") {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "invalid store key"),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn io_error(key: &str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        debug!(key, bytes = value.len(), "Wrote store value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store")).unwrap();

        assert!(store.get("cached_mosques").await.unwrap().is_none());

        store.set("cached_mosques", "[]").await.unwrap();
        assert_eq!(store.get("cached_mosques").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("store").join("cached_mosques.json").exists());

        store.set("cached_mosques", "[1]").await.unwrap();
        assert_eq!(store.get("cached_mosques").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.remove("never_written").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("a/b").await.is_err());
    }
}
