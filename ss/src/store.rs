//! Core SessionStore trait and backends
//!
//! Values are opaque `serde_json::Value` documents keyed by
//! `(collection, session_id)`. Two backends: `MemoryStore` for tests and
//! embedded use, `FileStore` for one-JSON-file-per-session persistence.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
}

/// Session-keyed document store
///
/// One JSON document per `(collection, session_id)` pair. Backends must be
/// safe to share across tasks; per-session write ordering is the caller's
/// responsibility (one conversational turn runs to completion before the
/// next for the same session).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the document for a session, or None if absent
    async fn get(&self, collection: &str, session_id: &str) -> Result<Option<Value>, StoreError>;

    /// Set (create or replace) the document for a session
    async fn set(&self, collection: &str, session_id: &str, value: Value) -> Result<(), StoreError>;

    /// Delete the document for a session, returning whether it existed
    async fn delete(&self, collection: &str, session_id: &str) -> Result<bool, StoreError>;

    /// List all session ids present in a collection
    async fn session_ids(&self, collection: &str) -> Result<Vec<String>, StoreError>;
}

/// In-memory store backed by a nested HashMap
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, collection: &str, session_id: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.get(collection).and_then(|c| c.get(session_id)).cloned())
    }

    async fn set(&self, collection: &str, session_id: &str, value: Value) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .entry(collection.to_string())
            .or_default()
            .insert(session_id.to_string(), value);
        Ok(())
    }

    async fn delete(&self, collection: &str, session_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .get_mut(collection)
            .is_some_and(|c| c.remove(session_id).is_some()))
    }

    async fn session_ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let mut ids: Vec<String> = inner
            .get(collection)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        Ok(ids)
    }
}

/// File-backed store: `base/{collection}/{session_id}.json`
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a file store rooted at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened session store");
        Ok(Self { base_path })
    }

    fn document_path(&self, collection: &str, session_id: &str) -> Result<PathBuf, StoreError> {
        validate_key(collection)?;
        validate_key(session_id)?;
        Ok(self
            .base_path
            .join(collection)
            .join(format!("{}.json", session_id)))
    }
}

/// Reject keys that would escape the store directory
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(StoreError::InvalidSessionId(key.to_string()));
    }
    Ok(())
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, collection: &str, session_id: &str) -> Result<Option<Value>, StoreError> {
        let path = self.document_path(collection, session_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn set(&self, collection: &str, session_id: &str, value: Value) -> Result<(), StoreError> {
        let path = self.document_path(collection, session_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&value)?;
        fs::write(&path, content)?;
        debug!(%collection, %session_id, "FileStore::set: document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, session_id: &str) -> Result<bool, StoreError> {
        let path = self.document_path(collection, session_id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        debug!(%collection, %session_id, "FileStore::delete: document removed");
        Ok(true)
    }

    async fn session_ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        validate_key(collection)?;
        let dir = self.base_path.join(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("workflow", "sess-1").await.unwrap().is_none());

        store
            .set("workflow", "sess-1", json!({"step": "planning"}))
            .await
            .unwrap();
        let value = store.get("workflow", "sess-1").await.unwrap().unwrap();
        assert_eq!(value["step"], "planning");

        // Replace
        store
            .set("workflow", "sess-1", json!({"step": "searching"}))
            .await
            .unwrap();
        let value = store.get("workflow", "sess-1").await.unwrap().unwrap();
        assert_eq!(value["step"], "searching");
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemoryStore::new();
        store.set("plans", "sess-1", json!({})).await.unwrap();

        assert!(store.delete("plans", "sess-1").await.unwrap());
        assert!(!store.delete("plans", "sess-1").await.unwrap());
        assert!(store.get("plans", "sess-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_session_ids() {
        let store = MemoryStore::new();
        store.set("workflow", "b", json!(1)).await.unwrap();
        store.set("workflow", "a", json!(2)).await.unwrap();
        store.set("plans", "c", json!(3)).await.unwrap();

        let ids = store.session_ids("workflow").await.unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store
            .set("workflow", "sess-1", json!({"step": "summary", "slots_complete": true}))
            .await
            .unwrap();

        let value = store.get("workflow", "sess-1").await.unwrap().unwrap();
        assert_eq!(value["step"], "summary");
        assert_eq!(value["slots_complete"], true);

        assert!(temp.path().join("workflow").join("sess-1.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_delete_and_list() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set("plans", "s2", json!({})).await.unwrap();
        store.set("plans", "s1", json!({})).await.unwrap();

        assert_eq!(
            store.session_ids("plans").await.unwrap(),
            vec!["s1".to_string(), "s2".to_string()]
        );

        assert!(store.delete("plans", "s1").await.unwrap());
        assert!(!store.delete("plans", "s1").await.unwrap());
        assert_eq!(store.session_ids("plans").await.unwrap(), vec!["s2".to_string()]);
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_escapes() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        let err = store.get("workflow", "../escape").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidSessionId(_)));

        let err = store.set("work/flow", "s1", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidSessionId(_)));
    }

    #[tokio::test]
    async fn test_file_store_missing_collection_lists_empty() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert!(store.session_ids("nothing").await.unwrap().is_empty());
    }
}
