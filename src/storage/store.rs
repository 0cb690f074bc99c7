//! Document store abstraction.
//!
//! T009: Define PersistenceStore trait over keyed JSON documents
//! T010: Implement MemoryStore for tests and ephemeral sessions
//!
//! Engine state lives in a handful of JSON documents under fixed logical
//! keys. A store only has to retrieve one document and commit a batch of
//! them; the batch commit is what lets the engine apply a whole
//! workout-completion chain as a single transaction.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Key-value persistence for UTF-8 JSON documents.
pub trait PersistenceStore {
    /// Fetch the document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write every `(key, body)` pair as one atomic batch.
    ///
    /// Either all documents are persisted or none are.
    fn put_many(&mut self, docs: &[(&str, String)]) -> Result<(), StoreError>;
}

/// Deserialize the document under `key`, falling back to `T::default()`
/// when the document does not exist yet.
pub fn load_or_default<S, T>(store: &S, key: &str) -> Result<T, StoreError>
where
    S: PersistenceStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(body) => Ok(serde_json::from_str(&body)?),
        None => Ok(T::default()),
    }
}

/// Serialize `value` into a document body.
pub fn to_document<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

/// In-memory store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.docs.get(key).cloned())
    }

    fn put_many(&mut self, docs: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, body) in docs {
            self.docs.insert((*key).to_string(), body.clone());
        }
        Ok(())
    }
}

/// Document storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store
            .put_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_load_or_default_missing_document() {
        let store = MemoryStore::new();
        let value: Vec<u32> = load_or_default(&store, "nothing").unwrap();
        assert!(value.is_empty());
    }
}
