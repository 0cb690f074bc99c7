//! SQLite-backed document store using rusqlite.
//!
//! T011: Implement SqliteStore with open, in-memory mode, and schema init
//! T012: Implement transactional put_many

use std::path::PathBuf;

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::store::{PersistenceStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY,
    body TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Document store persisting each logical key as one row in SQLite.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        tracing::debug!("document store initialized");
        Ok(())
    }
}

impl PersistenceStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    fn put_many(&mut self, docs: &[(&str, String)]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for (key, body) in docs {
            tx.execute(
                "INSERT INTO documents (key, body, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![key, body],
            )?;
        }
        tx.commit()?;

        tracing::debug!(documents = docs.len(), "committed document batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store
            .put_many(&[("xp_profile", "{\"total_xp\":0}".to_string())])
            .unwrap();

        let body = store.get("xp_profile").unwrap();
        assert_eq!(body.as_deref(), Some("{\"total_xp\":0}"));
    }

    #[test]
    fn test_put_many_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.put_many(&[("k", "old".to_string())]).unwrap();
        store.put_many(&[("k", "new".to_string())]).unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_missing_key_returns_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("absent").unwrap().is_none());
    }
}
