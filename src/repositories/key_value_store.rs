// src/repositories/key_value_store.rs
//
// Key-value persistence for planner entries.
//
// Values are opaque strings (JSON documents in practice); a `set` replaces
// the previous value for the key wholesale.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    fn remove(&self, key: &str) -> AppResult<()>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteKeyValueStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;
        let result = conn.query_row(
            "SELECT value FROM key_value_entries WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR REPLACE INTO key_value_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM key_value_entries WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}

// ---------------------------------------------------------------------
// In-memory Implementation
// ---------------------------------------------------------------------
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Other("Key-value store lock poisoned".to_string())
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
