//! Key-value document storage
//!
//! All persisted state lives in a handful of named JSON documents, each
//! swapped atomically on save. The [`KeyValueStore`] trait is the seam the
//! stores are built against; [`SqliteStore`] is the production backend and
//! [`MemoryStore`] backs tests.

use crate::error::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Fixed document keys.
pub mod keys {
    /// Array of UrgeLog, newest first
    pub const URGE_LOGS: &str = "urge_logs";
    /// Singleton UserSettings object
    pub const USER_SETTINGS: &str = "user_settings";
    /// Array of ReplacementAction
    pub const REPLACEMENT_ACTIONS: &str = "replacement_actions";
    /// Reserved: standalone streak snapshots
    pub const STREAKS: &str = "streaks";
    /// Reserved: cached generated insights
    pub const AI_INSIGHTS: &str = "ai_insights";
    /// Reserved: onboarding flag mirror
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";

    /// Every key, for full data wipes.
    pub const ALL: &[&str] = &[
        URGE_LOGS,
        USER_SETTINGS,
        REPLACEMENT_ACTIONS,
        STREAKS,
        AI_INSIGHTS,
        ONBOARDING_COMPLETED,
    ];
}

/// String-keyed JSON document store.
///
/// Each document is read and written whole; there is no partial update at
/// this layer. Callers must serialize concurrent mutations of the same key.
pub trait KeyValueStore: Send + Sync {
    /// Fetch a document, or `None` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Write a document, replacing any previous value.
    fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Delete the given documents. Missing keys are not an error.
    fn remove_all(&self, keys: &[&str]) -> Result<()>;
}

// ============================================
// SQLite backend
// ============================================

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: single document table
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        key         TEXT PRIMARY KEY,
        value       JSON NOT NULL,
        updated_at  DATETIME NOT NULL
    );
    "#,
];

fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running storage migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(from = current_version, to = SCHEMA_VERSION, "Migrations complete");
    }

    Ok(())
}

/// SQLite-backed document store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn.lock().unwrap();
        let raw: Option<String> = conn
            .query_row("SELECT value FROM documents WHERE key = ?", [key], |r| {
                r.get(0)
            })
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO documents (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        for key in keys {
            conn.execute("DELETE FROM documents WHERE key = ?", [key])?;
        }
        Ok(())
    }
}

// ============================================
// In-memory backend
// ============================================

/// HashMap-backed document store for tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.docs.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.docs.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut docs = self.docs.lock().unwrap();
        for key in keys {
            docs.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check_backend(store: &dyn KeyValueStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", json!({"a": 1})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 1})));

        // Overwrite replaces the whole document
        store.set("k", json!([1, 2, 3])).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!([1, 2, 3])));

        store.remove_all(&["k", "never-written"]).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_store_backend() {
        check_backend(&MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store_backend() {
        check_backend(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_sqlite_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reflex.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set(keys::URGE_LOGS, json!([])).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(keys::URGE_LOGS).unwrap(), Some(json!([])));
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
