//! Log store
//!
//! Ordered collection of [`UrgeLog`] records persisted as one JSON array
//! under the `urge_logs` key, newest first. Every mutation is a full
//! read-modify-write of the array; on a write failure nothing is changed.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::store::kv::{keys, KeyValueStore};
use crate::types::{UrgeLog, UrgeLogUpdate};

/// Service object over the `urge_logs` document.
pub struct LogStore {
    storage: Arc<dyn KeyValueStore>,
}

impl LogStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load all logs in stored order (newest first).
    ///
    /// Analytics must not rely on this ordering; chronology is always
    /// derived from `timestamp`.
    pub fn list(&self) -> Result<Vec<UrgeLog>> {
        match self.storage.get(keys::URGE_LOGS)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                tracing::error!(error = %e, "Corrupt urge_logs document");
                Error::Store("failed to load urge logs".to_string())
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Logs with `timestamp` in `[start, end]` inclusive.
    pub fn between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<UrgeLog>> {
        let logs = self.list()?;
        Ok(logs
            .into_iter()
            .filter(|log| log.timestamp >= start && log.timestamp <= end)
            .collect())
    }

    /// Prepend a new log and persist the collection.
    pub fn append(&self, log: UrgeLog) -> Result<()> {
        let mut logs = self.list()?;
        tracing::info!(id = %log.id, acted_on = log.acted_on, "Saving urge log");
        logs.insert(0, log);
        self.save(&logs)
    }

    /// Apply a partial update to the log with the given id.
    ///
    /// `id` and `timestamp` are immutable; only outcome, replacement
    /// action, and notes can change.
    pub fn update(&self, id: &str, update: UrgeLogUpdate) -> Result<UrgeLog> {
        let mut logs = self.list()?;
        let log = logs
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::LogNotFound(id.to_string()))?;

        if let Some(acted_on) = update.acted_on {
            log.acted_on = acted_on;
        }
        if let Some(action) = update.replacement_action {
            log.replacement_action = Some(action);
        }
        if let Some(notes) = update.notes {
            log.notes = Some(notes);
        }

        let updated = log.clone();
        self.save(&logs)?;
        Ok(updated)
    }

    /// Delete the log with the given id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut logs = self.list()?;
        let before = logs.len();
        logs.retain(|l| l.id != id);
        if logs.len() == before {
            return Err(Error::LogNotFound(id.to_string()));
        }

        tracing::info!(id, "Deleting urge log");
        self.save(&logs)
    }

    /// Replace the entire collection (import path).
    pub fn replace_all(&self, logs: &[UrgeLog]) -> Result<()> {
        self.save(logs)
    }

    fn save(&self, logs: &[UrgeLog]) -> Result<()> {
        let value = serde_json::to_value(logs)?;
        self.storage.set(keys::URGE_LOGS, value).map_err(|e| {
            tracing::error!(error = %e, "Failed to write urge_logs document");
            Error::Store("failed to save urge logs".to_string())
        })
    }
}
