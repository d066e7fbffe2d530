//! # reflex-core
//!
//! Core library for reflex - a personal urge-tracking and habit companion.
//!
//! This library provides:
//! - Domain types for urge logs, settings, and replacement actions
//! - A string-keyed JSON document storage layer
//! - The statistics engine, streak calculator, and insight generator
//! - Export/import of the full data set
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction: store mutation, then on-demand statistics
//! recomputation, then insight generation. Statistics are never persisted
//! on their own; they are a pure function of the log list and an instant.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reflex_core::store::{LogStore, SqliteStore};
//! use reflex_core::analytics::{compute_statistics, StatsWindow};
//! use reflex_core::Config;
//!
//! let storage = Arc::new(SqliteStore::open(&Config::database_path()).expect("open store"));
//! let logs = LogStore::new(storage);
//! let all = logs.list().expect("load logs");
//! let stats = compute_statistics(&all, StatsWindow::Month.days(), chrono::Local::now());
//! println!("resisted {}%", stats.success_rate);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use export::{export_all, import_all, ExportData, EXPORT_VERSION};
pub use store::{ActionStore, KeyValueStore, LogStore, MemoryStore, SettingsStore, SqliteStore};
pub use types::*;
pub use validate::{LogDraft, ValidationReport};

// Public modules
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
pub mod validate;
