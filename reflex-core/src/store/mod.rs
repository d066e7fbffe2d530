//! Storage layer
//!
//! A string-keyed JSON document store ([`kv`]) with typed service objects
//! on top: [`LogStore`], [`SettingsStore`], and [`ActionStore`]. Every
//! mutation is a full read-modify-write of one document; callers serialize
//! concurrent mutations of the same key.

pub mod actions;
pub mod kv;
pub mod logs;
pub mod settings;

pub use actions::ActionStore;
pub use kv::{keys, KeyValueStore, MemoryStore, SqliteStore};
pub use logs::LogStore;
pub use settings::SettingsStore;
