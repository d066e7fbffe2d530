//! Settings store
//!
//! Singleton [`UserSettings`] document under the `user_settings` key.
//! Seeded with defaults (including catalog recency lists) on first load,
//! updated by partial merge, removed only by a full data wipe.

use std::sync::Arc;

use crate::catalog;
use crate::error::{Error, Result};
use crate::store::kv::{keys, KeyValueStore};
use crate::types::{SettingsPatch, UserSettings};

/// Service object over the `user_settings` document.
pub struct SettingsStore {
    storage: Arc<dyn KeyValueStore>,
    /// Cap on each recency list, most-recent-first
    recent_limit: usize,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            recent_limit: 20,
        }
    }

    pub fn with_recent_limit(storage: Arc<dyn KeyValueStore>, recent_limit: usize) -> Self {
        Self {
            storage,
            recent_limit: recent_limit.max(1),
        }
    }

    /// Load settings, seeding and persisting defaults on first run.
    pub fn load(&self) -> Result<UserSettings> {
        match self.storage.get(keys::USER_SETTINGS)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                tracing::error!(error = %e, "Corrupt user_settings document");
                Error::Store("failed to load settings".to_string())
            }),
            None => {
                tracing::info!("No settings found, seeding defaults");
                let settings = Self::seeded_defaults();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    /// Merge a partial update into the stored settings.
    pub fn update(&self, patch: SettingsPatch) -> Result<UserSettings> {
        let mut settings = self.load()?;
        settings.apply(patch);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Record a resisted urge: every active streak goal's counter
    /// increments, regardless of which urge type was resisted.
    pub fn record_resisted(&self) -> Result<UserSettings> {
        let mut settings = self.load()?;
        for goal in settings.streak_goals.iter_mut().filter(|g| g.is_active) {
            goal.current_streak += 1;
        }
        self.save(&settings)?;
        Ok(settings)
    }

    /// Push a custom trigger to the front of its recency list.
    pub fn touch_trigger(&self, value: &str) -> Result<()> {
        self.touch(|s| &mut s.recent_triggers, value)
    }

    /// Push a custom location to the front of its recency list.
    pub fn touch_location(&self, value: &str) -> Result<()> {
        self.touch(|s| &mut s.recent_locations, value)
    }

    /// Push a custom emotion to the front of its recency list.
    pub fn touch_emotion(&self, value: &str) -> Result<()> {
        self.touch(|s| &mut s.recent_emotions, value)
    }

    /// Replace the whole document (import path).
    pub fn replace_all(&self, settings: &UserSettings) -> Result<()> {
        self.save(settings)
    }

    fn touch(
        &self,
        list: impl Fn(&mut UserSettings) -> &mut Vec<String>,
        value: &str,
    ) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }

        let mut settings = self.load()?;
        let entries = list(&mut settings);
        entries.retain(|v| !v.eq_ignore_ascii_case(value));
        entries.insert(0, value.to_string());
        entries.truncate(self.recent_limit);
        self.save(&settings)
    }

    fn seeded_defaults() -> UserSettings {
        UserSettings {
            recent_triggers: catalog::DEFAULT_TRIGGERS.iter().map(|s| s.to_string()).collect(),
            recent_locations: catalog::DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            recent_emotions: catalog::DEFAULT_EMOTIONS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn save(&self, settings: &UserSettings) -> Result<()> {
        let value = serde_json::to_value(settings)?;
        self.storage.set(keys::USER_SETTINGS, value).map_err(|e| {
            tracing::error!(error = %e, "Failed to write user_settings document");
            Error::Store("failed to save settings".to_string())
        })
    }
}
