//! Replacement-action store
//!
//! Catalog of [`ReplacementAction`] entries under the `replacement_actions`
//! key. Seeded from the built-in catalog on first load; entries are never
//! deleted, only updated in place.

use std::sync::Arc;

use crate::catalog;
use crate::error::{Error, Result};
use crate::store::kv::{keys, KeyValueStore};
use crate::types::ReplacementAction;

/// Service object over the `replacement_actions` document.
pub struct ActionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ActionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load the catalog, seeding defaults on first run.
    pub fn list(&self) -> Result<Vec<ReplacementAction>> {
        match self.storage.get(keys::REPLACEMENT_ACTIONS)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                tracing::error!(error = %e, "Corrupt replacement_actions document");
                Error::Store("failed to load replacement actions".to_string())
            }),
            None => {
                tracing::info!("No replacement actions found, seeding catalog");
                let actions = catalog::default_replacement_actions();
                self.save(&actions)?;
                Ok(actions)
            }
        }
    }

    /// Record one use of an action, bumping its counter.
    pub fn record_use(&self, id: &str) -> Result<ReplacementAction> {
        self.mutate(id, |action| {
            action.times_used += 1;
            Ok(())
        })
    }

    /// Rate an action's effectiveness (1-5).
    pub fn rate(&self, id: &str, effectiveness: u8) -> Result<ReplacementAction> {
        if !(1..=5).contains(&effectiveness) {
            return Err(Error::InvalidInput(
                "effectiveness rating must be between 1 and 5".to_string(),
            ));
        }
        self.mutate(id, |action| {
            action.effectiveness = Some(effectiveness);
            Ok(())
        })
    }

    /// Replace the whole catalog (import path).
    pub fn replace_all(&self, actions: &[ReplacementAction]) -> Result<()> {
        self.save(actions)
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut ReplacementAction) -> Result<()>,
    ) -> Result<ReplacementAction> {
        let mut actions = self.list()?;
        let action = actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::ActionNotFound(id.to_string()))?;

        apply(action)?;
        let updated = action.clone();
        self.save(&actions)?;
        Ok(updated)
    }

    fn save(&self, actions: &[ReplacementAction]) -> Result<()> {
        let value = serde_json::to_value(actions)?;
        self.storage
            .set(keys::REPLACEMENT_ACTIONS, value)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to write replacement_actions document");
                Error::Store("failed to save replacement actions".to_string())
            })
    }
}
