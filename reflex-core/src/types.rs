//! Core domain types for reflex
//!
//! These types form the persisted data model:
//!
//! | Term | Definition |
//! |------|------------|
//! | **UrgeLog** | One recorded urge event, with outcome and context |
//! | **Resisted** | `acted_on == false`; the tracked/desired outcome |
//! | **UserSettings** | Singleton preferences and streak-goal document |
//! | **StreakGoal** | A user-defined consecutive-day target |
//! | **ReplacementAction** | Catalog entry suggesting an alternative activity |
//!
//! All persisted documents serialize with camelCase keys; this is the wire
//! layout of the key-value store and the export payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Urge logs
// ============================================

/// A single recorded urge event.
///
/// `id` and `timestamp` are assigned at creation and never change. The
/// outcome (`acted_on`) is required: an undecided log is a [`LogDraft`],
/// which is never persisted.
///
/// [`LogDraft`]: crate::validate::LogDraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgeLog {
    /// Unique identifier: millisecond timestamp plus a random suffix
    pub id: String,
    /// What the urge was (free text, required)
    pub urge: String,
    /// Where it happened (free text, may be empty)
    #[serde(default)]
    pub location: String,
    /// What set it off (free text, may be empty)
    #[serde(default)]
    pub trigger: String,
    /// How the user felt at the time
    #[serde(default)]
    pub emotion: Option<String>,
    /// True if the user acted on the urge, false if they resisted
    pub acted_on: bool,
    /// When the urge was recorded; sort and group key for analytics
    pub timestamp: DateTime<Utc>,
    /// Replacement action taken instead, set after creation
    #[serde(default)]
    pub replacement_action: Option<String>,
    /// Free-form notes, set after creation
    #[serde(default)]
    pub notes: Option<String>,
}

impl UrgeLog {
    /// Generate a fresh log id: creation time in millis plus a random suffix.
    pub fn new_id(now: DateTime<Utc>) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}", now.timestamp_millis(), &suffix[..8])
    }

    /// Whether the user resisted this urge.
    pub fn resisted(&self) -> bool {
        !self.acted_on
    }
}

/// Partial update applied to an existing [`UrgeLog`].
///
/// `id` and `timestamp` are immutable and deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct UrgeLogUpdate {
    /// Toggle or correct the outcome
    pub acted_on: Option<bool>,
    /// Record a replacement action taken instead
    pub replacement_action: Option<String>,
    /// Attach or replace notes
    pub notes: Option<String>,
}

// ============================================
// Settings
// ============================================

/// A user-defined consecutive-day resistance target.
///
/// Every active goal's `current_streak` increments whenever any resisted
/// urge is logged, regardless of category. The coupling is deliberate: the
/// recorded behavior is goal-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakGoal {
    /// Unique identifier
    pub id: String,
    /// Display title (e.g. "One week clean")
    pub title: String,
    /// Target length in days
    pub target_days: u32,
    /// Days accumulated so far
    pub current_streak: u32,
    /// Free-text category label
    pub category: String,
    /// Display color (hex or theme token)
    pub color: String,
    /// Inactive goals are kept but no longer incremented
    pub is_active: bool,
}

/// Singleton user settings document.
///
/// Created with defaults on first load, mutated via partial merge
/// ([`SettingsPatch`]), deleted only by a full data wipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Urge types the user is actively tracking (drives quick-select)
    #[serde(default)]
    pub selected_urges: Vec<String>,
    /// Streak goals
    #[serde(default)]
    pub streak_goals: Vec<StreakGoal>,
    /// Custom trigger values, most recent first
    #[serde(default)]
    pub recent_triggers: Vec<String>,
    /// Custom location values, most recent first
    #[serde(default)]
    pub recent_locations: Vec<String>,
    /// Custom emotion values, most recent first
    #[serde(default)]
    pub recent_emotions: Vec<String>,
    /// Whether daily reminders are enabled
    #[serde(default)]
    pub notifications_enabled: bool,
    /// Reminder time as "HH:MM", if set
    #[serde(default)]
    pub daily_reminder_time: Option<String>,
    /// UI theme name
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Whether the onboarding flow has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Replacement actions pinned by the user
    #[serde(default)]
    pub selected_replacement_actions: Vec<String>,
}

fn default_theme() -> String {
    "system".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_urges: Vec::new(),
            streak_goals: Vec::new(),
            recent_triggers: Vec::new(),
            recent_locations: Vec::new(),
            recent_emotions: Vec::new(),
            notifications_enabled: false,
            daily_reminder_time: None,
            theme: default_theme(),
            onboarding_completed: false,
            selected_replacement_actions: Vec::new(),
        }
    }
}

/// Partial settings update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub selected_urges: Option<Vec<String>>,
    pub streak_goals: Option<Vec<StreakGoal>>,
    pub notifications_enabled: Option<bool>,
    pub daily_reminder_time: Option<Option<String>>,
    pub theme: Option<String>,
    pub onboarding_completed: Option<bool>,
    pub selected_replacement_actions: Option<Vec<String>>,
}

impl UserSettings {
    /// Merge a partial update into this settings document.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.selected_urges {
            self.selected_urges = v;
        }
        if let Some(v) = patch.streak_goals {
            self.streak_goals = v;
        }
        if let Some(v) = patch.notifications_enabled {
            self.notifications_enabled = v;
        }
        if let Some(v) = patch.daily_reminder_time {
            self.daily_reminder_time = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.onboarding_completed {
            self.onboarding_completed = v;
        }
        if let Some(v) = patch.selected_replacement_actions {
            self.selected_replacement_actions = v;
        }
    }
}

// ============================================
// Replacement actions
// ============================================

/// How demanding a replacement action is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A suggested alternative activity from the catalog.
///
/// Entries are never deleted, only updated in place (usage counter and
/// effectiveness rating).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementAction {
    /// Unique identifier
    pub id: String,
    /// Short title (e.g. "Take a walk")
    pub title: String,
    /// One-line description
    pub description: String,
    /// Human-readable duration label (e.g. "5 min")
    pub duration: String,
    /// Category label (e.g. "physical", "mindful")
    pub category: String,
    /// Icon name for the UI
    pub icon: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// How many times the user has used this action
    #[serde(default)]
    pub times_used: u32,
    /// User rating 1-5, if rated
    #[serde(default)]
    pub effectiveness: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let now = Utc::now();
        let id = UrgeLog::new_id(now);
        let (millis, suffix) = id.split_once('-').expect("id has a dash");
        assert_eq!(millis, now.timestamp_millis().to_string());
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn test_log_round_trips_with_camel_case_keys() {
        let log = UrgeLog {
            id: "1700000000000-abcd1234".to_string(),
            urge: "scroll".to_string(),
            location: "couch".to_string(),
            trigger: "boredom".to_string(),
            emotion: Some("restless".to_string()),
            acted_on: false,
            timestamp: Utc::now(),
            replacement_action: None,
            notes: None,
        };

        let json = serde_json::to_value(&log).unwrap();
        assert!(json.get("actedOn").is_some());
        assert!(json.get("replacementAction").is_some());

        let back: UrgeLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_settings_patch_merges_only_present_fields() {
        let mut settings = UserSettings {
            theme: "dark".to_string(),
            notifications_enabled: true,
            ..Default::default()
        };

        settings.apply(SettingsPatch {
            theme: Some("light".to_string()),
            ..Default::default()
        });

        assert_eq!(settings.theme, "light");
        assert!(settings.notifications_enabled, "untouched field preserved");
    }

    #[test]
    fn test_settings_patch_can_clear_reminder_time() {
        let mut settings = UserSettings {
            daily_reminder_time: Some("08:30".to_string()),
            ..Default::default()
        };

        settings.apply(SettingsPatch {
            daily_reminder_time: Some(None),
            ..Default::default()
        });

        assert_eq!(settings.daily_reminder_time, None);
    }
}
