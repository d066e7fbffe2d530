//! Static seed data
//!
//! Default triggers, locations, and emotions seed the settings recency
//! lists; the replacement-action catalog seeds the action store on first
//! run. Motivational quotes are UI flavor only and play no part in insight
//! correctness.

use crate::types::{Difficulty, ReplacementAction};

/// Default trigger values offered before the user has created any.
pub const DEFAULT_TRIGGERS: &[&str] = &[
    "Stress",
    "Boredom",
    "Loneliness",
    "Fatigue",
    "Social pressure",
    "Seeing others do it",
    "Notification",
    "Argument",
];

/// Default location values offered before the user has created any.
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Home",
    "Work",
    "Commute",
    "Bed",
    "Kitchen",
    "Out with friends",
];

/// Default emotion values offered before the user has created any.
pub const DEFAULT_EMOTIONS: &[&str] = &[
    "Anxious",
    "Bored",
    "Sad",
    "Angry",
    "Tired",
    "Restless",
    "Excited",
];

/// Fixed quote list for the dashboard header.
pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "Every urge you resist makes the next one easier.",
    "You are not your impulses.",
    "Progress, not perfection.",
    "The craving will pass whether you act on it or not.",
    "Small wins compound.",
    "Notice the urge. Name it. Let it go.",
    "One day at a time.",
    "Discomfort is temporary; the streak is yours to keep.",
];

/// Built-in replacement-action catalog, seeded on first run.
pub fn default_replacement_actions() -> Vec<ReplacementAction> {
    let entry = |id: &str,
                 title: &str,
                 description: &str,
                 duration: &str,
                 category: &str,
                 icon: &str,
                 difficulty: Difficulty| ReplacementAction {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        category: category.to_string(),
        icon: icon.to_string(),
        difficulty,
        times_used: 0,
        effectiveness: None,
    };

    vec![
        entry(
            "walk",
            "Take a walk",
            "Step outside and walk around the block",
            "10 min",
            "physical",
            "footprints",
            Difficulty::Easy,
        ),
        entry(
            "breathe",
            "Deep breathing",
            "Four counts in, hold, four counts out",
            "2 min",
            "mindful",
            "wind",
            Difficulty::Easy,
        ),
        entry(
            "water",
            "Drink a glass of water",
            "Slowly, paying attention to it",
            "1 min",
            "physical",
            "droplet",
            Difficulty::Easy,
        ),
        entry(
            "journal",
            "Write it down",
            "Describe the urge and what set it off",
            "5 min",
            "mindful",
            "pencil",
            Difficulty::Medium,
        ),
        entry(
            "pushups",
            "Do twenty push-ups",
            "Burn the restlessness off",
            "3 min",
            "physical",
            "dumbbell",
            Difficulty::Medium,
        ),
        entry(
            "call",
            "Call someone",
            "Reach out to a friend or family member",
            "15 min",
            "social",
            "phone",
            Difficulty::Hard,
        ),
        entry(
            "shower",
            "Cold shower",
            "Thirty seconds of cold water resets the moment",
            "5 min",
            "physical",
            "shower",
            Difficulty::Hard,
        ),
        entry(
            "meditate",
            "Short meditation",
            "Sit with the feeling until it fades",
            "10 min",
            "mindful",
            "lotus",
            Difficulty::Medium,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let actions = default_replacement_actions();
        let ids: HashSet<_> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), actions.len());
    }

    #[test]
    fn test_catalog_entries_start_unused() {
        for action in default_replacement_actions() {
            assert_eq!(action.times_used, 0);
            assert_eq!(action.effectiveness, None);
        }
    }

    #[test]
    fn test_quote_list_is_nonempty() {
        assert!(!MOTIVATIONAL_QUOTES.is_empty());
    }
}
