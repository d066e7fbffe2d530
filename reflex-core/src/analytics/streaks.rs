//! Streak calculator
//!
//! A streak is a run of consecutive calendar days each containing at least
//! one resisted log. Streaks always operate on full history, independent of
//! the statistics window.

use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate};

use crate::types::UrgeLog;

/// Current and longest consecutive-day resistance streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Streak ending today or yesterday; 0 if the streak is broken
    pub current: u32,
    /// Longest streak anywhere in history
    pub longest: u32,
}

/// Compute resistance streaks from the full log history.
///
/// Multiple resisted logs on the same calendar day count as one day of
/// presence; the result depends only on log dates and `today`.
pub fn compute_streak(logs: &[UrgeLog], today: NaiveDate) -> StreakSummary {
    // Dedup by local calendar day before any gap comparison
    let days: BTreeSet<NaiveDate> = logs
        .iter()
        .filter(|log| log.resisted())
        .map(|log| log.timestamp.with_timezone(&Local).date_naive())
        .collect();

    let Some(&newest) = days.iter().next_back() else {
        return StreakSummary::default();
    };

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in &days {
        run = match prev {
            Some(p) if (day - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    // The running streak only counts as current while it is still alive
    let mut current = 0u32;
    if (today - newest).num_days() <= 1 {
        let mut cursor = newest;
        while days.contains(&cursor) {
            current += 1;
            cursor -= Duration::days(1);
        }
    }

    StreakSummary { current, longest }
}
