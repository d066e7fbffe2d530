//! Statistics engine
//!
//! Pure aggregation of urge logs into [`DashboardStats`]. Everything here
//! is a function of its inputs: callers pass `now` explicitly, so the same
//! log set and instant always produce identical output.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::analytics::streaks::compute_streak;
use crate::types::UrgeLog;

/// Frequency tables are truncated to this many entries.
const TOP_ENTRIES: usize = 10;

/// Recognized lookback presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsWindow {
    /// Trailing 7 days
    Week,
    /// Trailing 30 days
    Month,
    /// Trailing 365 days ("all")
    All,
}

impl StatsWindow {
    /// Window length in days.
    pub fn days(&self) -> i64 {
        match self {
            StatsWindow::Week => 7,
            StatsWindow::Month => 30,
            StatsWindow::All => 365,
        }
    }
}

impl std::str::FromStr for StatsWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(StatsWindow::Week),
            "month" => Ok(StatsWindow::Month),
            "all" => Ok(StatsWindow::All),
            _ => Err(format!("unknown stats window: {} (week, month, all)", s)),
        }
    }
}

/// One (label, count) entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    pub label: String,
    pub count: u32,
}

/// One calendar day of the weekly trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// ISO calendar date
    pub date: NaiveDate,
    /// Short day name ("Mon")
    pub day: String,
    /// Logs recorded on this day
    pub count: u32,
}

/// Derived dashboard metrics; recomputed on every query, never persisted
/// on its own (only as the snapshot inside an export).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Logs in the window
    pub total_urges: u32,
    /// Logs in the window with `acted_on == false`
    pub urges_resisted: u32,
    /// Rounded percentage, 0 when the window is empty
    pub success_rate: u32,
    /// Top triggers, count-descending, blanks excluded
    pub common_triggers: Vec<LabelCount>,
    /// Top urges, count-descending
    pub common_urges: Vec<LabelCount>,
    /// Top emotions, count-descending
    pub common_emotions: Vec<LabelCount>,
    /// Log count per local hour of day, always 24 entries
    pub hourly_heatmap: [u32; 24],
    /// Last 7 calendar days of the window, zero-filled
    pub weekly_trend: Vec<TrendPoint>,
    /// `total_urges / max(window_days, 1)`
    pub average_urges_per_day: f64,
    /// Consecutive-day resistance streak ending today or yesterday
    pub current_streak: u32,
    /// Longest resistance streak on record
    pub longest_streak: u32,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_urges: 0,
            urges_resisted: 0,
            success_rate: 0,
            common_triggers: Vec::new(),
            common_urges: Vec::new(),
            common_emotions: Vec::new(),
            hourly_heatmap: [0; 24],
            weekly_trend: Vec::new(),
            average_urges_per_day: 0.0,
            current_streak: 0,
            longest_streak: 0,
        }
    }
}

/// Aggregate `logs` over the trailing `window_days` ending at `now`.
///
/// Window metrics consider only logs with `timestamp` inside
/// `[now - window_days, now]` inclusive; streaks always consider the full
/// history. Storage order is irrelevant: chronology comes from timestamps.
pub fn compute_statistics(
    logs: &[UrgeLog],
    window_days: i64,
    now: DateTime<Local>,
) -> DashboardStats {
    let window_days = window_days.max(0);
    let window_start = now - Duration::days(window_days);

    let in_window: Vec<&UrgeLog> = logs
        .iter()
        .filter(|log| {
            let ts = log.timestamp.with_timezone(&Local);
            ts >= window_start && ts <= now
        })
        .collect();

    let total_urges = in_window.len() as u32;
    let urges_resisted = in_window.iter().filter(|log| log.resisted()).count() as u32;
    let success_rate = if total_urges == 0 {
        0
    } else {
        (urges_resisted as f64 / total_urges as f64 * 100.0).round() as u32
    };

    let common_triggers = frequency_table(in_window.iter().map(|log| log.trigger.as_str()));
    let common_urges = frequency_table(in_window.iter().map(|log| log.urge.as_str()));
    let common_emotions =
        frequency_table(in_window.iter().filter_map(|log| log.emotion.as_deref()));

    let mut hourly_heatmap = [0u32; 24];
    for log in &in_window {
        let hour = log.timestamp.with_timezone(&Local).hour() as usize;
        hourly_heatmap[hour] += 1;
    }

    let weekly_trend = weekly_trend(&in_window, window_start.date_naive(), now.date_naive());

    let average_urges_per_day = total_urges as f64 / window_days.max(1) as f64;

    let streaks = compute_streak(logs, now.date_naive());

    DashboardStats {
        total_urges,
        urges_resisted,
        success_rate,
        common_triggers,
        common_urges,
        common_emotions,
        hourly_heatmap,
        weekly_trend,
        average_urges_per_day,
        current_streak: streaks.current,
        longest_streak: streaks.longest,
    }
}

/// Group labels by exact string equality and rank by count.
///
/// Blank labels are skipped, ties keep first-encounter order (stable sort),
/// and the table is truncated to the top 10.
fn frequency_table<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut table: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for label in labels {
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&i) => table[i].count += 1,
            None => {
                index.insert(label, table.len());
                table.push(LabelCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(TOP_ENTRIES);
    table
}

/// Zero-filled per-day counts over `[start, end]`, truncated to the last 7
/// calendar days. Shorter windows return exactly the days they cover.
fn weekly_trend(in_window: &[&UrgeLog], start: NaiveDate, end: NaiveDate) -> Vec<TrendPoint> {
    if end < start {
        return Vec::new();
    }

    let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
    for log in in_window {
        let date = log.timestamp.with_timezone(&Local).date_naive();
        *per_day.entry(date).or_insert(0) += 1;
    }

    let mut trend = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        trend.push(TrendPoint {
            date: cursor,
            day: cursor.format("%a").to_string(),
            count: per_day.get(&cursor).copied().unwrap_or(0),
        });
        cursor += Duration::days(1);
    }

    if trend.len() > 7 {
        trend.drain(..trend.len() - 7);
    }
    trend
}
