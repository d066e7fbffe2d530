//! Analytics for reflex
//!
//! Pure computations over urge logs:
//! - [`stats`]: the statistics engine producing [`DashboardStats`]
//! - [`streaks`]: consecutive-day resistance streaks
//! - [`insights`]: rule-based observations and the quote picker
//!
//! Nothing here touches storage; callers load logs and pass them in along
//! with an explicit `now`, which keeps every function deterministic and
//! safe to call repeatedly.

pub mod insights;
pub mod stats;
pub mod streaks;

pub use insights::{generate_insights, pick_quote};
pub use stats::{compute_statistics, DashboardStats, LabelCount, StatsWindow, TrendPoint};
pub use streaks::{compute_streak, StreakSummary};
