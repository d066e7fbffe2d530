//! Insight generator
//!
//! Rule-based observations over [`DashboardStats`]. Rules are independent
//! and additive: each contributes at most one line, in a fixed order, with
//! no inter-rule suppression. An empty window produces no insights.

use rand::Rng;

use crate::analytics::stats::DashboardStats;
use crate::catalog::MOTIVATIONAL_QUOTES;

/// Generate the ordered insight list for a stats snapshot.
pub fn generate_insights(stats: &DashboardStats) -> Vec<String> {
    let mut insights = Vec::new();
    if stats.total_urges == 0 {
        return insights;
    }

    insights.push(success_rate_insight(stats.success_rate));

    if let Some(line) = peak_hour_insight(&stats.hourly_heatmap) {
        insights.push(line);
    }

    if let Some(top) = stats.common_triggers.first() {
        let share =
            (top.count as f64 / stats.total_urges as f64 * 100.0).round() as u32;
        insights.push(format!(
            "\"{}\" is behind {}% of your logged urges. Knowing the trigger is half the battle.",
            top.label, share
        ));
    }

    if let Some(line) = streak_insight(stats.current_streak) {
        insights.push(line);
    }

    if let Some(line) = volume_insight(stats.average_urges_per_day) {
        insights.push(line);
    }

    insights
}

fn success_rate_insight(rate: u32) -> String {
    if rate >= 80 {
        format!(
            "Outstanding: you resisted {}% of urges this period. Keep doing what you're doing.",
            rate
        )
    } else if rate >= 60 {
        format!(
            "Strong progress: a {}% resistance rate means you win far more than you lose.",
            rate
        )
    } else if rate >= 40 {
        format!(
            "You're resisting {}% of urges. Try reaching for a replacement action a little sooner.",
            rate
        )
    } else if rate >= 20 {
        format!(
            "A {}% resistance rate leaves room to grow. Pausing before acting is a skill that builds.",
            rate
        )
    } else {
        format!(
            "Tough stretch: {}% resisted. Every urge you log is still a step toward understanding them.",
            rate
        )
    }
}

fn peak_hour_insight(heatmap: &[u32; 24]) -> Option<String> {
    // Ties resolve to the lowest hour
    let (peak_hour, peak_count) = heatmap
        .iter()
        .enumerate()
        .fold((0usize, 0u32), |(best_h, best_c), (h, &c)| {
            if c > best_c {
                (h, c)
            } else {
                (best_h, best_c)
            }
        });

    if peak_count == 0 {
        return None;
    }

    let bucket = match peak_hour {
        6..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    };

    Some(format!(
        "Your urges peak in the {} (around {}:00). Plan something for that time of day.",
        bucket, peak_hour
    ))
}

fn streak_insight(current_streak: u32) -> Option<String> {
    if current_streak >= 7 {
        Some(format!(
            "A {}-day resistance streak. That's over a week of wins in a row.",
            current_streak
        ))
    } else if current_streak >= 3 {
        Some(format!(
            "You're {} days into a resistance streak. Three days is how habits start.",
            current_streak
        ))
    } else {
        None
    }
}

fn volume_insight(average_per_day: f64) -> Option<String> {
    if average_per_day > 10.0 {
        Some(
            "You're logging more than 10 urges a day. That awareness is useful; consider reducing exposure to your top triggers."
                .to_string(),
        )
    } else if average_per_day < 2.0 {
        Some(
            "Fewer than 2 urges a day logged. Either things are calm, or some urges are slipping by unrecorded."
                .to_string(),
        )
    } else {
        None
    }
}

/// Pick a motivational quote uniformly at random.
///
/// UI flavor only; callers inject the RNG so tests can seed it.
pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES[rng.gen_range(0..MOTIVATIONAL_QUOTES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::stats::LabelCount;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base_stats() -> DashboardStats {
        DashboardStats {
            total_urges: 10,
            urges_resisted: 7,
            success_rate: 70,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_stats_yield_no_insights() {
        assert!(generate_insights(&DashboardStats::default()).is_empty());
    }

    #[test]
    fn test_success_rate_bands() {
        assert!(success_rate_insight(95).contains("Outstanding"));
        assert!(success_rate_insight(80).contains("Outstanding"));
        assert!(success_rate_insight(79).contains("Strong progress"));
        assert!(success_rate_insight(59).contains("replacement action"));
        assert!(success_rate_insight(39).contains("room to grow"));
        assert!(success_rate_insight(19).contains("Tough stretch"));
    }

    #[test]
    fn test_peak_hour_ties_pick_lowest_and_bucket_names() {
        let mut heatmap = [0u32; 24];
        heatmap[9] = 3;
        heatmap[21] = 3;
        let line = peak_hour_insight(&heatmap).unwrap();
        assert!(line.contains("morning"));
        assert!(line.contains("9:00"));

        let mut evening = [0u32; 24];
        evening[18] = 1;
        assert!(peak_hour_insight(&evening).unwrap().contains("evening"));

        let mut night = [0u32; 24];
        night[2] = 1;
        assert!(peak_hour_insight(&night).unwrap().contains("night"));

        assert_eq!(peak_hour_insight(&[0; 24]), None);
    }

    #[test]
    fn test_rules_are_additive_and_ordered() {
        let mut stats = base_stats();
        stats.hourly_heatmap[14] = 10;
        stats.common_triggers = vec![LabelCount {
            label: "stress".to_string(),
            count: 5,
        }];
        stats.current_streak = 8;
        stats.average_urges_per_day = 12.0;

        let insights = generate_insights(&stats);
        assert_eq!(insights.len(), 5);
        assert!(insights[0].contains("70%"));
        assert!(insights[1].contains("afternoon"));
        assert!(insights[2].contains("stress"));
        assert!(insights[2].contains("50%"));
        assert!(insights[3].contains("8-day"));
        assert!(insights[4].contains("more than 10"));
    }

    #[test]
    fn test_streak_tiers() {
        assert_eq!(streak_insight(2), None);
        assert!(streak_insight(3).unwrap().contains("3 days"));
        assert!(streak_insight(7).unwrap().contains("7-day"));
    }

    #[test]
    fn test_volume_middle_band_is_silent() {
        assert_eq!(volume_insight(5.0), None);
        assert!(volume_insight(11.0).is_some());
        assert!(volume_insight(1.0).is_some());
    }

    #[test]
    fn test_quote_picker_is_seedable() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(pick_quote(&mut a), pick_quote(&mut b));
    }

    #[test]
    fn test_quote_picker_draws_from_the_fixed_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let quote = pick_quote(&mut rng);
            assert!(MOTIVATIONAL_QUOTES.contains(&quote));
        }
    }
}
