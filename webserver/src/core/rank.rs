//! Deterministic combo ranking
//!
//! Rank is positional and recomputed on every query, never stored. The
//! sort key chain makes the order a total order: solve rate descending,
//! then contests played descending, then canonical key ascending.

use std::collections::BTreeMap;

use crate::core::combo::ComboKey;
use crate::types::{ComboPerformance, ComboRanking};

/// How many recent trend points feed the display-only trend delta
const TREND_WINDOW: usize = 3;

/// Rank combos of the requested team size (2 for duos, 3 for trios)
pub fn rank_combos(
    performances: &BTreeMap<ComboKey, ComboPerformance>,
    team_size: usize,
) -> Vec<ComboRanking> {
    let mut combos: Vec<&ComboPerformance> = performances
        .values()
        .filter(|p| p.team_size == team_size)
        .collect();

    combos.sort_by(|a, b| {
        b.solve_rate
            .total_cmp(&a.solve_rate)
            .then_with(|| b.contests_played.cmp(&a.contests_played))
            .then_with(|| a.combo_key.cmp(&b.combo_key))
    });

    combos
        .into_iter()
        .enumerate()
        .map(|(idx, combo)| {
            let trend: Vec<f64> = combo.trend.iter().map(|p| p.solve_rate).collect();
            ComboRanking {
                rank: idx + 1,
                trend_delta: trend_delta(&trend, combo.solve_rate),
                trend,
                combo: combo.clone(),
            }
        })
        .collect()
}

/// Recent-window average solve rate minus the all-time average
fn trend_delta(trend: &[f64], all_time_rate: f64) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }
    let window = &trend[trend.len().saturating_sub(TREND_WINDOW)..];
    let recent_avg = window.iter().sum::<f64>() / window.len() as f64;
    recent_avg - all_time_rate
}
