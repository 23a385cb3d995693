//! Trend aggregator
//!
//! Rolls contest history into overall and recent-window statistics for
//! drift detection, plus the per-combo timeline projection. Purely
//! descriptive; no suggestion or ranking logic lives here.

use std::collections::BTreeMap;

use crate::core::combo::ComboKey;
use crate::types::{ComboPerformance, ComboTrendPoint, TimelineResponse, TrendPoint, TrendsResponse};
use shared::{Contest, EngineResult};

/// Contests in the recency window compared against the all-time averages
const RECENT_WINDOW: usize = 5;

/// Roll the full contest history into trend statistics, date ascending
pub fn contest_trends(contests: &[Contest]) -> EngineResult<TrendsResponse> {
    let mut ordered: Vec<&Contest> = contests.iter().collect();
    ordered.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));

    let mut points: Vec<TrendPoint> = Vec::with_capacity(ordered.len());
    for contest in ordered {
        contest.check_integrity()?;

        let mut solve_counts_by_team: BTreeMap<String, u32> = BTreeMap::new();
        let mut times_by_team: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        let mut all_times: Vec<u32> = Vec::new();

        for result in contest.solved_results() {
            let label = result.solved_by_team.clone().unwrap_or_default();
            *solve_counts_by_team.entry(label.clone()).or_insert(0) += 1;
            if let Some(minutes) = result.solve_time_minutes {
                times_by_team.entry(label).or_default().push(minutes);
                all_times.push(minutes);
            }
        }

        let avg_solve_time_minutes = mean_u32(&all_times);
        let avg_solve_times_by_team = times_by_team
            .into_iter()
            .filter_map(|(label, times)| mean_u32(&times).map(|avg| (label, avg)))
            .collect();

        points.push(TrendPoint {
            contest_id: contest.id.clone(),
            contest_name: contest.name.clone(),
            date: contest.date,
            total_problems: contest.total_problems,
            solved_count: contest.solved_count(),
            solve_counts_by_team,
            avg_solve_time_minutes,
            avg_solve_times_by_team,
        });
    }

    let recent_start = points.len().saturating_sub(RECENT_WINDOW);
    let recent = &points[recent_start..];

    Ok(TrendsResponse {
        overall_avg_solves: mean_solves(&points),
        overall_avg_time: mean_times(&points),
        recent_avg_solves: mean_solves(recent),
        recent_avg_time: mean_times(recent),
        points,
    })
}

/// Project each combo's chronological performance series
pub fn combo_timeline(performances: &BTreeMap<ComboKey, ComboPerformance>) -> TimelineResponse {
    let combos: BTreeMap<ComboKey, Vec<ComboTrendPoint>> = performances
        .iter()
        .map(|(key, perf)| (key.clone(), perf.trend.clone()))
        .collect();
    TimelineResponse { combos }
}

fn mean_u32(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64)
}

fn mean_solves(points: &[TrendPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| f64::from(p.solved_count)).sum::<f64>() / points.len() as f64
}

/// Mean of the per-contest average solve times, skipping contests with no
/// timed solves
fn mean_times(points: &[TrendPoint]) -> Option<f64> {
    let times: Vec<f64> = points
        .iter()
        .filter_map(|p| p.avg_solve_time_minutes)
        .collect();
    if times.is_empty() {
        return None;
    }
    Some(times.iter().sum::<f64>() / times.len() as f64)
}
