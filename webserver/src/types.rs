//! Derived shapes computed by the engine and the request bodies accepted
//! by the HTTP surface
//!
//! Everything here is recomputed fresh from the `Member`/`Contest` snapshot
//! on every query; nothing is cached between calls. All maps are ordered so
//! repeated runs over unchanged input serialize byte-identically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::combo::ComboKey;
use shared::{ProblemResult, TeamEntry};

/// Per-cluster coverage of a member set: the strongest individual score,
/// not the sum
pub type CoverageProfile = BTreeMap<String, f64>;

/// A single contest as seen by one combo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestSnapshot {
    pub contest_id: String,
    pub contest_name: String,
    pub date: NaiveDate,
    pub solved: u32,
    pub total: u32,
    pub solve_rate: f64,
}

/// One point in a combo's chronological performance series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboTrendPoint {
    pub contest_id: String,
    pub contest_name: String,
    pub date: NaiveDate,
    pub solve_rate: f64,
    pub problems_solved: u32,
    pub total_problems: u32,
}

/// Aggregate performance of one fielded lineup across its contest history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboPerformance {
    pub combo_key: ComboKey,
    pub member_ids: Vec<u32>,
    pub member_names: Vec<String>,
    pub team_size: usize,
    pub contests_played: u32,
    pub total_problems_faced: u32,
    pub total_solved: u32,
    pub solve_rate: f64,
    pub avg_solve_time: Option<f64>,
    pub best_contest: Option<ContestSnapshot>,
    pub worst_contest: Option<ContestSnapshot>,
    pub trend: Vec<ComboTrendPoint>,
}

/// One row of the rankings view; rank is positional, recomputed per query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRanking {
    pub rank: usize,
    pub combo: ComboPerformance,
    /// Chronological solve-rate series, for sparkline display
    pub trend: Vec<f64>,
    /// Recent-window average solve rate minus the all-time average.
    /// Display-only; never part of the ranking order.
    pub trend_delta: f64,
}

/// Why the suggester picked the lineup it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionReason {
    /// An untested combination remains; field it to grow coverage
    Coverage,
    /// Everything has been tried; re-validate the least-sampled lineup
    RetestLowSample,
}

impl fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionReason::Coverage => write!(f, "coverage"),
            SuggestionReason::RetestLowSample => write!(f, "retest-low-sample"),
        }
    }
}

/// One team inside a rotation suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTeam {
    pub member_ids: Vec<u32>,
    pub member_names: Vec<String>,
    pub coverage: CoverageProfile,
}

/// The next lineup(s) to field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationSuggestion {
    pub teams: Vec<SuggestedTeam>,
    pub reason: SuggestionReason,
    pub tested_trios: u64,
    pub total_possible_trios: u64,
    pub active_count: usize,
}

/// A member's full skill profile, echoed so callers can render detail
/// without a second query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: u32,
    pub name: String,
    pub cluster_scores: BTreeMap<String, f64>,
}

/// Two capacity-bounded teams plus the bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeResponse {
    pub team_a: Vec<u32>,
    pub team_b: Vec<u32>,
    pub alternates: Vec<u32>,
    /// The weaker team's total coverage, the quantity the split maximizes
    pub score: f64,
    pub team_a_coverage: CoverageProfile,
    pub team_b_coverage: CoverageProfile,
    pub profiles: Vec<MemberProfile>,
}

/// Whole-history statistics for one contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub contest_id: String,
    pub contest_name: String,
    pub date: NaiveDate,
    pub total_problems: u32,
    pub solved_count: u32,
    pub solve_counts_by_team: BTreeMap<String, u32>,
    pub avg_solve_time_minutes: Option<f64>,
    pub avg_solve_times_by_team: BTreeMap<String, f64>,
}

/// Contest history rolled into overall and recent-window statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub points: Vec<TrendPoint>,
    pub overall_avg_solves: f64,
    pub overall_avg_time: Option<f64>,
    pub recent_avg_solves: f64,
    pub recent_avg_time: Option<f64>,
}

/// Per-combo performance series, for line-chart visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub combos: BTreeMap<ComboKey, Vec<ComboTrendPoint>>,
}

// Request bodies

#[derive(Debug, Clone, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    #[serde(default)]
    pub cluster_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub topic_strengths: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActiveUpdate {
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContestCreate {
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub total_problems: u32,
    pub teams: Vec<TeamEntry>,
    pub results: Vec<ProblemResult>,
    #[serde(default)]
    pub notes: String,
}
