//! Domain records exchanged with the roster/contest-logging collaborators
//!
//! These are the immutable inputs to the rotation and composition engine.
//! All mutation (roster edits, contest logging) happens upstream; the engine
//! only ever reads snapshots of these records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::errors::{EngineError, EngineResult};

/// A roster member with per-cluster and per-topic skill scores in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub cluster_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub topic_strengths: BTreeMap<String, f64>,
}

fn default_active() -> bool {
    true
}

impl Member {
    /// Average score across all skill clusters
    pub fn mean_cluster_score(&self) -> f64 {
        if self.cluster_scores.is_empty() {
            return 0.0;
        }
        self.cluster_scores.values().sum::<f64>() / self.cluster_scores.len() as f64
    }

    /// The member's single strongest cluster score
    pub fn peak_cluster_score(&self) -> f64 {
        self.cluster_scores.values().cloned().fold(0.0, f64::max)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// One fielded team within a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub label: String,
    pub member_ids: Vec<u32>,
}

/// Outcome of a single problem within a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemResult {
    pub problem_index: String,
    #[serde(default)]
    pub problem_name: String,
    #[serde(default)]
    pub solved_by_team: Option<String>,
    #[serde(default)]
    pub solve_time_minutes: Option<u32>,
}

/// A logged virtual contest with the teams that were fielded and the
/// per-problem results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub total_problems: u32,
    pub teams: Vec<TeamEntry>,
    pub results: Vec<ProblemResult>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// Results that were solved by some team
    pub fn solved_results(&self) -> impl Iterator<Item = &ProblemResult> {
        self.results.iter().filter(|r| r.solved_by_team.is_some())
    }

    /// Number of problems solved by any team
    pub fn solved_count(&self) -> u32 {
        self.solved_results().count() as u32
    }

    /// Verify the contest's internal invariants: every `solved_by_team`
    /// label must name one of the contest's teams, and member ids must be
    /// pairwise disjoint across teams.
    ///
    /// Violations are upstream data corruption and fail the whole
    /// computation rather than being silently dropped.
    pub fn check_integrity(&self) -> EngineResult<()> {
        let labels: HashSet<&str> = self.teams.iter().map(|t| t.label.as_str()).collect();

        for result in &self.results {
            if let Some(label) = &result.solved_by_team {
                if !labels.contains(label.as_str()) {
                    return Err(EngineError::DataIntegrity {
                        contest_id: self.id.clone(),
                        detail: format!(
                            "problem {} solved by unknown team label '{}'",
                            result.problem_index, label
                        ),
                    });
                }
            }
        }

        let mut seen: HashSet<u32> = HashSet::new();
        for team in &self.teams {
            for member_id in &team.member_ids {
                if !seen.insert(*member_id) {
                    return Err(EngineError::DataIntegrity {
                        contest_id: self.id.clone(),
                        detail: format!("member {member_id} appears in more than one team"),
                    });
                }
            }
        }

        Ok(())
    }
}
