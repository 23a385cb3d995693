//! Shared fixture builders for integration tests

use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

use shared::{Contest, Member, ProblemResult, TeamEntry};

pub fn member(id: u32, name: &str, clusters: &[(&str, f64)]) -> Member {
    Member {
        id,
        name: name.to_string(),
        active: true,
        cluster_scores: clusters
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
        topic_strengths: BTreeMap::new(),
    }
}

pub fn team(label: &str, member_ids: &[u32]) -> TeamEntry {
    TeamEntry {
        label: label.to_string(),
        member_ids: member_ids.to_vec(),
    }
}

/// `solved` problems go to `label` with 20-minute solve times; the rest
/// stay unsolved
pub fn results(label: &str, solved: u32, total: u32) -> Vec<ProblemResult> {
    (0..total)
        .map(|i| ProblemResult {
            problem_index: format!("{i}"),
            problem_name: format!("Problem {i}"),
            solved_by_team: (i < solved).then(|| label.to_string()),
            solve_time_minutes: (i < solved).then_some(20),
        })
        .collect()
}

pub fn contest(
    id: &str,
    name: &str,
    date: &str,
    total_problems: u32,
    teams: Vec<TeamEntry>,
    results: Vec<ProblemResult>,
) -> Contest {
    Contest {
        id: id.to_string(),
        name: name.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date"),
        duration_minutes: 300,
        total_problems,
        teams,
        results,
        notes: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// A six-member roster with distinct specializations
pub fn standard_roster() -> Vec<Member> {
    vec![
        member(1, "Alice", &[("graphs", 0.9), ("dp_math", 0.3), ("impl_ds", 0.4)]),
        member(2, "Bob", &[("graphs", 0.2), ("dp_math", 0.8), ("impl_ds", 0.5)]),
        member(3, "Carol", &[("graphs", 0.4), ("dp_math", 0.4), ("impl_ds", 0.9)]),
        member(4, "Dave", &[("graphs", 0.6), ("dp_math", 0.5), ("impl_ds", 0.3)]),
        member(5, "Erin", &[("graphs", 0.3), ("dp_math", 0.7), ("impl_ds", 0.6)]),
        member(6, "Frank", &[("graphs", 0.5), ("dp_math", 0.2), ("impl_ds", 0.7)]),
    ]
}
