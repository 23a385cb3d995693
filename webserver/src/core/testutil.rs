//! Builders shared by the core module tests

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
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date"),
        duration_minutes: 300,
        total_problems,
        teams,
        results,
        notes: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}
