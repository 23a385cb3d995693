//! Skill-cluster coverage of a member set
//!
//! Coverage answers "does this team have someone strong here": per cluster
//! it is the maximum individual score among the set, never the sum, so one
//! strong specialist fully covers a cluster.

use std::collections::BTreeSet;

use crate::types::CoverageProfile;
use shared::Member;

/// Every cluster id that appears in any member's profile.
///
/// Derived from the roster rather than hardcoded, so coverage maps always
/// carry the same key set (including explicit zeros) across one snapshot.
pub fn cluster_universe(members: &[Member]) -> BTreeSet<String> {
    members
        .iter()
        .flat_map(|m| m.cluster_scores.keys().cloned())
        .collect()
}

/// Per-cluster coverage of the given member ids, against the full roster's
/// cluster universe
pub fn team_coverage(member_ids: &[u32], members: &[Member]) -> CoverageProfile {
    let universe = cluster_universe(members);
    let team: Vec<&Member> = members
        .iter()
        .filter(|m| member_ids.contains(&m.id))
        .collect();

    universe
        .into_iter()
        .map(|cluster| {
            let best = team
                .iter()
                .filter_map(|m| m.cluster_scores.get(&cluster))
                .cloned()
                .fold(0.0, f64::max);
            (cluster, best)
        })
        .collect()
}

/// Total coverage across clusters, the scalar the optimizers compare
pub fn coverage_sum(profile: &CoverageProfile) -> f64 {
    profile.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn member(id: u32, name: &str, scores: &[(&str, f64)]) -> Member {
        Member {
            id,
            name: name.to_string(),
            active: true,
            cluster_scores: scores
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            topic_strengths: BTreeMap::new(),
        }
    }

    #[test]
    fn coverage_takes_the_max_not_the_sum() {
        let roster = vec![
            member(1, "Alice", &[("graphs", 0.9), ("dp_math", 0.1)]),
            member(2, "Bob", &[("graphs", 0.4), ("dp_math", 0.6)]),
        ];

        let coverage = team_coverage(&[1, 2], &roster);
        assert_eq!(coverage.get("graphs"), Some(&0.9));
        assert_eq!(coverage.get("dp_math"), Some(&0.6));
        assert!((coverage_sum(&coverage) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn missing_clusters_show_as_zero() {
        let roster = vec![
            member(1, "Alice", &[("graphs", 0.9)]),
            member(2, "Bob", &[("impl_ds", 0.7)]),
        ];

        // Alice alone still reports impl_ds, at zero
        let coverage = team_coverage(&[1], &roster);
        assert_eq!(coverage.get("impl_ds"), Some(&0.0));
        assert_eq!(coverage.len(), 2);
    }

    #[test]
    fn empty_team_covers_nothing() {
        let roster = vec![member(1, "Alice", &[("graphs", 0.9)])];
        let coverage = team_coverage(&[], &roster);
        assert_eq!(coverage.get("graphs"), Some(&0.0));
    }
}
