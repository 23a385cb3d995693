//! Coverage optimizer: two-way roster split
//!
//! Partitions the roster into two teams of at most 3 plus alternates,
//! maximizing the weaker team's total cluster coverage. Greedy alternating
//! assignment, recomputed after every placement. This is a heuristic, not
//! a global optimum: guaranteeing the best split means searching
//! C(n,3)*C(n-3,3) partitions, which stays unnecessary at roster sizes
//! this engine expects (<= 12).

use crate::core::coverage::{coverage_sum, team_coverage};
use crate::types::{ComposeResponse, MemberProfile};
use shared::Member;

/// Maximum members per contest team
const TEAM_CAPACITY: usize = 3;

/// Suggest a balanced two-team split of the roster.
///
/// Members are placed strongest-first (highest single cluster score, ties
/// by ascending id) onto whichever non-full team currently has the lower
/// total coverage, team A on exact ties. An empty roster yields an empty
/// response; that is an idle state, not an error.
pub fn compose_split(members: &[Member]) -> ComposeResponse {
    let mut order: Vec<&Member> = members.iter().collect();
    order.sort_by(|a, b| {
        b.peak_cluster_score()
            .total_cmp(&a.peak_cluster_score())
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut team_a: Vec<u32> = Vec::new();
    let mut team_b: Vec<u32> = Vec::new();
    let mut alternates: Vec<u32> = Vec::new();

    for member in order {
        let a_open = team_a.len() < TEAM_CAPACITY;
        let b_open = team_b.len() < TEAM_CAPACITY;
        let a_sum = coverage_sum(&team_coverage(&team_a, members));
        let b_sum = coverage_sum(&team_coverage(&team_b, members));

        match (a_open, b_open) {
            (true, true) => {
                if b_sum < a_sum {
                    team_b.push(member.id);
                } else {
                    team_a.push(member.id);
                }
            }
            (true, false) => team_a.push(member.id),
            (false, true) => team_b.push(member.id),
            (false, false) => alternates.push(member.id),
        }
    }

    team_a.sort_unstable();
    team_b.sort_unstable();
    alternates.sort_unstable();

    let team_a_coverage = team_coverage(&team_a, members);
    let team_b_coverage = team_coverage(&team_b, members);
    let score = coverage_sum(&team_a_coverage).min(coverage_sum(&team_b_coverage));

    ComposeResponse {
        score,
        team_a,
        team_b,
        alternates,
        team_a_coverage,
        team_b_coverage,
        profiles: members
            .iter()
            .map(|m| MemberProfile {
                id: m.id,
                name: m.name.clone(),
                cluster_scores: m.cluster_scores.clone(),
            })
            .collect(),
    }
}
