//! Rotation suggester
//!
//! Recommends which lineup(s) to field next. Untested trios win until the
//! whole C(n,3) space is covered, then the least-sampled lineup gets
//! re-validated. Stateless per call; every tie-break is deterministic.

use std::collections::BTreeMap;

use crate::core::combo::{combinations, count_combinations, ComboKey};
use crate::core::coverage::team_coverage;
use crate::types::{ComboPerformance, RotationSuggestion, SuggestedTeam, SuggestionReason};
use shared::{EngineError, EngineResult, Member};

/// Suggest the next lineup(s) to field from the active roster.
///
/// Fewer than 2 active members cannot form any team and is an error;
/// exactly 2 suggests the lone duo. Otherwise one trio is chosen (untested
/// first, then least-sampled), and leftover actives form a second
/// same-size-or-smaller team where numbers allow, the rest sitting out.
pub fn suggest_rotation(
    members: &[Member],
    performances: &BTreeMap<ComboKey, ComboPerformance>,
) -> EngineResult<RotationSuggestion> {
    let active: Vec<&Member> = members.iter().filter(|m| m.active).collect();
    let active_ids: Vec<u32> = active.iter().map(|m| m.id).collect();
    let n = active.len();

    if n < 2 {
        return Err(EngineError::InsufficientRoster { active: n });
    }

    let trios = keyed_candidates(&active_ids, 3)?;
    let tested_trios = trios
        .iter()
        .filter(|(_, key)| performances.contains_key(key))
        .count() as u64;
    let total_possible_trios = count_combinations(n, 3);

    if n == 2 {
        // Only one lineup exists; the reason still reflects whether it has
        // been fielded before.
        let (duo, key) = keyed_candidates(&active_ids, 2)?.remove(0);
        let reason = if performances.contains_key(&key) {
            SuggestionReason::RetestLowSample
        } else {
            SuggestionReason::Coverage
        };
        return Ok(RotationSuggestion {
            teams: vec![build_team(&duo, members)],
            reason,
            tested_trios,
            total_possible_trios,
            active_count: n,
        });
    }

    let (first, first_untested) = pick_trio(&trios, performances, members);
    let reason = if first_untested {
        SuggestionReason::Coverage
    } else {
        SuggestionReason::RetestLowSample
    };

    let mut teams = vec![build_team(&first, members)];

    let remainder: Vec<u32> = active_ids.iter().copied().filter(|id| !first.contains(id)).collect();
    match remainder.len() {
        0 | 1 => {}
        2 => teams.push(build_team(&remainder, members)),
        _ => {
            let candidates = keyed_candidates(&remainder, 3)?;
            let (second, _) = pick_trio(&candidates, performances, members);
            teams.push(build_team(&second, members));
        }
    }

    Ok(RotationSuggestion {
        teams,
        reason,
        tested_trios,
        total_possible_trios,
        active_count: n,
    })
}

/// Every size-`k` subset of the pool, paired with its canonical key
fn keyed_candidates(pool: &[u32], k: usize) -> EngineResult<Vec<(Vec<u32>, ComboKey)>> {
    combinations(pool, k)
        .map(|ids| {
            let key = ComboKey::canonicalize(&ids)?;
            Ok((ids, key))
        })
        .collect()
}

/// Choose one trio from the candidates.
///
/// Untested candidates win, ranked by on-paper strength (sum of members'
/// mean cluster scores) descending, then key ascending. If everything has
/// been tested: fewest contests played, then lowest solve rate (weak but
/// undersampled lineups deserve re-validation first), then key ascending.
/// Returns the trio and whether it was untested.
fn pick_trio(
    candidates: &[(Vec<u32>, ComboKey)],
    performances: &BTreeMap<ComboKey, ComboPerformance>,
    members: &[Member],
) -> (Vec<u32>, bool) {
    let untested_best = candidates
        .iter()
        .filter(|(_, key)| !performances.contains_key(key))
        .min_by(|(a_ids, a_key), (b_ids, b_key)| {
            paper_score(b_ids, members)
                .total_cmp(&paper_score(a_ids, members))
                .then_with(|| a_key.cmp(b_key))
        });

    if let Some((ids, _)) = untested_best {
        return (ids.clone(), true);
    }

    let retest = candidates
        .iter()
        .filter_map(|(ids, key)| performances.get(key).map(|perf| (ids, key, perf)))
        .min_by(|(_, a_key, a), (_, b_key, b)| {
            a.contests_played
                .cmp(&b.contests_played)
                .then_with(|| a.solve_rate.total_cmp(&b.solve_rate))
                .then_with(|| a_key.cmp(b_key))
        });

    match retest {
        Some((ids, _, _)) => (ids.clone(), false),
        // Unreachable for non-empty candidates, but never panic over it
        None => (candidates[0].0.clone(), false),
    }
}

/// Sum of the members' average individual cluster scores
fn paper_score(member_ids: &[u32], members: &[Member]) -> f64 {
    members
        .iter()
        .filter(|m| member_ids.contains(&m.id))
        .map(Member::mean_cluster_score)
        .sum()
}

fn build_team(member_ids: &[u32], members: &[Member]) -> SuggestedTeam {
    let member_names = member_ids
        .iter()
        .map(|id| {
            members
                .iter()
                .find(|m| m.id == *id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| format!("#{id}"))
        })
        .collect();

    SuggestedTeam {
        coverage: team_coverage(member_ids, members),
        member_ids: member_ids.to_vec(),
        member_names,
    }
}
