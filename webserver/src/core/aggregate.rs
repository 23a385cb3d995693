//! Performance aggregator
//!
//! Folds the full contest history into per-combo performance records.
//! Only combos that were literally fielded as a team in some contest are
//! counted; arbitrary subsets of the roster never appear here. Pure fold,
//! no side effects.

use std::collections::{BTreeMap, HashMap};

use crate::core::combo::ComboKey;
use crate::types::{ComboPerformance, ComboTrendPoint, ContestSnapshot};
use shared::{Contest, EngineResult, Member};

/// Running totals for one combo while folding the history
#[derive(Debug, Default)]
struct ComboAccum {
    member_ids: Vec<u32>,
    contests_played: u32,
    total_solved: u32,
    total_problems_faced: u32,
    solve_time_sum: f64,
    solve_time_count: u32,
    best: Option<ContestSnapshot>,
    worst: Option<ContestSnapshot>,
    trend: Vec<ComboTrendPoint>,
}

/// Fold contests into a per-combo performance map.
///
/// Contests are processed in (date, id) ascending order regardless of input
/// order, so trend series come out chronological and best/worst tie-breaks
/// (equal solve rate keeps the earlier date) fall out of the scan order.
/// A contest that fails its integrity check fails the whole call.
pub fn aggregate_performance(
    members: &[Member],
    contests: &[Contest],
) -> EngineResult<BTreeMap<ComboKey, ComboPerformance>> {
    let name_map: HashMap<u32, &str> = members.iter().map(|m| (m.id, m.name.as_str())).collect();

    let mut ordered: Vec<&Contest> = contests.iter().collect();
    ordered.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));

    let mut accums: BTreeMap<ComboKey, ComboAccum> = BTreeMap::new();

    for contest in ordered {
        contest.check_integrity()?;

        for team in &contest.teams {
            let mut ids = team.member_ids.clone();
            ids.sort_unstable();
            ids.dedup();
            // Solo or oversized teams still count toward overall trends,
            // just not toward combo tracking.
            if ids.len() != 2 && ids.len() != 3 {
                continue;
            }
            let key = ComboKey::canonicalize(&ids)?;

            let solved: Vec<_> = contest
                .results
                .iter()
                .filter(|r| r.solved_by_team.as_deref() == Some(team.label.as_str()))
                .collect();
            let solved_count = solved.len() as u32;
            let solve_rate = if contest.total_problems > 0 {
                f64::from(solved_count) / f64::from(contest.total_problems)
            } else {
                0.0
            };

            let snapshot = ContestSnapshot {
                contest_id: contest.id.clone(),
                contest_name: contest.name.clone(),
                date: contest.date,
                solved: solved_count,
                total: contest.total_problems,
                solve_rate,
            };

            let accum = accums.entry(key).or_default();
            accum.member_ids = ids;
            accum.contests_played += 1;
            accum.total_solved += solved_count;
            accum.total_problems_faced += contest.total_problems;

            for result in &solved {
                if let Some(minutes) = result.solve_time_minutes {
                    accum.solve_time_sum += f64::from(minutes);
                    accum.solve_time_count += 1;
                }
            }

            // Strict comparisons keep the earliest contest on equal rates,
            // since the scan is chronological.
            match &accum.best {
                Some(best) if snapshot.solve_rate <= best.solve_rate => {}
                _ => accum.best = Some(snapshot.clone()),
            }
            match &accum.worst {
                Some(worst) if snapshot.solve_rate >= worst.solve_rate => {}
                _ => accum.worst = Some(snapshot.clone()),
            }

            accum.trend.push(ComboTrendPoint {
                contest_id: contest.id.clone(),
                contest_name: contest.name.clone(),
                date: contest.date,
                solve_rate,
                problems_solved: solved_count,
                total_problems: contest.total_problems,
            });
        }
    }

    let performances = accums
        .into_iter()
        .map(|(key, accum)| {
            let member_names = accum
                .member_ids
                .iter()
                .map(|id| {
                    name_map
                        .get(id)
                        .map(|name| (*name).to_string())
                        .unwrap_or_else(|| format!("#{id}"))
                })
                .collect();

            let solve_rate = if accum.total_problems_faced > 0 {
                f64::from(accum.total_solved) / f64::from(accum.total_problems_faced)
            } else {
                0.0
            };
            let avg_solve_time = if accum.solve_time_count > 0 {
                Some(accum.solve_time_sum / f64::from(accum.solve_time_count))
            } else {
                None
            };

            let performance = ComboPerformance {
                team_size: accum.member_ids.len(),
                member_ids: accum.member_ids,
                member_names,
                combo_key: key.clone(),
                contests_played: accum.contests_played,
                total_problems_faced: accum.total_problems_faced,
                total_solved: accum.total_solved,
                solve_rate,
                avg_solve_time,
                best_contest: accum.best,
                worst_contest: accum.worst,
                trend: accum.trend,
            };
            (key, performance)
        })
        .collect();

    Ok(performances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::{contest, member, team};
    use shared::{EngineError, ProblemResult};

    fn solved(index: &str, label: &str, minutes: Option<u32>) -> ProblemResult {
        ProblemResult {
            problem_index: index.to_string(),
            problem_name: String::new(),
            solved_by_team: Some(label.to_string()),
            solve_time_minutes: minutes,
        }
    }

    fn unsolved(index: &str) -> ProblemResult {
        ProblemResult {
            problem_index: index.to_string(),
            problem_name: String::new(),
            solved_by_team: None,
            solve_time_minutes: None,
        }
    }

    fn roster() -> Vec<Member> {
        vec![
            member(1, "Alice", &[]),
            member(2, "Bob", &[]),
            member(3, "Carol", &[]),
            member(4, "Dave", &[]),
        ]
    }

    #[test]
    fn single_contest_three_of_five() {
        let contests = vec![contest(
            "c1",
            "Round 1",
            "2025-03-01",
            5,
            vec![team("Red", &[1, 2, 3])],
            vec![
                solved("A", "Red", Some(10)),
                solved("B", "Red", Some(30)),
                solved("C", "Red", None),
                unsolved("D"),
                unsolved("E"),
            ],
        )];

        let perf = aggregate_performance(&roster(), &contests).unwrap();
        let key = ComboKey::canonicalize(&[1, 2, 3]).unwrap();
        let combo = &perf[&key];

        assert_eq!(combo.contests_played, 1);
        assert_eq!(combo.total_solved, 3);
        assert_eq!(combo.total_problems_faced, 5);
        assert!((combo.solve_rate - 0.6).abs() < 1e-9);
        // Mean over the two timed solves only
        assert!((combo.avg_solve_time.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(combo.member_names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn trend_is_chronological_even_for_unordered_input() {
        let later = contest(
            "c2",
            "Round 2",
            "2025-03-08",
            5,
            vec![team("Red", &[1, 2, 3])],
            vec![
                solved("A", "Red", None),
                solved("B", "Red", None),
                solved("C", "Red", None),
                solved("D", "Red", None),
                unsolved("E"),
            ],
        );
        let earlier = contest(
            "c1",
            "Round 1",
            "2025-03-01",
            5,
            vec![team("Red", &[3, 1, 2])],
            vec![
                solved("A", "Red", None),
                solved("B", "Red", None),
                unsolved("C"),
                unsolved("D"),
                unsolved("E"),
            ],
        );

        // Later contest listed first on purpose
        let perf = aggregate_performance(&roster(), &[later, earlier]).unwrap();
        let key = ComboKey::canonicalize(&[1, 2, 3]).unwrap();
        let combo = &perf[&key];

        assert_eq!(combo.contests_played, 2);
        let rates: Vec<f64> = combo.trend.iter().map(|p| p.solve_rate).collect();
        assert_eq!(rates, vec![0.4, 0.8]);
        assert_eq!(combo.best_contest.as_ref().unwrap().contest_id, "c2");
        assert_eq!(combo.worst_contest.as_ref().unwrap().contest_id, "c1");
    }

    #[test]
    fn equal_solve_rates_keep_the_earlier_best() {
        let make = |id: &str, date: &str| {
            contest(
                id,
                id,
                date,
                2,
                vec![team("Red", &[1, 2])],
                vec![solved("A", "Red", None), unsolved("B")],
            )
        };

        let perf =
            aggregate_performance(&roster(), &[make("c2", "2025-03-08"), make("c1", "2025-03-01")])
                .unwrap();
        let key = ComboKey::canonicalize(&[1, 2]).unwrap();
        let combo = &perf[&key];

        assert_eq!(combo.best_contest.as_ref().unwrap().contest_id, "c1");
        assert_eq!(combo.worst_contest.as_ref().unwrap().contest_id, "c1");
    }

    #[test]
    fn contests_played_counts_every_fielded_small_team() {
        let contests = vec![
            contest(
                "c1",
                "Round 1",
                "2025-03-01",
                4,
                vec![team("Red", &[1, 2, 3]), team("Blue", &[4, 5])],
                vec![],
            ),
            contest(
                "c2",
                "Round 2",
                "2025-03-02",
                4,
                // A 4-person squad is ignored for combo tracking
                vec![team("Red", &[1, 2, 3, 4]), team("Blue", &[5, 6])],
                vec![],
            ),
        ];

        let perf = aggregate_performance(&roster(), &contests).unwrap();
        let total_played: u32 = perf.values().map(|p| p.contests_played).sum();
        assert_eq!(total_played, 3);
    }

    #[test]
    fn corrupt_contest_fails_the_whole_call() {
        let contests = vec![contest(
            "bad",
            "Round 1",
            "2025-03-01",
            1,
            vec![team("Red", &[1, 2])],
            vec![solved("A", "Ghost", None)],
        )];

        let err = aggregate_performance(&roster(), &contests).unwrap_err();
        assert!(matches!(err, EngineError::DataIntegrity { ref contest_id, .. } if contest_id == "bad"));
    }

    #[test]
    fn unknown_members_fall_back_to_id_names() {
        let contests = vec![contest(
            "c1",
            "Round 1",
            "2025-03-01",
            1,
            vec![team("Red", &[8, 9])],
            vec![],
        )];

        let perf = aggregate_performance(&roster(), &contests).unwrap();
        let key = ComboKey::canonicalize(&[8, 9]).unwrap();
        assert_eq!(perf[&key].member_names, vec!["#8", "#9"]);
    }
}
