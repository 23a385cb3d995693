//! Combo identity model
//!
//! A combo is an unordered set of 2 or 3 member ids. Its canonical key is
//! the ascending-sorted ids joined by `-`, so two combos are the same
//! entity exactly when their member sets are equal, independent of team
//! label or the order members were listed in.

use serde::{Deserialize, Serialize};
use std::fmt;

use shared::{EngineError, EngineResult};

/// Canonical identifier for a fielded 2- or 3-member lineup
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboKey(String);

impl ComboKey {
    /// Canonicalize a member-id set into its combo key.
    ///
    /// Sorts ids ascending before joining, so any permutation of the same
    /// set produces an identical key. Duplicate ids collapse; the size
    /// check applies to the resulting set.
    pub fn canonicalize(member_ids: &[u32]) -> EngineResult<Self> {
        let mut ids = member_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        if ids.len() != 2 && ids.len() != 3 {
            return Err(EngineError::InvalidComboSize { size: ids.len() });
        }

        let key = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("-");
        Ok(ComboKey(key))
    }

    /// Recover the member ids encoded in the key, ascending
    pub fn member_ids(&self) -> Vec<u32> {
        self.0
            .split('-')
            .filter_map(|part| part.parse().ok())
            .collect()
    }

    pub fn team_size(&self) -> usize {
        self.0.split('-').count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lazy enumeration of every size-`k` subset of `pool`.
///
/// Subsets come out in lexicographic index order over the ascending-sorted
/// pool, so a fresh iterator always replays the same finite sequence.
pub fn combinations(pool: &[u32], k: usize) -> Combinations {
    let mut sorted = pool.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Combinations::new(sorted, k)
}

/// Number of size-`k` subsets of an `n`-element roster, C(n, k)
pub fn count_combinations(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

#[derive(Debug, Clone)]
pub struct Combinations {
    pool: Vec<u32>,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    fn new(pool: Vec<u32>, k: usize) -> Self {
        let exhausted = k > pool.len() || k == 0;
        Self {
            indices: (0..k).collect(),
            pool,
            started: false,
            exhausted,
        }
    }

    fn current(&self) -> Vec<u32> {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }

    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        let n = self.pool.len();

        // Find the rightmost index that can still move right
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] != i + n - k {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Combinations {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if self.advance() {
            Some(self.current())
        } else {
            self.exhausted = true;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_key_is_order_invariant() {
        let a = ComboKey::canonicalize(&[3, 1, 2]).unwrap();
        let b = ComboKey::canonicalize(&[2, 3, 1]).unwrap();
        let c = ComboKey::canonicalize(&[1, 2, 3]).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "1-2-3");
    }

    #[test]
    fn key_round_trips_member_ids() {
        let key = ComboKey::canonicalize(&[12, 4]).unwrap();
        assert_eq!(key.member_ids(), vec![4, 12]);
        assert_eq!(key.team_size(), 2);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(
            ComboKey::canonicalize(&[1]),
            Err(EngineError::InvalidComboSize { size: 1 })
        ));
        assert!(matches!(
            ComboKey::canonicalize(&[1, 2, 3, 4]),
            Err(EngineError::InvalidComboSize { size: 4 })
        ));
        // Duplicates collapse before the size check
        assert!(ComboKey::canonicalize(&[5, 5, 7]).is_ok());
    }

    #[test]
    fn enumerates_all_distinct_trios() {
        let roster = vec![1, 2, 3, 4, 5];
        let trios: Vec<Vec<u32>> = combinations(&roster, 3).collect();
        assert_eq!(trios.len() as u64, count_combinations(5, 3));

        let keys: HashSet<ComboKey> = trios
            .iter()
            .map(|t| ComboKey::canonicalize(t).unwrap())
            .collect();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn enumeration_is_restartable() {
        let roster = vec![4, 2, 9];
        let first: Vec<Vec<u32>> = combinations(&roster, 2).collect();
        let second: Vec<Vec<u32>> = combinations(&roster, 2).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![vec![2, 4], vec![2, 9], vec![4, 9]]);
    }

    #[test]
    fn binomial_counts() {
        assert_eq!(count_combinations(4, 3), 4);
        assert_eq!(count_combinations(12, 3), 220);
        assert_eq!(count_combinations(2, 3), 0);
        assert_eq!(count_combinations(20, 10), 184_756);
    }
}
