//! The rotation and composition engine
//!
//! Pure, synchronous computations over an in-memory roster/contest
//! snapshot. Every function here is a deterministic function of its
//! inputs: recomputing on unchanged data yields identical output, which is
//! what makes it safe to recompute on every query instead of caching.

pub mod aggregate;
pub mod combo;
pub mod compose;
pub mod coverage;
pub mod rank;
pub mod suggest;
pub mod trends;

#[cfg(test)]
pub mod testutil;

pub use aggregate::aggregate_performance;
pub use combo::{combinations, count_combinations, ComboKey};
pub use compose::compose_split;
pub use coverage::team_coverage;
pub use rank::rank_combos;
pub use suggest::suggest_rotation;
pub use trends::{combo_timeline, contest_trends};
