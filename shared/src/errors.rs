//! Shared error types for the rotation and composition engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("combo must have 2 or 3 members, got {size}")]
    InvalidComboSize { size: usize },

    #[error("contest {contest_id} has corrupt data: {detail}")]
    DataIntegrity { contest_id: String, detail: String },

    #[error("need at least 2 active members to form teams, have {active}")]
    InsufficientRoster { active: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
