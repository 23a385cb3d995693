//! Shared types for the team rotation and composition backend
//!
//! Contains the domain records handed to the engine (roster members and
//! logged contests), the engine error taxonomy, and tracing setup.
//! Derived shapes (rankings, suggestions, trend rollups) are kept in the
//! component that computes them.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
