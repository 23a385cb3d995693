//! Rotation & composition backend for the training-progress dashboard
//!
//! Tracks how every fielded lineup has performed across logged contests,
//! ranks lineups, suggests which one to try next, and proposes balanced
//! two-team splits of the roster. The engine in [`core`] is pure; this
//! crate wraps it in a JSON HTTP surface backed by a pluggable store.

pub mod core;
pub mod error;
pub mod server;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use server::WebServer;
pub use state::ServerState;
pub use types::*;

// Re-export trait definitions and service implementations
pub use services::JsonTeamStore;
pub use traits::TeamStore;
