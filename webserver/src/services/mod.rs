//! Service implementations
//!
//! Real implementations of the service traits for production use

pub mod json_store;

pub use json_store::JsonTeamStore;
