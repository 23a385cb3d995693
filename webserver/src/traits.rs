//! Service trait definitions for dependency injection
//!
//! The roster/contest-logging collaborator is abstracted behind this trait
//! so handlers can be exercised against a mock store in tests.

use async_trait::async_trait;

use crate::error::WebServerResult;
use crate::types::{ContestCreate, MemberCreate};
use shared::{Contest, Member};

/// Roster and contest-log storage service trait
#[mockall::automock]
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// All roster members, active or not
    async fn list_members(&self) -> WebServerResult<Vec<Member>>;

    /// Add a member; the store assigns the id
    async fn add_member(&self, new_member: MemberCreate) -> WebServerResult<Member>;

    /// Flip a member's active flag
    async fn set_member_active(&self, member_id: u32, active: bool) -> WebServerResult<Member>;

    /// Full contest history, unordered
    async fn list_contests(&self) -> WebServerResult<Vec<Contest>>;

    /// Log a contest; the store assigns the id and created-at stamp
    async fn add_contest(&self, new_contest: ContestCreate) -> WebServerResult<Contest>;

    /// Delete a contest by id
    async fn delete_contest(&self, contest_id: &str) -> WebServerResult<()>;
}
