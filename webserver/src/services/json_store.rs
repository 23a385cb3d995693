//! JSON-file-backed team store
//!
//! Keeps the roster in `team.json` and the contest log in `contests.json`
//! under the configured data directory. Files are rewritten whole on every
//! mutation, staged through a sibling temp file so a crash mid-write never
//! leaves a half-serialized log behind. Reads of missing files yield empty
//! collections, the legitimate first-run state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::TeamStore;
use crate::types::{ContestCreate, MemberCreate};
use shared::{Contest, Member};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TeamFile {
    members: Vec<Member>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ContestFile {
    contests: Vec<Contest>,
}

/// Real team store backed by JSON files on disk
#[derive(Clone)]
pub struct JsonTeamStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles; reads alone don't need it
    write_lock: Arc<Mutex<()>>,
}

impl JsonTeamStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn team_path(&self) -> PathBuf {
        self.data_dir.join("team.json")
    }

    fn contests_path(&self) -> PathBuf {
        self.data_dir.join("contests.json")
    }

    async fn load<D: for<'de> Deserialize<'de> + Default>(path: &Path) -> WebServerResult<D> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(D::default()),
            Err(e) => Err(WebServerError::Io(e)),
        }
    }

    async fn save<S: Serialize>(&self, path: &Path, data: &S) -> WebServerResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let bytes = serde_json::to_vec_pretty(data)?;
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, &bytes).await?;
        tokio::fs::rename(&staging, path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TeamStore for JsonTeamStore {
    async fn list_members(&self) -> WebServerResult<Vec<Member>> {
        let team: TeamFile = Self::load(&self.team_path()).await?;
        Ok(team.members)
    }

    async fn add_member(&self, new_member: MemberCreate) -> WebServerResult<Member> {
        let _guard = self.write_lock.lock().await;

        let mut team: TeamFile = Self::load(&self.team_path()).await?;
        let next_id = team.members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let member = Member {
            id: next_id,
            name: new_member.name,
            active: true,
            cluster_scores: new_member.cluster_scores,
            topic_strengths: new_member.topic_strengths,
        };
        team.members.push(member.clone());
        self.save(&self.team_path(), &team).await?;
        Ok(member)
    }

    async fn set_member_active(&self, member_id: u32, active: bool) -> WebServerResult<Member> {
        let _guard = self.write_lock.lock().await;

        let mut team: TeamFile = Self::load(&self.team_path()).await?;
        let member = team
            .members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| WebServerError::not_found("member", member_id.to_string()))?;
        member.active = active;
        let updated = member.clone();
        self.save(&self.team_path(), &team).await?;
        Ok(updated)
    }

    async fn list_contests(&self) -> WebServerResult<Vec<Contest>> {
        let log: ContestFile = Self::load(&self.contests_path()).await?;
        Ok(log.contests)
    }

    async fn add_contest(&self, new_contest: ContestCreate) -> WebServerResult<Contest> {
        let _guard = self.write_lock.lock().await;

        let mut log: ContestFile = Self::load(&self.contests_path()).await?;
        let contest = Contest {
            id: Uuid::new_v4().simple().to_string()[..8].to_string(),
            name: new_contest.name,
            date: new_contest.date,
            duration_minutes: new_contest.duration_minutes,
            total_problems: new_contest.total_problems,
            teams: new_contest.teams,
            results: new_contest.results,
            notes: new_contest.notes,
            created_at: Utc::now(),
        };
        log.contests.push(contest.clone());
        self.save(&self.contests_path(), &log).await?;
        Ok(contest)
    }

    async fn delete_contest(&self, contest_id: &str) -> WebServerResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut log: ContestFile = Self::load(&self.contests_path()).await?;
        let before = log.contests.len();
        log.contests.retain(|c| c.id != contest_id);
        if log.contests.len() == before {
            return Err(WebServerError::not_found("contest", contest_id));
        }
        self.save(&self.contests_path(), &log).await?;
        Ok(())
    }
}
