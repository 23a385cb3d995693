//! Main webserver implementation
//!
//! Wires the pure engine to an HTTP surface. The store is injected behind
//! the `TeamStore` trait; every query re-reads the snapshot and recomputes
//! from scratch, so concurrent requests never observe partial updates.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::core;
use crate::error::{WebServerError, WebServerResult};
use crate::state::ServerState;
use crate::traits::TeamStore;
use crate::types::{
    ActiveUpdate, ComboPerformance, ComboRanking, ComposeResponse, ContestCreate, MemberCreate,
    RotationSuggestion, TimelineResponse, TrendsResponse,
};
use shared::{logging, Contest, Member};

/// Main webserver struct with dependency injection
pub struct WebServer<T: TeamStore> {
    state: Arc<ServerState>,
    store: Arc<T>,
}

// Manual impl: the store sits behind an Arc, so no `T: Clone` bound
impl<T: TeamStore> Clone for WebServer<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: TeamStore + 'static> WebServer<T> {
    pub fn new(store: T) -> Self {
        Self {
            state: Arc::new(ServerState::new()),
            store: Arc::new(store),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Roster management
            .route("/api/team", get(list_members_handler).post(add_member_handler))
            .route("/api/team/:id/active", put(set_active_handler))
            .route("/api/team/compose", axum::routing::post(compose_handler))
            // Contest log
            .route(
                "/api/contests",
                get(list_contests_handler).post(add_contest_handler),
            )
            .route("/api/contests/trends", get(trends_handler))
            .route("/api/contests/:id", delete(delete_contest_handler))
            // Rotation analytics
            .route("/api/rotations/combos", get(combos_handler))
            .route("/api/rotations/rankings", get(rankings_handler))
            .route("/api/rotations/suggest", get(suggest_handler))
            .route("/api/rotations/timeline", get(timeline_handler))
            // Health check
            .route("/health", get(health_handler))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Start the webserver and run until shutdown
    pub async fn run(&self, bind_address: SocketAddr) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!("failed to bind to {bind_address}: {e}"))
            })?;

        logging::log_startup(&format!("rotation backend on http://{bind_address}"));

        tokio::select! {
            result = axum::serve(listener, router) => {
                if let Err(e) = result {
                    logging::log_error("HTTP server", &e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                logging::log_shutdown("received Ctrl+C");
                self.state.set_running(false);
            }
        }

        Ok(())
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// One immutable snapshot of roster + history, read fresh per query
    async fn snapshot(&self) -> WebServerResult<(Vec<Member>, Vec<Contest>)> {
        let members = self.store.list_members().await?;
        let contests = self.store.list_contests().await?;
        Ok((members, contests))
    }
}

/// JSON error body with the status the error maps to
fn reject(err: WebServerError) -> (StatusCode, Json<Value>) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::warn!(error = %err, "request rejected");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

type HandlerResult<R> = Result<Json<R>, (StatusCode, Json<Value>)>;

// Roster handlers

async fn list_members_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<Vec<Member>> {
    server.store.list_members().await.map(Json).map_err(reject)
}

async fn add_member_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
    Json(body): Json<MemberCreate>,
) -> HandlerResult<Member> {
    server.store.add_member(body).await.map(Json).map_err(reject)
}

async fn set_active_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
    Path(member_id): Path<u32>,
    Json(body): Json<ActiveUpdate>,
) -> HandlerResult<Member> {
    server
        .store
        .set_member_active(member_id, body.active)
        .await
        .map(Json)
        .map_err(reject)
}

async fn compose_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<ComposeResponse> {
    let members = server.store.list_members().await.map_err(reject)?;
    Ok(Json(core::compose_split(&members)))
}

// Contest handlers

async fn list_contests_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<Vec<Contest>> {
    let mut contests = server.store.list_contests().await.map_err(reject)?;
    contests.sort_by(|a, b| (b.date, &b.id).cmp(&(a.date, &a.id)));
    Ok(Json(contests))
}

async fn add_contest_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
    Json(body): Json<ContestCreate>,
) -> HandlerResult<Contest> {
    server.store.add_contest(body).await.map(Json).map_err(reject)
}

async fn delete_contest_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
    Path(contest_id): Path<String>,
) -> HandlerResult<Value> {
    server
        .store
        .delete_contest(&contest_id)
        .await
        .map_err(reject)?;
    Ok(Json(json!({ "status": "deleted", "id": contest_id })))
}

async fn trends_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<TrendsResponse> {
    let contests = server.store.list_contests().await.map_err(reject)?;
    core::contest_trends(&contests)
        .map(Json)
        .map_err(|e| reject(e.into()))
}

// Rotation handlers

async fn combos_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<Vec<ComboPerformance>> {
    let (members, contests) = server.snapshot().await.map_err(reject)?;
    let performances =
        core::aggregate_performance(&members, &contests).map_err(|e| reject(e.into()))?;
    Ok(Json(performances.into_values().collect()))
}

#[derive(Debug, Deserialize)]
struct RankingsQuery {
    team_size: Option<usize>,
}

async fn rankings_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
    Query(query): Query<RankingsQuery>,
) -> HandlerResult<Vec<ComboRanking>> {
    let team_size = query.team_size.unwrap_or(3);
    if team_size != 2 && team_size != 3 {
        return Err(reject(WebServerError::InvalidRequest {
            details: format!("team_size must be 2 or 3, got {team_size}"),
        }));
    }

    let (members, contests) = server.snapshot().await.map_err(reject)?;
    let performances =
        core::aggregate_performance(&members, &contests).map_err(|e| reject(e.into()))?;
    Ok(Json(core::rank_combos(&performances, team_size)))
}

async fn suggest_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<RotationSuggestion> {
    let (members, contests) = server.snapshot().await.map_err(reject)?;
    let performances =
        core::aggregate_performance(&members, &contests).map_err(|e| reject(e.into()))?;
    core::suggest_rotation(&members, &performances)
        .map(Json)
        .map_err(|e| reject(e.into()))
}

async fn timeline_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> HandlerResult<TimelineResponse> {
    let (members, contests) = server.snapshot().await.map_err(reject)?;
    let performances =
        core::aggregate_performance(&members, &contests).map_err(|e| reject(e.into()))?;
    Ok(Json(core::combo_timeline(&performances)))
}

async fn health_handler<T: TeamStore + 'static>(
    State(server): State<WebServer<T>>,
) -> Json<Value> {
    Json(json!({
        "status": if server.state.is_running() { "healthy" } else { "stopping" },
        "uptime_seconds": server.state.uptime_seconds(),
    }))
}
