//! axum router and handlers for the team API.
//!
//! Handlers return `Result<_, RotomError>` and the error → status mapping
//! lives in one `IntoResponse` impl, so every failure reaches the wire
//! with the same `{"message": ...}` shape.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::config::LimitsConfig;
use crate::enrich::TeamEnricher;
use crate::storage::TeamStore;
use crate::types::{EnrichedTeam, Team, TeamDraft, TeamPage};
use crate::{Result, RotomError, version_string};

/// Shared handler state: explicitly owned store and enricher.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TeamStore>,
    pub enricher: Arc<TeamEnricher>,
}

/// Build the service router.
pub fn router(state: AppState, limits: &LimitsConfig) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/{id}",
            get(get_team)
                .put(update_team)
                .patch(update_team)
                .delete(delete_team),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            limits.request_timeout_secs,
        )))
        .layer(GlobalConcurrencyLimitLayer::new(
            limits.max_concurrent_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: version_string(),
    })
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<TeamPage>> {
    Ok(Json(state.store.list(params.page, params.limit)?))
}

async fn create_team(
    State(state): State<AppState>,
    Json(draft): Json<TeamDraft>,
) -> Result<(StatusCode, Json<Team>)> {
    let team = state.store.create(&draft)?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EnrichedTeam>> {
    let team = state.store.get(id)?.ok_or(RotomError::TeamNotFound(id))?;
    let enriched = state.enricher.enrich(&team).await?;
    Ok(Json(enriched))
}

async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<TeamDraft>,
) -> Result<Json<Team>> {
    Ok(Json(state.store.update(id, &draft)?))
}

async fn delete_team(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Error payload shape: `{"message": ...}`.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for RotomError {
    fn into_response(self) -> Response {
        let status = match &self {
            // A missing Pokémon is a client-correctable identifier problem,
            // not a missing route resource.
            RotomError::PokemonNotFound(_) | RotomError::InvalidTeam(_) => StatusCode::BAD_REQUEST,
            RotomError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            RotomError::TeamNotFound(_) => StatusCode::NOT_FOUND,
            RotomError::DuplicateTeamName(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
