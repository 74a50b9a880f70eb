//! Version HTTP routes
//!
//! The versioning collaborator's surface: create drafts, run lifecycle
//! transitions, and list versions with their lock status. The `locked`
//! column in listings mirrors what an admin list would render.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::version::Version;

use super::server::AppState;
use super::shared::{
    lock_error, parse_version_id, require_actor, version_error, ApiError,
};

/// Version routes with shared state
pub fn version_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/versions",
            post(create_draft_handler).get(list_versions_handler),
        )
        .route("/versions/:id", get(get_version_handler))
        .route("/versions/:id/publish", post(publish_handler))
        .route("/versions/:id/unpublish", post(unpublish_handler))
        .route("/versions/:id/archive", post(archive_handler))
        .route("/versions/:id/revert", post(revert_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    /// Existing content object to add a draft to; a new grouper is
    /// allocated when absent.
    pub grouper: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub grouper: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub id: String,
    pub grouper: String,
    pub state: String,
    pub created_by: String,
    pub created: String,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_by: Option<String>,
}

fn version_response(state: &Arc<AppState>, version: &Version) -> Result<VersionResponse, ApiError> {
    let lock = state.locks.get(version.id).map_err(lock_error)?;
    Ok(VersionResponse {
        id: version.id.to_string(),
        grouper: version.grouper.to_string(),
        state: version.state.to_string(),
        created_by: version.created_by.to_string(),
        created: version.created.to_rfc3339(),
        locked: lock.is_some(),
        locked_by: lock.map(|l| l.created_by.to_string()),
    })
}

// ==================
// Handlers
// ==================

/// Create a new draft version. The draft comes back already locked by its
/// creator.
async fn create_draft_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<VersionResponse>), ApiError> {
    let actor = require_actor(&state, &headers)?;
    let grouper = request.grouper.unwrap_or_else(Uuid::new_v4);

    let version = state
        .workflow
        .create_draft(grouper, actor.id)
        .map_err(version_error)?;

    Ok((StatusCode::CREATED, Json(version_response(&state, &version)?)))
}

/// List versions, optionally scoped to one content object.
async fn list_versions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<VersionResponse>>, ApiError> {
    let versions = match params.grouper {
        Some(grouper) => state.workflow.list_for_grouper(grouper),
        None => state.workflow.list(),
    }
    .map_err(version_error)?;

    let mut listed = Vec::with_capacity(versions.len());
    for version in &versions {
        listed.push(version_response(&state, version)?);
    }
    Ok(Json(listed))
}

async fn get_version_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version_id = parse_version_id(&id)?;
    let version = state
        .workflow
        .get(version_id)
        .map_err(version_error)?
        .ok_or_else(|| version_error(crate::version::VersionError::NotFound))?;
    Ok(Json(version_response(&state, &version)?))
}

async fn publish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version_id = parse_version_id(&id)?;
    let version = state.workflow.publish(version_id).map_err(version_error)?;
    Ok(Json(version_response(&state, &version)?))
}

async fn unpublish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version_id = parse_version_id(&id)?;
    let version = state
        .workflow
        .unpublish(version_id)
        .map_err(version_error)?;
    Ok(Json(version_response(&state, &version)?))
}

async fn archive_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version_id = parse_version_id(&id)?;
    let version = state.workflow.archive(version_id).map_err(version_error)?;
    Ok(Json(version_response(&state, &version)?))
}

/// Create a fresh draft from an archived or unpublished version, owned by
/// the reverting actor.
async fn revert_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<VersionResponse>), ApiError> {
    let actor = require_actor(&state, &headers)?;
    let version_id = parse_version_id(&id)?;

    let version = state
        .workflow
        .revert(version_id, actor.id)
        .map_err(version_error)?;

    Ok((StatusCode::CREATED, Json(version_response(&state, &version)?)))
}
