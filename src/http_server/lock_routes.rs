//! Lock HTTP routes
//!
//! The unlock entry point and the lock-status query consumed by
//! presentation adapters (edit affordances, unlock icons).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::lock::LockError;
use crate::version::VersionError;

use super::server::AppState;
use super::shared::{
    lock_error, parse_version_id, require_actor, version_error, ApiError, ErrorResponse,
};

/// Lock routes with shared state
pub fn lock_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/versions/:id/unlock",
            // This endpoint always mutates, so only POST is accepted; every
            // other method is rejected before any lock or version lookup.
            post(unlock_handler).fallback(unlock_method_not_allowed),
        )
        .route("/versions/:id/lock", get(lock_status_handler))
        .with_state(state)
}

/// Lock status for one version, answered for the requesting actor.
#[derive(Debug, Serialize)]
pub struct LockStatusResponse {
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_by: Option<String>,
    /// True if this actor may edit as far as lock state is concerned
    pub content_is_unlocked: bool,
    /// True if the unlock affordance should be shown to this actor
    pub lock_can_be_removed: bool,
    /// Base edit permission AND lock state
    pub can_edit: bool,
}

/// Forcibly release a lock, leaving the draft a draft. Redirects back to
/// the listing scoped to the version's content object.
async fn unlock_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    let actor = require_actor(&state, &headers)?;
    let version_id = parse_version_id(&id)?;

    let outcome = state
        .unlock
        .unlock(version_id, &actor)
        .map_err(lock_error)?;

    Ok(Redirect::to(&format!(
        "/versions?grouper={}",
        outcome.grouper
    )))
}

async fn unlock_method_not_allowed() -> ApiError {
    let err = LockError::MethodNotAllowed;
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.status_code(),
        }),
    )
}

async fn lock_status_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<LockStatusResponse>, ApiError> {
    let actor = require_actor(&state, &headers)?;
    let version_id = parse_version_id(&id)?;

    let version = state
        .workflow
        .get(version_id)
        .map_err(version_error)?
        .ok_or_else(|| version_error(VersionError::NotFound))?;

    let lock = state.locks.get(version.id).map_err(lock_error)?;
    let content_is_unlocked = state
        .gate
        .content_is_unlocked(&version, &actor)
        .map_err(lock_error)?;
    let lock_can_be_removed = state
        .gate
        .lock_can_be_removed_for_user(&version, &actor)
        .map_err(lock_error)?;
    let can_edit = state.gate.can_edit(&version, &actor).map_err(lock_error)?;

    Ok(Json(LockStatusResponse {
        locked: lock.is_some(),
        locked_by: lock.map(|l| l.created_by.to_string()),
        content_is_unlocked,
        lock_can_be_removed,
        can_edit,
    }))
}
