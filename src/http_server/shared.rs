//! Shared HTTP plumbing
//!
//! Error payloads, status mapping, and request-identity resolution used by
//! every route module.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{Actor, AuthError};
use crate::lock::LockError;
use crate::version::VersionError;

use super::server::AppState;

/// Header naming the requesting actor. Stands in for the surrounding
/// application's session layer.
pub const ACTOR_HEADER: &str = "x-actor";

/// JSON error payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Error tuple returned by handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn respond(message: String, code: u16) -> ApiError {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: message,
            code,
        }),
    )
}

pub fn lock_error(err: LockError) -> ApiError {
    respond(err.to_string(), err.status_code())
}

pub fn version_error(err: VersionError) -> ApiError {
    respond(err.to_string(), err.status_code())
}

pub fn auth_error(err: AuthError) -> ApiError {
    respond(err.to_string(), err.status_code())
}

/// Resolve the requesting actor from the `X-Actor` header.
///
/// A missing or unknown actor is an authentication failure, reported before
/// any lock or version lookup.
pub fn require_actor(state: &Arc<AppState>, headers: &HeaderMap) -> Result<Actor, ApiError> {
    let name = headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| respond("Missing X-Actor header".to_string(), 401))?;

    state
        .directory
        .find(name)
        .map_err(auth_error)?
        .ok_or_else(|| respond(format!("Unknown actor: {}", name), 401))
}

/// Parse a version id path segment. An unparseable id can name no version,
/// so it reads as not found.
pub fn parse_version_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| lock_error(LockError::NotFound))
}
