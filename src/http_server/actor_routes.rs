//! Actor HTTP routes
//!
//! Registration endpoint standing in for the surrounding application's
//! user management; requests then identify themselves with `X-Actor`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::Actor;

use super::server::AppState;
use super::shared::{auth_error, ApiError};

/// Actor routes with shared state
pub fn actor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/actors", post(register_actor_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct RegisterActorRequest {
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: String,
    pub name: String,
}

async fn register_actor_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterActorRequest>,
) -> Result<(StatusCode, Json<ActorResponse>), ApiError> {
    let mut actor = Actor::new(request.name);
    for capability in &request.capabilities {
        actor.grant(capability);
    }

    let response = ActorResponse {
        id: actor.id.to_string(),
        name: actor.name.clone(),
    };
    state.directory.register(actor).map_err(auth_error)?;

    Ok((StatusCode::CREATED, Json(response)))
}
