//! HTTP Server
//!
//! Router assembly and the serving loop. Shared application state wires the
//! lock store, lifecycle manager, authorization gate, and unlock action
//! together once; every route consults the same instances.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::ActorDirectory;
use crate::lock::{
    AuthorizationGate, InMemoryLockStore, LockLifecycleManager, LockStore, UnlockAction,
};
use crate::observability::Logger;
use crate::version::{InMemoryVersionRepository, VersionRepository, VersionWorkflow};

use super::actor_routes::actor_routes;
use super::config::HttpServerConfig;
use super::lock_routes::lock_routes;
use super::version_routes::version_routes;

/// Shared application state
pub struct AppState {
    pub workflow: VersionWorkflow,
    pub gate: AuthorizationGate,
    pub unlock: UnlockAction,
    pub directory: ActorDirectory,
    pub locks: Arc<dyn LockStore>,
}

impl AppState {
    /// Wire the full stack around the given lock store.
    pub fn new(locks: Arc<dyn LockStore>) -> Self {
        let versions: Arc<dyn VersionRepository> = Arc::new(InMemoryVersionRepository::new());
        let lifecycle = LockLifecycleManager::new(locks.clone());
        let workflow = VersionWorkflow::new(versions.clone(), lifecycle);
        let gate = AuthorizationGate::new(locks.clone());
        let unlock = UnlockAction::new(versions, locks.clone());

        Self {
            workflow,
            gate,
            unlock,
            directory: ActorDirectory::new(),
            locks,
        }
    }

    /// Fully in-memory state, for tests and embedded use.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryLockStore::new()))
    }
}

/// HTTP server for draftlock
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration.
    pub fn new(state: Arc<AppState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Create a server with custom configuration.
    pub fn with_config(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .merge(actor_routes(state.clone()))
            .merge(version_routes(state.clone()))
            .merge(lock_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let listen = addr.to_string();
        Logger::info("HTTP_SERVER_START", &[("addr", &listen)]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_uses_configured_addr() {
        let state = Arc::new(AppState::in_memory());
        let server = HttpServer::with_config(HttpServerConfig::with_addr("127.0.0.1", 9000), state);
        assert_eq!(server.socket_addr(), "127.0.0.1:9000");
    }
}
