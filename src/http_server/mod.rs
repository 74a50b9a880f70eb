//! HTTP adapter
//!
//! Presentation surface over the lock core: actor registration, version
//! lifecycle operations, the lock-status query, and the POST-only unlock
//! entry point.

mod actor_routes;
mod config;
mod lock_routes;
mod server;
mod shared;
mod version_routes;

pub use config::HttpServerConfig;
pub use server::{AppState, HttpServer};
pub use shared::ACTOR_HEADER;
