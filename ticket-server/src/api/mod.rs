//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`tickets`] - work-order intake, queues, and lifecycle events

pub mod health;
pub mod tickets;

use axum::Router;

use crate::core::ServerState;

/// Assemble every route group into one router
pub fn create_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tickets::router())
}

// Re-export common types for handlers
pub use shared::error::{ApiResponse, AppResult};
