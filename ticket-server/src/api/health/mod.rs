//! Health check routes
//!
//! # Routes
//!
//! | Path | Method | Description | Auth |
//! |------|--------|-------------|------|
//! | /health | GET | Simple health check | none |
//! | /health/detailed | GET | Health check with pool statistics | none |
//!
//! # Response Example
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;
use shared::ticket::TicketCategory;

/// Health check routes - public, no auth
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (healthy | degraded)
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    /// Uptime in seconds
    uptime_seconds: u64,
    /// Per-category source checks
    sources: Vec<SourceCheck>,
}

#[derive(Serialize)]
pub struct SourceCheck {
    category: TicketCategory,
    /// Status (ok | error)
    status: &'static str,
    /// Tickets currently held for this category
    #[serde(skip_serializing_if = "Option::is_none")]
    tickets: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// Server start time, set on first health probe
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Basic health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health check probing every category source
pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let mut sources = Vec::with_capacity(TicketCategory::ALL.len());
    let mut all_ok = true;

    for category in TicketCategory::ALL {
        match state.manager.list(category).await {
            Ok(tickets) => sources.push(SourceCheck {
                category,
                status: "ok",
                tickets: Some(tickets.len()),
                message: None,
            }),
            Err(e) => {
                all_ok = false;
                sources.push(SourceCheck {
                    category,
                    status: "error",
                    tickets: None,
                    message: Some(e.to_string()),
                });
            }
        }
    }

    Json(DetailedHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        sources,
    })
}
