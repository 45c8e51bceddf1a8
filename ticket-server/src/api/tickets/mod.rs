//! Ticket API module
//!
//! # Routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/tickets | GET | Merged queue over all categories |
//! | /api/tickets/unassigned | GET | Claimable tickets |
//! | /api/tickets/review/pending | GET | Tickets awaiting review |
//! | /api/tickets/review/rejected | GET | Returned work (optionally per technician) |
//! | /api/tickets/cleaning | POST | Open a cleaning ticket |
//! | /api/tickets/maintenance | POST | Open a maintenance ticket |
//! | /api/tickets/accident | POST | Open an accident report |
//! | /api/tickets/{category}/{id} | GET | One ticket snapshot |
//! | /api/tickets/{category}/{id}/native | GET | Snapshot in the category's record shape |
//! | /api/tickets/{category}/{id}/claim | POST | Claim the ticket |
//! | /api/tickets/{category}/{id}/resolve | POST | Submit for approval |
//! | /api/tickets/{category}/{id}/approve | POST | Approve and close |
//! | /api/tickets/{category}/{id}/reject | POST | Reject with a note |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/unassigned", get(handler::list_unassigned))
        .route("/review/pending", get(handler::list_pending_review))
        .route("/review/rejected", get(handler::list_rejected))
        .route("/cleaning", post(handler::open_cleaning))
        .route("/maintenance", post(handler::open_maintenance))
        .route("/accident", post(handler::open_accident))
        .route("/{category}/{id}", get(handler::get_by_key))
        .route("/{category}/{id}/native", get(handler::get_native))
        .route("/{category}/{id}/claim", post(handler::claim))
        .route("/{category}/{id}/resolve", post(handler::resolve))
        .route("/{category}/{id}/approve", post(handler::approve))
        .route("/{category}/{id}/reject", post(handler::reject))
}
