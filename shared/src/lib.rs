//! Shared types for the facility work-order system
//!
//! Common types used across the service and its clients: the canonical
//! ticket model, category-native record shapes, error types, and
//! query/pagination structures.

pub mod error;
pub mod models;
pub mod query;
pub mod ticket;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Ticket re-exports (for convenient access)
pub use ticket::{
    ApprovalState, NativeTicket, Priority, Ticket, TicketCategory, TicketKey, TicketStatus,
};

pub use query::{ListQuery, PaginatedResponse};
