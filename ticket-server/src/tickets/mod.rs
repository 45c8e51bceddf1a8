//! Work-order management module
//!
//! Canonical ticket pipeline for the three work categories (cleaning,
//! maintenance, accident):
//!
//! - **adapter**: translation between category-native records and the
//!   canonical ticket
//! - **pool**: the canonical ticket store ([`TicketStore`] / [`MemoryPool`])
//! - **lifecycle**: the pure shared state machine
//! - **manager**: serialized transition execution and claim arbitration
//! - **aggregate**: merged cross-category views (filter/sort/paginate)
//! - **review**: reviewer queues and approve/reject decisions
//! - **intake**: validated entry point for new work orders
//!
//! # Architecture
//!
//! ```text
//! Intake ──▶ Adapter ──▶ MemoryPool ◀── TicketManager ◀── API handlers
//!                            │               │
//!                       MergedView       Broadcast
//!                      (aggregate)     (subscribers)
//!                            │
//!                     Review queues
//! ```
//!
//! All category-specific knowledge lives in the adapters; everything
//! downstream of them operates on the canonical ticket only.

pub mod adapter;
pub mod aggregate;
pub mod intake;
pub mod lifecycle;
pub mod manager;
pub mod pool;
pub mod review;

// Re-exports
pub use aggregate::{MergedView, SortDirection, SortKey, SourceFailure};
pub use intake::{AccidentIntake, CleaningIntake, IntakeService, MaintenanceIntake};
pub use lifecycle::{LifecycleError, TransitionEvent};
pub use manager::{ManagerError, ManagerResult, TicketManager};
pub use pool::{MemoryPool, StoreError, TicketStore};
pub use review::ReviewService;

// Re-export shared types for convenience
pub use shared::ticket::{
    ApprovalState, NativeTicket, Priority, Ticket, TicketCategory, TicketEvent, TicketEventKind,
    TicketKey, TicketStatus,
};

#[cfg(test)]
mod tests;
