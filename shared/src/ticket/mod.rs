//! Ticket model: canonical shape, native record shapes, change events

pub mod canonical;
pub mod event;
pub mod native;

pub use canonical::{
    ApprovalState, Priority, RejectionRecord, Ticket, TicketCategory, TicketExtras, TicketKey,
    TicketStatus,
};
pub use event::{TicketEvent, TicketEventKind};
pub use native::{AccidentRecord, CleaningRecord, MaintenanceRecord, NativeTicket};
