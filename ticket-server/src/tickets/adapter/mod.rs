//! Category adapters
//!
//! Translation between the three category-native record shapes and the
//! canonical ticket. Adaptation is total (every native record yields a
//! canonical ticket) and lossless for lifecycle fields: adapting and
//! de-adapting reproduces the native record's lifecycle state exactly,
//! including the category-specific payload.
//!
//! - **cleaning**: `zone_ref` / `cleaner_id` / `reported_by` record shape
//! - **maintenance**: `equipment_ref` / `technician_id` / `requested_by`
//! - **accident**: `site_ref` / `handler_id` / `witness_id` plus
//!   incident-report metadata (cost, classifier, photo)

pub mod accident;
pub mod cleaning;
pub mod maintenance;

pub use accident::AccidentAdapter;
pub use cleaning::CleaningAdapter;
pub use maintenance::MaintenanceAdapter;

use shared::ticket::{NativeTicket, Ticket, TicketCategory, TicketKey};
use thiserror::Error;

/// Adapter errors
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Ticket {key} is not a {expected} ticket")]
    CategoryMismatch {
        key: TicketKey,
        expected: TicketCategory,
    },
}

pub type AdapterResult<T> = Result<T, AdapterError>;

/// Per-category translation between native and canonical shapes
pub trait CategoryAdapter {
    type Native;

    const CATEGORY: TicketCategory;

    /// Normalize a native record into the canonical model (total)
    fn to_canonical(native: &Self::Native) -> Ticket;

    /// Translate a canonical ticket back into the native update shape
    ///
    /// Fails only when the ticket does not belong to this category.
    fn from_canonical(ticket: &Ticket) -> AdapterResult<Self::Native>;
}

/// Normalize any native record through its category's adapter
pub fn to_canonical(native: &NativeTicket) -> Ticket {
    match native {
        NativeTicket::Cleaning(r) => CleaningAdapter::to_canonical(r),
        NativeTicket::Maintenance(r) => MaintenanceAdapter::to_canonical(r),
        NativeTicket::Accident(r) => AccidentAdapter::to_canonical(r),
    }
}

/// Translate a canonical ticket back into its category's native shape
pub fn to_native(ticket: &Ticket) -> AdapterResult<NativeTicket> {
    match ticket.category {
        TicketCategory::Cleaning => {
            CleaningAdapter::from_canonical(ticket).map(NativeTicket::Cleaning)
        }
        TicketCategory::Maintenance => {
            MaintenanceAdapter::from_canonical(ticket).map(NativeTicket::Maintenance)
        }
        TicketCategory::Accident => {
            AccidentAdapter::from_canonical(ticket).map(NativeTicket::Accident)
        }
    }
}
