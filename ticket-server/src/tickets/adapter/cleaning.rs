//! Cleaning record adapter

use shared::models::{AssetRef, Originator, TechnicianRef};
use shared::ticket::{CleaningRecord, Ticket, TicketCategory, TicketExtras};

use super::{AdapterError, AdapterResult, CategoryAdapter};

pub struct CleaningAdapter;

impl CategoryAdapter for CleaningAdapter {
    type Native = CleaningRecord;

    const CATEGORY: TicketCategory = TicketCategory::Cleaning;

    fn to_canonical(native: &CleaningRecord) -> Ticket {
        Ticket {
            id: native.id.clone(),
            category: Self::CATEGORY,
            status: native.state,
            priority: native.urgency,
            description: native.task.clone(),
            asset: AssetRef::from_native_key(native.zone_ref.as_deref()),
            assigned_to: native.cleaner_id.as_ref().map(|id| {
                TechnicianRef::new(
                    id.clone(),
                    native.cleaner_name.clone().unwrap_or_else(|| id.clone()),
                )
            }),
            opened_by: Originator::from_native_key(native.reported_by.as_deref()),
            created_at: native.opened_at,
            approval: native.review,
            approval_note: native.review_note.clone(),
            rejections: native.rejection_log.clone(),
            photo: None,
            extras: TicketExtras::Cleaning,
        }
    }

    fn from_canonical(ticket: &Ticket) -> AdapterResult<CleaningRecord> {
        if ticket.category != Self::CATEGORY {
            return Err(AdapterError::CategoryMismatch {
                key: ticket.key(),
                expected: Self::CATEGORY,
            });
        }
        Ok(CleaningRecord {
            id: ticket.id.clone(),
            zone_ref: ticket.asset.native_key(),
            task: ticket.description.clone(),
            urgency: ticket.priority,
            reported_by: ticket.opened_by.native_key(),
            cleaner_id: ticket.assigned_to.as_ref().map(|t| t.id.clone()),
            cleaner_name: ticket.assigned_to.as_ref().map(|t| t.name.clone()),
            state: ticket.status,
            review: ticket.approval,
            review_note: ticket.approval_note.clone(),
            opened_at: ticket.created_at,
            rejection_log: ticket.rejections.clone(),
        })
    }
}
