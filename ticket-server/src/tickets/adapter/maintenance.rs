//! Maintenance record adapter

use shared::models::{AssetRef, Originator, TechnicianRef};
use shared::ticket::{MaintenanceRecord, Ticket, TicketCategory, TicketExtras};

use super::{AdapterError, AdapterResult, CategoryAdapter};

pub struct MaintenanceAdapter;

impl CategoryAdapter for MaintenanceAdapter {
    type Native = MaintenanceRecord;

    const CATEGORY: TicketCategory = TicketCategory::Maintenance;

    fn to_canonical(native: &MaintenanceRecord) -> Ticket {
        Ticket {
            id: native.id.clone(),
            category: Self::CATEGORY,
            status: native.status,
            priority: native.severity,
            description: native.fault_description.clone(),
            asset: AssetRef::from_native_key(native.equipment_ref.as_deref()),
            assigned_to: native.technician_id.as_ref().map(|id| {
                TechnicianRef::new(
                    id.clone(),
                    native.technician_name.clone().unwrap_or_else(|| id.clone()),
                )
            }),
            opened_by: Originator::from_native_key(native.requested_by.as_deref()),
            created_at: native.logged_at,
            approval: native.approval,
            approval_note: native.approval_note.clone(),
            rejections: native.rejection_log.clone(),
            photo: None,
            extras: TicketExtras::Maintenance,
        }
    }

    fn from_canonical(ticket: &Ticket) -> AdapterResult<MaintenanceRecord> {
        if ticket.category != Self::CATEGORY {
            return Err(AdapterError::CategoryMismatch {
                key: ticket.key(),
                expected: Self::CATEGORY,
            });
        }
        Ok(MaintenanceRecord {
            id: ticket.id.clone(),
            equipment_ref: ticket.asset.native_key(),
            fault_description: ticket.description.clone(),
            severity: ticket.priority,
            requested_by: ticket.opened_by.native_key(),
            technician_id: ticket.assigned_to.as_ref().map(|t| t.id.clone()),
            technician_name: ticket.assigned_to.as_ref().map(|t| t.name.clone()),
            status: ticket.status,
            approval: ticket.approval,
            approval_note: ticket.approval_note.clone(),
            logged_at: ticket.created_at,
            rejection_log: ticket.rejections.clone(),
        })
    }
}
