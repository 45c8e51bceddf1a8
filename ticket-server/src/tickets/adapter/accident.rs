//! Accident record adapter
//!
//! Accident reports carry incident metadata (reported cost, classifier,
//! photo) on top of the shared lifecycle fields. The metadata rides in
//! `TicketExtras::Accident` and never touches the state machine.

use shared::models::{AssetRef, Originator, TechnicianRef};
use shared::ticket::{AccidentRecord, Ticket, TicketCategory, TicketExtras};

use super::{AdapterError, AdapterResult, CategoryAdapter};

pub struct AccidentAdapter;

impl CategoryAdapter for AccidentAdapter {
    type Native = AccidentRecord;

    const CATEGORY: TicketCategory = TicketCategory::Accident;

    fn to_canonical(native: &AccidentRecord) -> Ticket {
        Ticket {
            id: native.id.clone(),
            category: Self::CATEGORY,
            status: native.phase,
            priority: native.impact,
            description: native.summary.clone(),
            asset: AssetRef::from_native_key(native.site_ref.as_deref()),
            assigned_to: native.handler_id.as_ref().map(|id| {
                TechnicianRef::new(
                    id.clone(),
                    native.handler_name.clone().unwrap_or_else(|| id.clone()),
                )
            }),
            opened_by: Originator::from_native_key(native.witness_id.as_deref()),
            created_at: native.occurred_at,
            approval: native.verdict,
            approval_note: native.verdict_note.clone(),
            rejections: native.rejection_log.clone(),
            photo: native.photo.clone(),
            extras: TicketExtras::Accident {
                reported_cost: native.reported_cost,
                croca_type: native.croca_type.clone(),
            },
        }
    }

    fn from_canonical(ticket: &Ticket) -> AdapterResult<AccidentRecord> {
        let TicketExtras::Accident {
            reported_cost,
            croca_type,
        } = &ticket.extras
        else {
            return Err(AdapterError::CategoryMismatch {
                key: ticket.key(),
                expected: Self::CATEGORY,
            });
        };
        if ticket.category != Self::CATEGORY {
            return Err(AdapterError::CategoryMismatch {
                key: ticket.key(),
                expected: Self::CATEGORY,
            });
        }
        Ok(AccidentRecord {
            id: ticket.id.clone(),
            site_ref: ticket.asset.native_key(),
            summary: ticket.description.clone(),
            impact: ticket.priority,
            witness_id: ticket.opened_by.native_key(),
            handler_id: ticket.assigned_to.as_ref().map(|t| t.id.clone()),
            handler_name: ticket.assigned_to.as_ref().map(|t| t.name.clone()),
            phase: ticket.status,
            verdict: ticket.approval,
            verdict_note: ticket.approval_note.clone(),
            occurred_at: ticket.created_at,
            reported_cost: *reported_cost,
            croca_type: croca_type.clone(),
            photo: ticket.photo.clone(),
            rejection_log: ticket.rejections.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ticket::{ApprovalState, Priority, TicketStatus};

    fn record() -> AccidentRecord {
        AccidentRecord {
            id: "a-5".to_string(),
            site_ref: Some("dock-2".to_string()),
            summary: "Pallet truck dented door frame".to_string(),
            impact: Priority::Medium,
            witness_id: Some("u-11".to_string()),
            handler_id: Some("t-7".to_string()),
            handler_name: Some("Mireia".to_string()),
            phase: TicketStatus::PendingApproval,
            verdict: ApprovalState::Pending,
            verdict_note: None,
            occurred_at: 1_698_000_000_000,
            reported_cost: Some(Decimal::new(42050, 2)),
            croca_type: Some("impact".to_string()),
            photo: Some("photos/a-5.jpg".to_string()),
            rejection_log: vec![],
        }
    }

    #[test]
    fn test_roundtrip_keeps_incident_metadata() {
        let native = record();
        let ticket = AccidentAdapter::to_canonical(&native);

        match &ticket.extras {
            TicketExtras::Accident {
                reported_cost,
                croca_type,
            } => {
                assert_eq!(*reported_cost, Some(Decimal::new(42050, 2)));
                assert_eq!(croca_type.as_deref(), Some("impact"));
            }
            other => panic!("expected accident extras, got {:?}", other),
        }
        assert_eq!(ticket.photo.as_deref(), Some("photos/a-5.jpg"));

        let back = AccidentAdapter::from_canonical(&ticket).unwrap();
        assert_eq!(back, native);
    }

    #[test]
    fn test_extras_do_not_affect_lifecycle_fields() {
        let mut native = record();
        native.reported_cost = None;
        native.croca_type = None;
        let ticket = AccidentAdapter::to_canonical(&native);
        assert_eq!(ticket.status, TicketStatus::PendingApproval);
        assert_eq!(ticket.assigned_to.as_ref().unwrap().id, "t-7");
    }
}
