use super::*;
use async_trait::async_trait;
use shared::models::TechnicianRef;
use shared::ticket::{AccidentRecord, CleaningRecord, MaintenanceRecord};
use std::sync::Arc;

mod test_queues;

fn create_test_manager() -> Arc<TicketManager> {
    Arc::new(TicketManager::new(Arc::new(MemoryPool::new())))
}

fn tech(id: &str) -> TechnicianRef {
    TechnicianRef::new(id, format!("Tech {}", id))
}

fn cleaning_record(id: &str, task: &str, opened_at: i64) -> NativeTicket {
    NativeTicket::Cleaning(CleaningRecord {
        id: id.to_string(),
        zone_ref: None,
        task: task.to_string(),
        urgency: Priority::Medium,
        reported_by: Some("u-1".to_string()),
        cleaner_id: None,
        cleaner_name: None,
        state: TicketStatus::Open,
        review: ApprovalState::Pending,
        review_note: None,
        opened_at,
        rejection_log: vec![],
    })
}

fn maintenance_record(id: &str, fault: &str, logged_at: i64) -> NativeTicket {
    NativeTicket::Maintenance(MaintenanceRecord {
        id: id.to_string(),
        equipment_ref: None,
        fault_description: fault.to_string(),
        severity: Priority::High,
        requested_by: None,
        technician_id: None,
        technician_name: None,
        status: TicketStatus::Open,
        approval: ApprovalState::Pending,
        approval_note: None,
        logged_at,
        rejection_log: vec![],
    })
}

fn accident_record(id: &str, summary: &str, occurred_at: i64) -> NativeTicket {
    NativeTicket::Accident(AccidentRecord {
        id: id.to_string(),
        site_ref: None,
        summary: summary.to_string(),
        impact: Priority::High,
        witness_id: Some("u-2".to_string()),
        handler_id: None,
        handler_name: None,
        phase: TicketStatus::Open,
        verdict: ApprovalState::Pending,
        verdict_note: None,
        occurred_at,
        reported_cost: None,
        croca_type: None,
        photo: None,
        rejection_log: vec![],
    })
}

/// Store wrapper that fails one category's listing, for degraded-merge tests
struct FlakyStore {
    inner: MemoryPool,
    failing: TicketCategory,
}

#[async_trait]
impl TicketStore for FlakyStore {
    async fn get(&self, key: &TicketKey) -> Result<Option<Ticket>, StoreError> {
        self.inner.get(key).await
    }

    async fn insert(&self, ticket: Ticket) -> Result<(), StoreError> {
        self.inner.insert(ticket).await
    }

    async fn update(&self, ticket: Ticket) -> Result<(), StoreError> {
        self.inner.update(ticket).await
    }

    async fn list(&self, category: TicketCategory) -> Result<Vec<Ticket>, StoreError> {
        if category == self.failing {
            return Err(StoreError::Unavailable {
                category,
                reason: "source offline".to_string(),
            });
        }
        self.inner.list(category).await
    }
}
