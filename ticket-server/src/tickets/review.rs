//! Review workflows
//!
//! Reviewer-facing queues and decisions on top of the manager:
//!
//! - **pending queue**: every ticket awaiting a review decision
//! - **rejected queue**: re-opened tickets whose last resolution was
//!   rejected, optionally narrowed to one technician's returned work
//! - **approve / reject**: the two review decisions, serialized per
//!   ticket by the manager so racing reviewers cannot double-decide
//!
//! Queues are derived views over the merged pool snapshot; membership
//! changes the moment a transition lands, with no queue state of its own.

use shared::models::TechnicianRef;
use shared::ticket::{ApprovalState, Ticket, TicketKey, TicketStatus};
use std::sync::Arc;

use super::aggregate::MergedView;
use super::manager::{ManagerResult, TicketManager};

/// Reviewer-facing operations over the ticket pool
#[derive(Debug, Clone)]
pub struct ReviewService {
    manager: Arc<TicketManager>,
}

impl ReviewService {
    pub fn new(manager: Arc<TicketManager>) -> Self {
        Self { manager }
    }

    /// Tickets awaiting a review decision, across all categories
    pub async fn pending(&self) -> MergedView {
        self.manager
            .merged_view()
            .await
            .filter(|t| t.status == TicketStatus::PendingApproval)
    }

    /// Re-opened tickets whose last resolution was rejected
    ///
    /// With a technician id the queue narrows to work rejected while that
    /// technician held the ticket, so they can find what came back to them
    /// even though rejection released the assignment.
    pub async fn rejected(&self, technician_id: Option<&str>) -> MergedView {
        let view = self
            .manager
            .merged_view()
            .await
            .filter(|t| t.status == TicketStatus::Open && t.approval == ApprovalState::Rejected);
        match technician_id {
            Some(id) => view.filter(|t| last_rejected_holder(t) == Some(id)),
            None => view,
        }
    }

    /// Accept the resolution and close the ticket
    pub async fn approve(&self, key: &TicketKey) -> ManagerResult<Ticket> {
        self.manager.approve(key).await
    }

    /// Reject the resolution with a mandatory note, re-opening the ticket
    pub async fn reject(&self, key: &TicketKey, note: &str) -> ManagerResult<Ticket> {
        self.manager.reject(key, note).await
    }
}

/// Technician who held the ticket when it was last rejected
fn last_rejected_holder(ticket: &Ticket) -> Option<&str> {
    ticket
        .rejections
        .last()
        .and_then(|r| r.technician.as_ref())
        .map(|t: &TechnicianRef| t.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::manager::TicketManager;
    use crate::tickets::pool::MemoryPool;
    use shared::ticket::{CleaningRecord, MaintenanceRecord, NativeTicket, Priority};

    fn cleaning(id: &str) -> NativeTicket {
        NativeTicket::Cleaning(CleaningRecord {
            id: id.to_string(),
            zone_ref: None,
            task: format!("task {}", id),
            urgency: Priority::Medium,
            reported_by: None,
            cleaner_id: None,
            cleaner_name: None,
            state: TicketStatus::Open,
            review: ApprovalState::Pending,
            review_note: None,
            opened_at: 1_700_000_000_000,
            rejection_log: vec![],
        })
    }

    fn maintenance(id: &str) -> NativeTicket {
        NativeTicket::Maintenance(MaintenanceRecord {
            id: id.to_string(),
            equipment_ref: None,
            fault_description: format!("fault {}", id),
            severity: Priority::High,
            requested_by: None,
            technician_id: None,
            technician_name: None,
            status: TicketStatus::Open,
            approval: ApprovalState::Pending,
            approval_note: None,
            logged_at: 1_700_000_000_000,
            rejection_log: vec![],
        })
    }

    fn tech(id: &str) -> TechnicianRef {
        TechnicianRef::new(id, format!("Tech {}", id))
    }

    async fn service() -> ReviewService {
        ReviewService::new(Arc::new(TicketManager::new(Arc::new(MemoryPool::new()))))
    }

    async fn resolve_ticket(service: &ReviewService, key: &TicketKey, technician: &str) {
        service
            .manager
            .claim(key, tech(technician))
            .await
            .unwrap();
        service.manager.resolve(key, technician).await.unwrap();
    }

    #[tokio::test]
    async fn test_pending_queue_spans_categories() {
        let service = service().await;
        let c1 = service.manager.open(cleaning("c-1")).await.unwrap().key();
        let m1 = service.manager.open(maintenance("m-1")).await.unwrap().key();
        service.manager.open(cleaning("c-2")).await.unwrap();

        resolve_ticket(&service, &c1, "t-1").await;
        resolve_ticket(&service, &m1, "t-2").await;

        let pending = service.pending().await;
        let ids: Vec<&str> = pending.rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "m-1"]);
    }

    #[tokio::test]
    async fn test_approve_removes_from_pending() {
        let service = service().await;
        let key = service.manager.open(cleaning("c-1")).await.unwrap().key();
        resolve_ticket(&service, &key, "t-1").await;
        assert_eq!(service.pending().await.rows.len(), 1);

        let closed = service.approve(&key).await.unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(service.pending().await.rows.is_empty());
        assert!(service.rejected(None).await.rows.is_empty());
    }

    #[tokio::test]
    async fn test_reject_moves_to_rejected_queue() {
        let service = service().await;
        let key = service.manager.open(cleaning("c-1")).await.unwrap().key();
        resolve_ticket(&service, &key, "t-1").await;

        let reopened = service.reject(&key, "streaks on the glass").await.unwrap();
        assert_eq!(reopened.status, TicketStatus::Open);

        assert!(service.pending().await.rows.is_empty());
        let rejected = service.rejected(None).await;
        assert_eq!(rejected.rows.len(), 1);
        assert_eq!(
            rejected.rows[0].approval_note.as_deref(),
            Some("streaks on the glass")
        );
    }

    #[tokio::test]
    async fn test_rejected_queue_filters_by_last_holder() {
        let service = service().await;
        let c1 = service.manager.open(cleaning("c-1")).await.unwrap().key();
        let m1 = service.manager.open(maintenance("m-1")).await.unwrap().key();

        resolve_ticket(&service, &c1, "t-1").await;
        resolve_ticket(&service, &m1, "t-2").await;
        service.reject(&c1, "redo").await.unwrap();
        service.reject(&m1, "wrong part").await.unwrap();

        let mine = service.rejected(Some("t-2")).await;
        assert_eq!(mine.rows.len(), 1);
        assert_eq!(mine.rows[0].id, "m-1");
        assert!(service.rejected(Some("t-9")).await.rows.is_empty());
    }

    #[tokio::test]
    async fn test_reclaimed_rejection_leaves_rejected_queue() {
        let service = service().await;
        let key = service.manager.open(cleaning("c-1")).await.unwrap().key();
        resolve_ticket(&service, &key, "t-1").await;
        service.reject(&key, "redo").await.unwrap();
        assert_eq!(service.rejected(None).await.rows.len(), 1);

        // Reclaiming takes the ticket out of the returned-work queue
        service.manager.claim(&key, tech("t-3")).await.unwrap();
        assert!(service.rejected(None).await.rows.is_empty());
    }
}
