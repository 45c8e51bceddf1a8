//! Ticket lifecycle state machine
//!
//! Pure transition logic over the canonical ticket:
//!
//! ```text
//! Open ──claim──▶ Claimed ──resolve──▶ PendingApproval ──approve──▶ Closed
//!   ▲                                        │
//!   └────────────────reject(note)────────────┘
//! ```
//!
//! `transition` never mutates its input; it returns the post-transition
//! ticket or a typed error, and the caller decides whether to persist.
//! Concurrency is not handled here — the manager serializes calls per
//! ticket before invoking this module.

use shared::models::TechnicianRef;
use shared::ticket::{ApprovalState, RejectionRecord, Ticket, TicketKey, TicketStatus};
use thiserror::Error;

/// A lifecycle event requested by a caller
#[derive(Debug, Clone)]
pub enum TransitionEvent {
    /// Technician takes ownership of an open ticket
    Claim { technician: TechnicianRef },
    /// Assigned technician marks the work done
    Resolve { technician_id: String },
    /// Reviewer accepts the resolution
    Approve,
    /// Reviewer rejects the resolution with a mandatory note
    Reject { note: String },
}

impl TransitionEvent {
    /// Event name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Claim { .. } => "CLAIM",
            Self::Resolve { .. } => "RESOLVE",
            Self::Approve => "APPROVE",
            Self::Reject { .. } => "REJECT",
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    #[error("{event} not allowed: ticket {key} is {status:?}")]
    InvalidTransition {
        key: TicketKey,
        event: &'static str,
        status: TicketStatus,
    },

    #[error("Ticket {key} is already claimed by {holder}")]
    AlreadyClaimed { key: TicketKey, holder: String },

    #[error("Ticket {0} has already been reviewed")]
    AlreadyReviewed(TicketKey),

    #[error("Ticket {key} is assigned to {assigned}, not {caller}")]
    NotAssignee {
        key: TicketKey,
        assigned: String,
        caller: String,
    },

    #[error("Rejection requires a non-empty note")]
    NoteRequired,
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Apply a lifecycle event to a ticket snapshot
///
/// `now` is the event timestamp in epoch millis; it is only recorded on
/// rejection (audit history) so tests can pass a fixed value.
pub fn transition(ticket: &Ticket, event: &TransitionEvent, now: i64) -> LifecycleResult<Ticket> {
    match event {
        TransitionEvent::Claim { technician } => claim(ticket, technician),
        TransitionEvent::Resolve { technician_id } => resolve(ticket, technician_id),
        TransitionEvent::Approve => approve(ticket),
        TransitionEvent::Reject { note } => reject(ticket, note, now),
    }
}

fn claim(ticket: &Ticket, technician: &TechnicianRef) -> LifecycleResult<Ticket> {
    match ticket.status {
        TicketStatus::Open => {
            // An open ticket with a holder would violate the pool invariant;
            // treat it as claimed rather than overwrite the assignment.
            if let Some(holder) = &ticket.assigned_to {
                return Err(LifecycleError::AlreadyClaimed {
                    key: ticket.key(),
                    holder: holder.id.clone(),
                });
            }
            let mut next = ticket.clone();
            next.status = TicketStatus::Claimed;
            next.assigned_to = Some(technician.clone());
            Ok(next)
        }
        TicketStatus::Claimed | TicketStatus::PendingApproval => {
            Err(LifecycleError::AlreadyClaimed {
                key: ticket.key(),
                holder: ticket
                    .assigned_to
                    .as_ref()
                    .map(|t| t.id.clone())
                    .unwrap_or_default(),
            })
        }
        TicketStatus::Closed => Err(LifecycleError::InvalidTransition {
            key: ticket.key(),
            event: "CLAIM",
            status: ticket.status,
        }),
    }
}

fn resolve(ticket: &Ticket, technician_id: &str) -> LifecycleResult<Ticket> {
    if ticket.status != TicketStatus::Claimed {
        return Err(LifecycleError::InvalidTransition {
            key: ticket.key(),
            event: "RESOLVE",
            status: ticket.status,
        });
    }
    // A claimed ticket without a holder is corrupt; refuse the event.
    let Some(assigned) = ticket.assigned_to.as_ref() else {
        return Err(LifecycleError::InvalidTransition {
            key: ticket.key(),
            event: "RESOLVE",
            status: ticket.status,
        });
    };
    if assigned.id != technician_id {
        return Err(LifecycleError::NotAssignee {
            key: ticket.key(),
            assigned: assigned.id.clone(),
            caller: technician_id.to_string(),
        });
    }
    let mut next = ticket.clone();
    next.status = TicketStatus::PendingApproval;
    // A fresh resolution attempt resets the review decision; any prior
    // rejection note stays in `rejections` for audit.
    next.approval = ApprovalState::Pending;
    next.approval_note = None;
    Ok(next)
}

fn approve(ticket: &Ticket) -> LifecycleResult<Ticket> {
    if ticket.status != TicketStatus::PendingApproval {
        return Err(review_failure(ticket, "APPROVE"));
    }
    let mut next = ticket.clone();
    next.status = TicketStatus::Closed;
    next.approval = ApprovalState::Approved;
    Ok(next)
}

fn reject(ticket: &Ticket, note: &str, now: i64) -> LifecycleResult<Ticket> {
    if note.trim().is_empty() {
        return Err(LifecycleError::NoteRequired);
    }
    if ticket.status != TicketStatus::PendingApproval {
        return Err(review_failure(ticket, "REJECT"));
    }
    let mut next = ticket.clone();
    next.status = TicketStatus::Open;
    next.approval = ApprovalState::Rejected;
    next.approval_note = Some(note.to_string());
    next.rejections.push(RejectionRecord {
        note: note.to_string(),
        rejected_at: now,
        technician: ticket.assigned_to.clone(),
    });
    next.assigned_to = None;
    Ok(next)
}

/// Classify a review attempt against a ticket that is not pending approval
///
/// A closed ticket, or one re-opened by a rejection, has already been
/// reviewed for its last resolution attempt; the second reviewer gets an
/// idempotent `AlreadyReviewed` rather than a state-shaped error.
fn review_failure(ticket: &Ticket, event: &'static str) -> LifecycleError {
    match (ticket.status, ticket.approval) {
        (TicketStatus::Closed, _) | (_, ApprovalState::Rejected) => {
            LifecycleError::AlreadyReviewed(ticket.key())
        }
        _ => LifecycleError::InvalidTransition {
            key: ticket.key(),
            event,
            status: ticket.status,
        },
    }
}
