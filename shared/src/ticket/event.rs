//! Ticket change events broadcast to view collaborators

use serde::{Deserialize, Serialize};

use super::canonical::{Ticket, TicketKey};

/// Kind of accepted change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketEventKind {
    Opened,
    Claimed,
    Resolved,
    Approved,
    Rejected,
}

/// Broadcast payload emitted after every accepted transition
///
/// Carries the full post-transition ticket so view layers can reconcile
/// optimistic local state without a follow-up read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketEvent {
    pub key: TicketKey,
    pub kind: TicketEventKind,
    pub ticket: Ticket,
    /// Epoch millis
    pub timestamp: i64,
}

impl TicketEvent {
    pub fn new(kind: TicketEventKind, ticket: Ticket) -> Self {
        Self {
            key: ticket.key(),
            kind,
            timestamp: chrono::Utc::now().timestamp_millis(),
            ticket,
        }
    }
}
