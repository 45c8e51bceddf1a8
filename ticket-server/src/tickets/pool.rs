//! Canonical ticket pool
//!
//! [`TicketStore`] is the persistence boundary from the spec's external
//! interface contract; [`MemoryPool`] is the in-process canonical pool
//! and the sole source of truth for ticket state. Reads hand out whole
//! ticket clones, so a reader sees a ticket either fully pre- or fully
//! post-transition, never torn.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::ticket::{Ticket, TicketCategory, TicketKey};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ticket not found: {0}")]
    NotFound(TicketKey),

    #[error("Ticket already exists: {0}")]
    Duplicate(TicketKey),

    #[error("Ticket source for {category} unavailable: {reason}")]
    Unavailable {
        category: TicketCategory,
        reason: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for canonical tickets
///
/// Implementations must apply `update` atomically with respect to other
/// calls for the same key; the manager additionally serializes
/// read-modify-write sections per ticket.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Full snapshot of one ticket
    async fn get(&self, key: &TicketKey) -> StoreResult<Option<Ticket>>;

    /// Insert a newly opened ticket; fails on duplicate (category, id)
    async fn insert(&self, ticket: Ticket) -> StoreResult<()>;

    /// Replace an existing ticket after an accepted transition
    async fn update(&self, ticket: Ticket) -> StoreResult<()>;

    /// All tickets of one category (a failing category source returns
    /// `StoreError::Unavailable`, which the aggregation engine degrades on)
    async fn list(&self, category: TicketCategory) -> StoreResult<Vec<Ticket>>;
}

/// DashMap-backed canonical pool
#[derive(Debug, Default)]
pub struct MemoryPool {
    tickets: DashMap<TicketKey, Ticket>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[async_trait]
impl TicketStore for MemoryPool {
    async fn get(&self, key: &TicketKey) -> StoreResult<Option<Ticket>> {
        Ok(self.tickets.get(key).map(|entry| entry.clone()))
    }

    async fn insert(&self, ticket: Ticket) -> StoreResult<()> {
        let key = ticket.key();
        match self.tickets.entry(key.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(key)),
            Entry::Vacant(slot) => {
                slot.insert(ticket);
                Ok(())
            }
        }
    }

    async fn update(&self, ticket: Ticket) -> StoreResult<()> {
        let key = ticket.key();
        match self.tickets.get_mut(&key) {
            Some(mut entry) => {
                *entry = ticket;
                Ok(())
            }
            None => Err(StoreError::NotFound(key)),
        }
    }

    async fn list(&self, category: TicketCategory) -> StoreResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|entry| entry.key().category == category)
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; callers rely on a
        // deterministic per-category listing.
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tickets)
    }
}
