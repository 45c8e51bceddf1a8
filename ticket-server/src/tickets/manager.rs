//! TicketManager - lifecycle execution and claim coordination
//!
//! This module handles:
//! - Intake of native records into the canonical pool
//! - Serialized read-transition-write per ticket (claim arbitration)
//! - Event broadcasting after accepted transitions
//!
//! # Transition Flow
//!
//! ```text
//! claim / resolve / approve / reject
//!     ├─ 1. Acquire the per-ticket lock
//!     ├─ 2. Load the current snapshot from the pool
//!     ├─ 3. Apply the pure lifecycle transition
//!     ├─ 4. Persist the post-transition ticket
//!     ├─ 5. Release the lock
//!     ├─ 6. Broadcast the event
//!     └─ 7. Return the new snapshot
//! ```
//!
//! Concurrent claims for the same ticket queue on step 1; the first
//! writer wins and every later caller fails in step 3 against the
//! updated snapshot. Callers reconcile by reading the returned error
//! plus the current state, never by retrying blindly.

use dashmap::DashMap;
use shared::error::{AppError, ErrorCode};
use shared::models::TechnicianRef;
use shared::ticket::{NativeTicket, Ticket, TicketCategory, TicketEvent, TicketEventKind, TicketKey};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, broadcast};

use super::adapter::{self, AdapterError};
use super::aggregate::MergedView;
use super::lifecycle::{self, LifecycleError, TransitionEvent};
use super::pool::{StoreError, TicketStore};

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketKey),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TicketNotFound(key) => AppError::ticket_not_found(key.to_string()),
            ManagerError::Lifecycle(e) => match &e {
                LifecycleError::InvalidTransition { .. } => {
                    AppError::invalid_transition(e.to_string())
                }
                LifecycleError::AlreadyClaimed { .. } => AppError::already_claimed(e.to_string()),
                LifecycleError::AlreadyReviewed(_) => AppError::already_reviewed(e.to_string()),
                LifecycleError::NotAssignee { .. } => AppError::not_assignee(e.to_string()),
                LifecycleError::NoteRequired => AppError::note_required(),
            },
            ManagerError::Adapter(e) => {
                AppError::with_message(ErrorCode::MalformedRecord, e.to_string())
            }
            ManagerError::Storage(e) => match &e {
                StoreError::NotFound(key) => AppError::ticket_not_found(key.to_string()),
                StoreError::Unavailable { category, reason } => {
                    AppError::source_unavailable(category.to_string(), reason.clone())
                }
                other => {
                    tracing::error!(error = %other, "Storage error during ticket operation");
                    AppError::storage(other.to_string())
                }
            },
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Event broadcast channel capacity (one ticket produces at most a
/// handful of events, so this rides out long reconnect windows)
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// TicketManager for lifecycle execution
///
/// Owns the canonical pool behind a `TicketStore` and a per-ticket lock
/// map. Transitions for different tickets run in parallel; transitions
/// for the same ticket are serialized, which is what makes claiming
/// exclusive under concurrency.
pub struct TicketManager {
    pool: Arc<dyn TicketStore>,
    /// Per-ticket critical section guards; an entry lives as long as the
    /// ticket and is cheap enough to never evict
    locks: DashMap<TicketKey, Arc<Mutex<()>>>,
    event_tx: broadcast::Sender<TicketEvent>,
}

impl std::fmt::Debug for TicketManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketManager")
            .field("pool", &"<TicketStore>")
            .field("locks", &self.locks.len())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl TicketManager {
    pub fn new(pool: Arc<dyn TicketStore>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            pool,
            locks: DashMap::new(),
            event_tx,
        }
    }

    /// Subscribe to ticket event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<TicketEvent> {
        self.event_tx.subscribe()
    }

    /// Normalize a native record and admit it into the pool
    pub async fn open(&self, native: NativeTicket) -> ManagerResult<Ticket> {
        let ticket = adapter::to_canonical(&native);
        self.pool.insert(ticket.clone()).await?;
        tracing::info!(
            key = %ticket.key(),
            priority = ?ticket.priority,
            "Ticket opened"
        );
        self.broadcast(TicketEventKind::Opened, &ticket);
        Ok(ticket)
    }

    /// Technician claims an open ticket (first writer wins)
    pub async fn claim(&self, key: &TicketKey, technician: TechnicianRef) -> ManagerResult<Ticket> {
        let technician_id = technician.id.clone();
        let ticket = self
            .apply(key, TransitionEvent::Claim { technician }, TicketEventKind::Claimed)
            .await?;
        tracing::info!(key = %key, technician = %technician_id, "Ticket claimed");
        Ok(ticket)
    }

    /// Assigned technician submits the work for approval
    pub async fn resolve(&self, key: &TicketKey, technician_id: &str) -> ManagerResult<Ticket> {
        let ticket = self
            .apply(
                key,
                TransitionEvent::Resolve {
                    technician_id: technician_id.to_string(),
                },
                TicketEventKind::Resolved,
            )
            .await?;
        tracing::info!(key = %key, technician = %technician_id, "Ticket resolved");
        Ok(ticket)
    }

    /// Reviewer accepts the resolution and closes the ticket
    pub async fn approve(&self, key: &TicketKey) -> ManagerResult<Ticket> {
        let ticket = self
            .apply(key, TransitionEvent::Approve, TicketEventKind::Approved)
            .await?;
        tracing::info!(key = %key, "Ticket approved and closed");
        Ok(ticket)
    }

    /// Reviewer rejects the resolution, re-opening the ticket
    pub async fn reject(&self, key: &TicketKey, note: &str) -> ManagerResult<Ticket> {
        let ticket = self
            .apply(
                key,
                TransitionEvent::Reject {
                    note: note.to_string(),
                },
                TicketEventKind::Rejected,
            )
            .await?;
        tracing::info!(key = %key, "Ticket rejected and re-opened");
        Ok(ticket)
    }

    /// Current snapshot of one ticket (reconciliation read for callers
    /// that lost a claim race)
    pub async fn get(&self, key: &TicketKey) -> ManagerResult<Ticket> {
        self.pool
            .get(key)
            .await?
            .ok_or_else(|| ManagerError::TicketNotFound(key.clone()))
    }

    /// Current snapshot translated back into its category's native shape
    pub async fn native_snapshot(&self, key: &TicketKey) -> ManagerResult<NativeTicket> {
        let ticket = self.get(key).await?;
        Ok(adapter::to_native(&ticket)?)
    }

    /// All tickets of one category, in creation order
    pub async fn list(&self, category: TicketCategory) -> ManagerResult<Vec<Ticket>> {
        Ok(self.pool.list(category).await?)
    }

    /// Merged view over every category, degrading on failed sources
    pub async fn merged_view(&self) -> MergedView {
        let mut sources = Vec::with_capacity(TicketCategory::ALL.len());
        for category in TicketCategory::ALL {
            sources.push((category, self.pool.list(category).await));
        }
        MergedView::merge(sources)
    }

    /// Run one lifecycle event under the ticket's lock and persist the result
    async fn apply(
        &self,
        key: &TicketKey,
        event: TransitionEvent,
        kind: TicketEventKind,
    ) -> ManagerResult<Ticket> {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        let current = self
            .pool
            .get(key)
            .await?
            .ok_or_else(|| ManagerError::TicketNotFound(key.clone()))?;

        let now = chrono::Utc::now().timestamp_millis();
        let next = lifecycle::transition(&current, &event, now).inspect_err(|err| {
            tracing::debug!(key = %key, event = event.name(), error = %err, "Transition refused");
        })?;

        self.pool.update(next.clone()).await?;
        drop(_guard);

        self.broadcast(kind, &next);
        Ok(next)
    }

    fn lock_for(&self, key: &TicketKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn broadcast(&self, kind: TicketEventKind, ticket: &Ticket) {
        // Send fails only when no subscriber exists, which is fine
        let _ = self.event_tx.send(TicketEvent::new(kind, ticket.clone()));
    }
}
