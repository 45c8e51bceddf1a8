use std::sync::Arc;

use crate::core::Config;
use crate::tickets::{IntakeService, MemoryPool, ReviewService, TicketManager, TicketStore};

/// Server state - shared handles to every service
///
/// Cloning is shallow; all services sit behind `Arc`.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | manager | Arc<TicketManager> | Lifecycle execution and claim arbitration |
/// | intake | IntakeService | Validated work-order entry point |
/// | review | ReviewService | Reviewer queues and decisions |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub manager: Arc<TicketManager>,
    pub intake: IntakeService,
    pub review: ReviewService,
}

impl ServerState {
    /// Initialize the server state around an in-memory canonical pool
    pub fn initialize(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryPool::new()))
    }

    /// Initialize with a specific store implementation
    pub fn with_store(config: &Config, store: Arc<dyn TicketStore>) -> Self {
        let manager = Arc::new(TicketManager::new(store));
        Self {
            config: config.clone(),
            intake: IntakeService::new(manager.clone()),
            review: ReviewService::new(manager.clone()),
            manager,
        }
    }
}
