//! Ticket Server - unified work-order management for facility operations
//!
//! # Architecture Overview
//!
//! Three work-order categories (cleaning, maintenance, accident) are
//! normalized into one canonical ticket model and share a single
//! lifecycle, claim arbitration, and review workflow:
//!
//! - **tickets** (`tickets`): adapters, canonical pool, lifecycle state
//!   machine, claim coordination, merged views, review queues, intake
//! - **HTTP API** (`api`): RESTful routes over the ticket services
//! - **core** (`core`): configuration, server state, HTTP server
//! - **utils** (`utils`): logging setup and shared error re-exports
//!
//! # Module Structure
//!
//! ```text
//! ticket-server/src/
//! ├── core/          # Config, state, server, errors
//! ├── api/           # HTTP routes and handlers
//! ├── tickets/       # Work-order domain (adapters, lifecycle, queues)
//! └── utils/         # Logging, error re-exports
//! ```

pub mod api;
pub mod core;
pub mod tickets;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use tickets::{IntakeService, ReviewService, TicketManager};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
///
/// Call once at startup, before anything logs.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  _______      __        __
 /_  __(_)____/ /_____  / /_
  / / / / ___/ //_/ _ \/ __/
 / / / / /__/ ,< /  __/ /_
/_/ /_/\___/_/|_|\___/\__/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
