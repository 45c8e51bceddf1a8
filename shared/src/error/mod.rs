//! Unified error system for the work-order service
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Ticket lifecycle errors
//! - 5xxx: Review errors
//! - 6xxx: Intake/adapter errors
//! - 7xxx: Aggregation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::TicketNotFound);
//!
//! // Create an error with custom message and context
//! let err = AppError::with_message(ErrorCode::InvalidTransition, "Cannot resolve an open ticket")
//!     .with_detail("ticket_id", "m-17")
//!     .with_detail("event", "RESOLVE");
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
