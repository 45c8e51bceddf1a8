//! Unified error codes for the work-order system
//!
//! This module defines all error codes used across the ticket server and
//! its clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Ticket lifecycle errors
//! - 5xxx: Review errors
//! - 6xxx: Intake/adapter errors
//! - 7xxx: Aggregation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 4xxx: Ticket lifecycle ====================
    /// Ticket not found
    TicketNotFound = 4001,
    /// Attempted lifecycle event is not legal from the ticket's current state
    InvalidTransition = 4002,
    /// Ticket is already claimed by another technician
    TicketAlreadyClaimed = 4003,
    /// Caller is not the technician assigned to the ticket
    NotAssignee = 4004,

    // ==================== 5xxx: Review ====================
    /// Ticket has already been reviewed for this resolution attempt
    TicketAlreadyReviewed = 5001,
    /// Rejection requires a non-empty note
    RejectNoteRequired = 5002,

    // ==================== 6xxx: Intake / adapter ====================
    /// Unknown ticket category
    UnknownCategory = 6001,
    /// Category-native record could not be translated
    MalformedRecord = 6002,

    // ==================== 7xxx: Aggregation ====================
    /// A category's ticket source failed to load
    CategorySourceUnavailable = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Ticket pool storage error
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Ticket lifecycle
            ErrorCode::TicketNotFound => "Ticket not found",
            ErrorCode::InvalidTransition => "Transition not allowed from current ticket state",
            ErrorCode::TicketAlreadyClaimed => "Ticket is already claimed by another technician",
            ErrorCode::NotAssignee => "Caller is not assigned to this ticket",

            // Review
            ErrorCode::TicketAlreadyReviewed => "Ticket has already been reviewed",
            ErrorCode::RejectNoteRequired => "Rejection requires a non-empty note",

            // Intake / adapter
            ErrorCode::UnknownCategory => "Unknown ticket category",
            ErrorCode::MalformedRecord => "Category-native record could not be translated",

            // Aggregation
            ErrorCode::CategorySourceUnavailable => "Ticket source for category is unavailable",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Ticket pool storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::RequiredField,
            4001 => ErrorCode::TicketNotFound,
            4002 => ErrorCode::InvalidTransition,
            4003 => ErrorCode::TicketAlreadyClaimed,
            4004 => ErrorCode::NotAssignee,
            5001 => ErrorCode::TicketAlreadyReviewed,
            5002 => ErrorCode::RejectNoteRequired,
            6001 => ErrorCode::UnknownCategory,
            6002 => ErrorCode::MalformedRecord,
            7001 => ErrorCode::CategorySourceUnavailable,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::StorageError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code(), self.message())
    }
}
