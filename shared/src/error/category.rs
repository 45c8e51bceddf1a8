//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Ticket lifecycle errors
/// - 5xxx: Review errors
/// - 6xxx: Intake/adapter errors
/// - 7xxx: Aggregation errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Ticket lifecycle errors (4xxx)
    Ticket,
    /// Review errors (5xxx)
    Review,
    /// Intake/adapter errors (6xxx)
    Intake,
    /// Aggregation errors (7xxx)
    Aggregation,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..4000 => Self::General,
            4000..5000 => Self::Ticket,
            5000..6000 => Self::Review,
            6000..7000 => Self::Intake,
            7000..8000 => Self::Aggregation,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Ticket => "ticket",
            Self::Review => "review",
            Self::Intake => "intake",
            Self::Aggregation => "aggregation",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
