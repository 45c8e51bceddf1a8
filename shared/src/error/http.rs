//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::TicketNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (state races and double-apply attempts)
            Self::AlreadyExists
            | Self::InvalidTransition
            | Self::TicketAlreadyClaimed
            | Self::TicketAlreadyReviewed => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::NotAssignee => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::CategorySourceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/intake errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::TicketNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::TicketAlreadyClaimed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::TicketAlreadyReviewed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidTransition.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::RejectNoteRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::CategorySourceUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
