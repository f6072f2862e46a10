//! Store operation errors.

use pixloft_core::AppError;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => AppError::NotFound(message),
            StoreError::PermissionDenied(message) => AppError::Unauthenticated(message),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixloft_core::ErrorMetadata;

    #[test]
    fn test_store_errors_map_to_app_error_statuses() {
        let err: AppError = StoreError::NotFound("file missing".to_string()).into();
        assert_eq!(err.http_status_code(), 404);

        let err: AppError = StoreError::PermissionDenied("no session".to_string()).into();
        assert_eq!(err.http_status_code(), 401);

        let err: AppError = StoreError::Api {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Image fetch failed");
    }
}
