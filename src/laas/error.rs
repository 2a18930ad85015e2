//! Review-service specific error handling.

use thiserror::Error;

/// Review-service specific errors.
#[derive(Error, Debug)]
pub enum LaasError {
    /// The service answered with a non-2xx HTTP status.
    #[error("Review request failed: {0}")]
    RequestFailed(String),

    /// The service answered 2xx but the body carried an error payload.
    #[error("Review service error: {0}")]
    ServiceError(String),

    /// The response body could not be interpreted.
    #[error("Invalid response format from review service: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

// Note: anyhow already has a blanket impl for thiserror::Error types
