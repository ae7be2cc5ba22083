//! Billing client error types.

use thiserror::Error;

pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Billing service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BillingError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BillingError::ServiceUnavailable(_) => "unavailable",
            BillingError::RequestFailed(_) => "request_failed",
            BillingError::InvalidResponse(_) => "invalid_response",
            BillingError::Timeout(_) => "timeout",
            BillingError::Network(_) => "network",
            BillingError::Json(_) => "json",
        }
    }
}
