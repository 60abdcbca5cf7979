//! Payment error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | InvalidRequest | 400 | `invalid_request` |
//! | InvalidSignature | 400 | `invalid_signature` |
//! | OrderCreationFailed | 500 | `order_creation_failed` |
//! | Upstream | 500 | `upstream_error` |
//! | Persistence | 500 | `persistence_error` |

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the payment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Malformed or missing input (client fault).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Signature did not match the expected HMAC.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The processor rejected or failed the order creation call.
    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),

    /// Any other processor failure.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Document store write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl PaymentError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        PaymentError::InvalidRequest(message.into())
    }

    pub fn order_creation_failed(detail: impl Into<String>) -> Self {
        PaymentError::OrderCreationFailed(detail.into())
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        PaymentError::Upstream(detail.into())
    }

    pub fn persistence(detail: impl Into<String>) -> Self {
        PaymentError::Persistence(detail.into())
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::InvalidRequest(_) => "invalid_request",
            PaymentError::InvalidSignature => "invalid_signature",
            PaymentError::OrderCreationFailed(_) => "order_creation_failed",
            PaymentError::Upstream(_) => "upstream_error",
            PaymentError::Persistence(_) => "persistence_error",
        }
    }

    /// Optional detail string attached to the error body.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PaymentError::InvalidRequest(detail)
            | PaymentError::OrderCreationFailed(detail)
            | PaymentError::Upstream(detail)
            | PaymentError::Persistence(detail) => Some(detail),
            PaymentError::InvalidSignature => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::InvalidRequest(_) | PaymentError::InvalidSignature => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::OrderCreationFailed(_)
            | PaymentError::Upstream(_)
            | PaymentError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors caused by the caller rather than a dependency.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
