//! Payment processor port for order creation and payment capture.
//!
//! Defines the contract for the processor integration (Razorpay).
//! Implementations make exactly one upstream call per operation and never
//! retry; callers decide how a failure surfaces.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payment::{CaptureMode, Currency, MinorUnits, Notes};

/// Port for payment processor integrations.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an order that the client checkout will pay against.
    ///
    /// Returns the processor-assigned order id and the full response body.
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProcessorOrder, ProcessorError>;

    /// Capture an authorized payment.
    ///
    /// Only needed when orders are created with manual capture.
    async fn capture_payment(&self, request: CapturePaymentRequest) -> Result<(), ProcessorError>;
}

/// Request to create an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRequest {
    pub amount: MinorUnits,
    pub currency: Currency,
    pub receipt: String,
    pub capture_mode: CaptureMode,
    pub notes: Notes,
}

/// Order as returned by the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorOrder {
    /// Processor's order id (`order_xxx`).
    pub id: String,

    /// Raw response body, returned to the client unchanged.
    pub payload: Value,
}

/// Request to capture an authorized payment.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePaymentRequest {
    pub payment_id: String,
    pub amount: MinorUnits,
    pub currency: Currency,
}

/// Errors from payment processor operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorError {
    /// Error code for categorization.
    pub code: ProcessorErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Processor's own error code (if available).
    pub provider_code: Option<String>,
}

impl ProcessorError {
    pub fn new(code: ProcessorErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Attach the processor's error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::AuthenticationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::BadRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.provider_code {
            Some(provider_code) => write!(f, "{} ({}): {}", self.code, provider_code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ProcessorError {}

/// Processor error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// Key id / key secret rejected.
    AuthenticationError,

    /// Processor rejected the request parameters.
    BadRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Processor-side failure or unreadable response.
    ProviderError,
}

impl std::fmt::Display for ProcessorErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessorErrorCode::NetworkError => "network_error",
            ProcessorErrorCode::AuthenticationError => "authentication_error",
            ProcessorErrorCode::BadRequest => "bad_request",
            ProcessorErrorCode::NotFound => "not_found",
            ProcessorErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            ProcessorErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_processor_is_object_safe() {
        fn _accepts_dyn(_processor: &dyn PaymentProcessor) {}
    }

    #[test]
    fn processor_error_display() {
        let err = ProcessorError::bad_request("The amount must be at least INR 1.00")
            .with_provider_code("BAD_REQUEST_ERROR");

        let text = err.to_string();
        assert!(text.contains("bad_request"));
        assert!(text.contains("BAD_REQUEST_ERROR"));
        assert!(text.contains("The amount must be at least INR 1.00"));
    }

    #[test]
    fn processor_error_without_provider_code() {
        let err = ProcessorError::network("connection reset");
        assert_eq!(err.to_string(), "network_error: connection reset");
        assert_eq!(err.provider_code, None);
    }
}
