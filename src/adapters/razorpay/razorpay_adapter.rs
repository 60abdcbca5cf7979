//! Razorpay payment processor adapter.
//!
//! Implements the `PaymentProcessor` trait against the Razorpay REST API.
//! Requests authenticate with HTTP basic auth (key id / key secret) and are
//! sent exactly once; failures are mapped from Razorpay's error envelope.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayApiConfig::new(key_id, key_secret);
//! let adapter = RazorpayPaymentAdapter::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::ports::{
    CapturePaymentRequest, CreateOrderRequest, PaymentProcessor, ProcessorError,
    ProcessorErrorCode, ProcessorOrder,
};

use super::api_types::{RazorpayCaptureBody, RazorpayErrorEnvelope, RazorpayOrderBody};

/// Default Razorpay API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";

/// Per-request timeout for processor calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayApiConfig {
    /// Public key id (`rzp_test_...` or `rzp_live_...`).
    key_id: String,

    /// Key secret, also used to sign checkout confirmations.
    key_secret: SecretString,

    /// Base URL for the API (default: https://api.razorpay.com).
    api_base_url: String,

    timeout: Duration,
}

impl RazorpayApiConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

impl std::fmt::Debug for RazorpayApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayApiConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Razorpay payment processor adapter.
pub struct RazorpayPaymentAdapter {
    config: RazorpayApiConfig,
    http_client: reqwest::Client,
}

impl RazorpayPaymentAdapter {
    pub fn new(config: RazorpayApiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// POSTs a JSON body and returns the parsed JSON response.
    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Value, ProcessorError> {
        let response = self
            .http_client
            .post(self.url(path))
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Razorpay request failed");
                ProcessorError::network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProcessorError::network(e.to_string()))?;

        if !status.is_success() {
            let err = map_error_response(status, &text);
            tracing::error!(
                operation,
                status = status.as_u16(),
                provider_code = err.provider_code.as_deref().unwrap_or(""),
                error = %err.message,
                "Razorpay API error"
            );
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| {
            ProcessorError::provider(format!("Failed to parse Razorpay response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProcessor for RazorpayPaymentAdapter {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProcessorOrder, ProcessorError> {
        let body = RazorpayOrderBody::from(&request);
        let payload = self.post_json("create_order", "/v1/orders", &body).await?;

        let id = payload
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProcessorError::provider("Razorpay order response has no id"))?;

        tracing::debug!(order_id = %id, amount = request.amount.value(), "Razorpay order created");

        Ok(ProcessorOrder { id, payload })
    }

    async fn capture_payment(&self, request: CapturePaymentRequest) -> Result<(), ProcessorError> {
        let body = RazorpayCaptureBody::from(&request);
        let path = format!("/v1/payments/{}/capture", request.payment_id);

        self.post_json("capture_payment", &path, &body).await?;

        tracing::debug!(payment_id = %request.payment_id, "Razorpay payment captured");
        Ok(())
    }
}

/// Maps a non-2xx response to a `ProcessorError`.
///
/// Uses the envelope's description and code when the body is a Razorpay
/// error envelope, and the raw body otherwise.
pub(crate) fn map_error_response(status: StatusCode, body: &str) -> ProcessorError {
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProcessorErrorCode::AuthenticationError,
        StatusCode::NOT_FOUND => ProcessorErrorCode::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ProcessorErrorCode::RateLimitExceeded,
        s if s.is_client_error() => ProcessorErrorCode::BadRequest,
        _ => ProcessorErrorCode::ProviderError,
    };

    match serde_json::from_str::<RazorpayErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope
                .error
                .description
                .unwrap_or_else(|| format!("Razorpay returned {}", status));
            let err = ProcessorError::new(code, message);
            match envelope.error.code {
                Some(provider_code) => err.with_provider_code(provider_code),
                None => err,
            }
        }
        Err(_) if body.trim().is_empty() => {
            ProcessorError::new(code, format!("Razorpay returned {}", status))
        }
        Err(_) => ProcessorError::new(code, format!("Razorpay API error: {}", body.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_envelope_maps_description_and_code() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"The amount must be at least INR 1.00","field":"amount"}}"#;

        let err = map_error_response(StatusCode::BAD_REQUEST, body);

        assert_eq!(err.code, ProcessorErrorCode::BadRequest);
        assert_eq!(err.message, "The amount must be at least INR 1.00");
        assert_eq!(err.provider_code.as_deref(), Some("BAD_REQUEST_ERROR"));
    }

    #[test]
    fn unauthorized_maps_to_authentication_error() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Authentication failed"}}"#;

        let err = map_error_response(StatusCode::UNAUTHORIZED, body);

        assert_eq!(err.code, ProcessorErrorCode::AuthenticationError);
        assert_eq!(err.message, "Authentication failed");
    }

    #[test]
    fn non_envelope_body_is_kept_as_message() {
        let err = map_error_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

        assert_eq!(err.code, ProcessorErrorCode::ProviderError);
        assert!(err.message.contains("bad gateway"));
        assert!(err.provider_code.is_none());
    }

    #[test]
    fn empty_body_reports_status() {
        let err = map_error_response(StatusCode::TOO_MANY_REQUESTS, "");

        assert_eq!(err.code, ProcessorErrorCode::RateLimitExceeded);
        assert!(err.message.contains("429"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = RazorpayApiConfig::new("rzp_test_1", SecretString::new("s".to_string()))
            .with_base_url("http://localhost:9000/");
        let adapter = RazorpayPaymentAdapter::new(config);

        assert_eq!(adapter.url("/v1/orders"), "http://localhost:9000/v1/orders");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = RazorpayApiConfig::new("rzp_test_1", SecretString::new("hunter2".to_string()));
        let debug = format!("{:?}", config);

        assert!(debug.contains("rzp_test_1"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = RazorpayApiConfig::new("rzp_test_1", SecretString::new("s".to_string()))
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));
        let adapter = RazorpayPaymentAdapter::new(config);

        let err = adapter
            .capture_payment(CapturePaymentRequest {
                payment_id: "pay_1".to_string(),
                amount: crate::domain::payment::MinorUnits::new(100).unwrap(),
                currency: crate::domain::payment::Currency::Inr,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ProcessorErrorCode::NetworkError);
    }
}
