//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to the payment command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payment::{
    CreateOrderCommand, CreateOrderHandler, HandleWebhookCommand, HandleWebhookHandler,
    VerifyPaymentCommand, VerifyPaymentHandler,
};
use crate::domain::payment::{
    CaptureMode, PaymentError, PaymentSignatureVerifier, WebhookSignatureVerifier,
};
use crate::ports::{Collections, DocumentStore, PaymentProcessor};

use super::dto::{
    CreateOrderBody, CreateOrderResponse, ErrorResponse, HealthResponse, OkResponse,
    VerifyPaymentBody,
};

/// Header carrying the webhook HMAC.
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; clients are `Arc`-wrapped and stateless.
#[derive(Clone)]
pub struct PaymentAppState {
    pub processor: Arc<dyn PaymentProcessor>,
    pub store: Arc<dyn DocumentStore>,
    pub payment_verifier: PaymentSignatureVerifier,
    pub webhook_verifier: WebhookSignatureVerifier,
    pub collections: Collections,
    pub capture_mode: CaptureMode,
    /// Environment name reported by `/health`.
    pub environment: String,
}

impl PaymentAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.processor.clone(),
            self.store.clone(),
            self.collections.clone(),
            self.capture_mode,
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.processor.clone(),
            self.store.clone(),
            self.payment_verifier.clone(),
            self.collections.clone(),
            self.capture_mode,
        )
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(
            self.store.clone(),
            self.webhook_verifier.clone(),
            self.collections.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/create-order - Create a Razorpay order
pub async fn create_order(
    State(state): State<PaymentAppState>,
    payload: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let Json(request) = payload.map_err(rejection_to_error)?;
    let cmd = CreateOrderCommand::try_from(request)?;

    let result = state.create_order_handler().handle(cmd).await?;

    Ok(Json(CreateOrderResponse {
        order: result.order.payload,
    }))
}

/// POST /api/verify-payment - Verify a checkout confirmation
pub async fn verify_payment(
    State(state): State<PaymentAppState>,
    payload: Result<Json<VerifyPaymentBody>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let Json(request) = payload.map_err(rejection_to_error)?;
    let cmd = VerifyPaymentCommand::try_from(request)?;

    state.verify_payment_handler().handle(cmd).await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/razorpay-webhook - Handle Razorpay webhook notifications
///
/// The body is taken as raw bytes so the signature is checked against
/// exactly what was sent. Responses are plain text.
pub async fn razorpay_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleWebhookCommand {
        raw_body: body.to_vec(),
        signature,
    };

    match state.webhook_handler().handle(cmd).await {
        Ok(_) => (StatusCode::OK, "ok").into_response(),
        Err(PaymentError::InvalidSignature) => {
            (StatusCode::BAD_REQUEST, "invalid signature").into_response()
        }
        Err(PaymentError::InvalidRequest(_)) => {
            (StatusCode::BAD_REQUEST, "invalid payload").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error").into_response(),
    }
}

/// GET /health - Liveness check
pub async fn health(State(state): State<PaymentAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        env: state.environment.clone(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

fn rejection_to_error(rejection: JsonRejection) -> PaymentError {
    PaymentError::invalid_request(rejection.body_text())
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PaymentError);

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Payment request failed");
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
