//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order, health, razorpay_webhook, verify_payment, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
/// - `POST /create-order` - Create an order with Razorpay
/// - `POST /verify-payment` - Verify a checkout confirmation
/// - `POST /razorpay-webhook` - Handle webhooks (signature verified, no auth)
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/razorpay-webhook", post(razorpay_webhook))
}

/// Create the complete payment module router.
///
/// Mounts the payment routes under `/api` and the liveness check at
/// `/health`.
///
/// # Example
///
/// ```ignore
/// let app = payment_router().with_state(app_state);
/// ```
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .nest("/api", payment_routes())
        .route("/health", get(health))
}
