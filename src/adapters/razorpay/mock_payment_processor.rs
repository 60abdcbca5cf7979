//! Mock payment processor for testing.
//!
//! Provides a configurable implementation of `PaymentProcessor` for unit and
//! integration tests. Supports:
//! - Pre-configured order responses
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::ports::{
    CapturePaymentRequest, CreateOrderRequest, PaymentProcessor, ProcessorError, ProcessorOrder,
};

/// Mock payment processor for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProcessor::new();
/// mock.set_method_error("capture_payment", ProcessorError::bad_request("already captured"));
///
/// let handler = VerifyPaymentHandler::new(Arc::new(mock.clone()), ...);
/// // ...
/// assert_eq!(mock.call_count("capture_payment"), 1);
/// ```
#[derive(Default)]
pub struct MockPaymentProcessor {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Next order to return from `create_order`.
    next_order: Option<ProcessorOrder>,

    /// Error to return on next call.
    next_error: Option<ProcessorError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, ProcessorError>,

    /// Create-order requests in call order.
    order_requests: Vec<CreateOrderRequest>,

    /// Capture requests in call order.
    capture_requests: Vec<CapturePaymentRequest>,

    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order to return on the next `create_order` call.
    pub fn set_order(&self, order: ProcessorOrder) {
        self.inner.lock().unwrap().next_order = Some(order);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: ProcessorError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: ProcessorError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Create-order requests received so far.
    pub fn order_requests(&self) -> Vec<CreateOrderRequest> {
        self.inner.lock().unwrap().order_requests.clone()
    }

    /// Capture requests received so far.
    pub fn capture_requests(&self) -> Vec<CapturePaymentRequest> {
        self.inner.lock().unwrap().capture_requests.clone()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), ProcessorError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error is consumed by the first call
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProcessor {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProcessorOrder, ProcessorError> {
        self.record_call(
            "create_order",
            vec![request.amount.to_string(), request.receipt.clone()],
        );
        self.inner
            .lock()
            .unwrap()
            .order_requests
            .push(request.clone());
        self.check_error("create_order")?;

        let mut state = self.inner.lock().unwrap();
        let order = state.next_order.take().unwrap_or_else(|| {
            let id = format!("order_{}", uuid::Uuid::new_v4().simple());
            ProcessorOrder {
                payload: json!({
                    "id": id,
                    "entity": "order",
                    "amount": request.amount.value(),
                    "amount_paid": 0,
                    "amount_due": request.amount.value(),
                    "currency": request.currency.as_str(),
                    "receipt": request.receipt,
                    "status": "created",
                    "attempts": 0,
                    "notes": request.notes,
                    "created_at": chrono::Utc::now().timestamp(),
                }),
                id,
            }
        });

        Ok(order)
    }

    async fn capture_payment(&self, request: CapturePaymentRequest) -> Result<(), ProcessorError> {
        self.record_call(
            "capture_payment",
            vec![request.payment_id.clone(), request.amount.to_string()],
        );
        self.inner
            .lock()
            .unwrap()
            .capture_requests
            .push(request.clone());
        self.check_error("capture_payment")?;

        Ok(())
    }
}
