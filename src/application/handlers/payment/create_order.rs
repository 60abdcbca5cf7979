//! CreateOrderHandler - Command handler for creating a checkout order.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::payment::{
    generate_receipt, BestEffort, CaptureMode, Currency, MinorUnits, Notes, Order, PaymentError,
};
use crate::ports::{Collections, CreateOrderRequest, DocumentStore, PaymentProcessor, WriteMode};

/// Command to create an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderCommand {
    pub amount: MinorUnits,
    /// Caller receipt; generated as `rcpt_<unix millis>` when absent.
    pub receipt: Option<String>,
    pub notes: Notes,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: Order,
    /// Whether the order document was written.
    pub persisted: BestEffort,
}

/// Handler for creating orders with the payment processor.
///
/// The processor is called once. The order is then recorded in the orders
/// collection; a failed write is logged and does not fail the command.
pub struct CreateOrderHandler {
    processor: Arc<dyn PaymentProcessor>,
    store: Arc<dyn DocumentStore>,
    collections: Collections,
    capture_mode: CaptureMode,
}

impl CreateOrderHandler {
    pub fn new(
        processor: Arc<dyn PaymentProcessor>,
        store: Arc<dyn DocumentStore>,
        collections: Collections,
        capture_mode: CaptureMode,
    ) -> Self {
        Self {
            processor,
            store,
            collections,
            capture_mode,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, PaymentError> {
        let receipt = cmd
            .receipt
            .unwrap_or_else(|| generate_receipt(Utc::now()));

        let request = CreateOrderRequest {
            amount: cmd.amount,
            currency: Currency::Inr,
            receipt: receipt.clone(),
            capture_mode: self.capture_mode,
            notes: cmd.notes.clone(),
        };

        let created = self.processor.create_order(request).await.map_err(|e| {
            tracing::error!(
                amount = cmd.amount.value(),
                receipt = %receipt,
                error = %e,
                "Order creation failed"
            );
            PaymentError::order_creation_failed(e.message)
        })?;

        let order = Order {
            id: created.id,
            amount: cmd.amount,
            currency: Currency::Inr,
            receipt,
            capture_mode: self.capture_mode,
            notes: cmd.notes,
            payload: created.payload,
        };

        let persisted = BestEffort::from_result(
            self.store
                .set(
                    &self.collections.orders,
                    &order.id,
                    order.to_document(),
                    WriteMode::Replace,
                )
                .await,
        );

        if let BestEffort::Failed(reason) = &persisted {
            tracing::warn!(order_id = %order.id, error = %reason, "Failed to record order");
        }

        tracing::info!(
            order_id = %order.id,
            amount = order.amount.value(),
            capture = order.capture_mode.as_flag(),
            "Order created"
        );

        Ok(CreateOrderResult { order, persisted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::razorpay::MockPaymentProcessor;
    use crate::adapters::storage::InMemoryDocumentStore;
    use crate::domain::document::FieldValue;
    use crate::ports::{ProcessorError, ProcessorOrder, StoreError};
    use serde_json::json;

    struct Fixture {
        processor: MockPaymentProcessor,
        store: InMemoryDocumentStore,
        handler: CreateOrderHandler,
    }

    fn fixture(capture_mode: CaptureMode) -> Fixture {
        let processor = MockPaymentProcessor::new();
        let store = InMemoryDocumentStore::new();
        let handler = CreateOrderHandler::new(
            Arc::new(processor.clone()),
            Arc::new(store.clone()),
            Collections::default(),
            capture_mode,
        );
        Fixture {
            processor,
            store,
            handler,
        }
    }

    fn command(amount: u64) -> CreateOrderCommand {
        CreateOrderCommand {
            amount: MinorUnits::new(amount).unwrap(),
            receipt: None,
            notes: Notes::new(),
        }
    }

    #[tokio::test]
    async fn creates_inr_order_with_generated_receipt() {
        let f = fixture(CaptureMode::Automatic);

        let result = f.handler.handle(command(50000)).await.unwrap();

        assert_eq!(result.order.currency, Currency::Inr);
        let digits = result.order.receipt.strip_prefix("rcpt_").unwrap();
        assert_eq!(digits.len(), 13);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let requests = f.processor.order_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount.value(), 50000);
        assert_eq!(requests[0].capture_mode, CaptureMode::Automatic);
        assert_eq!(requests[0].receipt, result.order.receipt);
    }

    #[tokio::test]
    async fn passes_caller_receipt_notes_and_capture_mode() {
        let f = fixture(CaptureMode::Manual);
        let cmd = CreateOrderCommand {
            amount: MinorUnits::new(100).unwrap(),
            receipt: Some("rcpt_custom".to_string()),
            notes: Notes::from([("memberId".to_string(), "m1".to_string())]),
        };

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(result.order.receipt, "rcpt_custom");
        let request = &f.processor.order_requests()[0];
        assert_eq!(request.capture_mode, CaptureMode::Manual);
        assert_eq!(request.notes.get("memberId").map(String::as_str), Some("m1"));
    }

    #[tokio::test]
    async fn records_order_document_by_processor_id() {
        let f = fixture(CaptureMode::Automatic);
        f.processor.set_order(ProcessorOrder {
            id: "order_ABC".to_string(),
            payload: json!({"id": "order_ABC", "amount": 50000, "status": "created"}),
        });

        let result = f.handler.handle(command(50000)).await.unwrap();

        assert_eq!(result.persisted, BestEffort::Completed);
        let doc = f.store.get("razorpay-orders", "order_ABC").await.unwrap();
        let order = doc.get("order").and_then(FieldValue::as_map).unwrap();
        assert_eq!(order.get("status").and_then(FieldValue::as_str), Some("created"));
        assert!(matches!(doc.get("createdAt"), Some(FieldValue::Timestamp(_))));
        assert_eq!(doc.get("notes"), Some(&FieldValue::Map(Default::default())));
    }

    #[tokio::test]
    async fn returns_processor_payload_unchanged() {
        let f = fixture(CaptureMode::Automatic);
        let payload = json!({"id": "order_X", "amount": 100, "offer_id": null});
        f.processor.set_order(ProcessorOrder {
            id: "order_X".to_string(),
            payload: payload.clone(),
        });

        let result = f.handler.handle(command(100)).await.unwrap();

        assert_eq!(result.order.payload, payload);
    }

    #[tokio::test]
    async fn processor_failure_is_order_creation_failed() {
        let f = fixture(CaptureMode::Automatic);
        f.processor.set_error(
            ProcessorError::bad_request("The amount must be at least INR 1.00")
                .with_provider_code("BAD_REQUEST_ERROR"),
        );

        let err = f.handler.handle(command(50)).await.unwrap_err();

        assert_eq!(
            err,
            PaymentError::OrderCreationFailed("The amount must be at least INR 1.00".to_string())
        );
        assert_eq!(f.store.write_count().await, 0);
    }

    #[tokio::test]
    async fn store_failure_still_returns_order() {
        let f = fixture(CaptureMode::Automatic);
        f.store
            .fail_collection("razorpay-orders", StoreError::Unavailable("down".to_string()))
            .await;

        let result = f.handler.handle(command(50000)).await.unwrap();

        assert!(result.persisted.is_failed());
        assert!(result.order.id.starts_with("order_"));
    }
}
