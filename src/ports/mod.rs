//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProcessor` - Order creation and payment capture (Razorpay)
//! - `DocumentStore` - Document writes (Firestore)

mod document_store;
mod payment_processor;

pub use document_store::{Collections, DocumentStore, StoreError, WriteMode};
pub use payment_processor::{
    CapturePaymentRequest, CreateOrderRequest, PaymentProcessor, ProcessorError,
    ProcessorErrorCode, ProcessorOrder,
};
