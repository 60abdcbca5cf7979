//! Adapters - Implementations of ports and the HTTP surface.
//!
//! - `http` - Axum router exposing the payment endpoints
//! - `razorpay` - `PaymentProcessor` over the Razorpay REST API
//! - `firestore` - `DocumentStore` over the Firestore REST API
//! - `storage` - In-memory and no-op document stores

pub mod firestore;
pub mod http;
pub mod razorpay;
pub mod storage;
