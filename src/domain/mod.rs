//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `document` - Typed document model shared by every store adapter
//! - `payment` - Orders, signatures, verification and webhook records

pub mod document;
pub mod payment;
