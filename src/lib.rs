//! Razorpay payment gateway
//!
//! Creates checkout orders with Razorpay, verifies the signed confirmations
//! clients submit after paying, and records `payment.captured` webhook
//! notifications in Cloud Firestore.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
