//! Document Store Adapters
//!
//! Provides implementations of the DocumentStore port:
//! - In-memory storage (tests and local development)
//! - No-op storage (no credentials configured)

mod in_memory_document_store;
mod noop_document_store;

pub use in_memory_document_store::{AppliedWrite, InMemoryDocumentStore};
pub use noop_document_store::NoopDocumentStore;
