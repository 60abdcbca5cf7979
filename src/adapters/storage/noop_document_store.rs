//! Document store used when no store credentials are configured.
//!
//! Accepts and discards every write so the payment flows keep working
//! against the processor without persistence.

use async_trait::async_trait;

use crate::domain::document::Document;
use crate::ports::{DocumentStore, StoreError, WriteMode};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDocumentStore;

impl NoopDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for NoopDocumentStore {
    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        _document: Document,
        _mode: WriteMode,
    ) -> Result<(), StoreError> {
        tracing::debug!(collection, doc_id, "Document store disabled; write discarded");
        Ok(())
    }
}
