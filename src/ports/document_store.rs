//! Document store port - key-value documents grouped in collections.
//!
//! Writes are the only operation the service needs. A write either replaces
//! the whole document or merges the given fields into it.

use async_trait::async_trait;

use crate::domain::document::Document;

/// Errors that can occur during document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store authentication failed: {0}")]
    Authentication(String),

    #[error("Store request failed: {0}")]
    Network(String),

    #[error("Store rejected write to {collection}/{doc_id}: {message}")]
    Rejected {
        collection: String,
        doc_id: String,
        message: String,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// How a write treats fields already present in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the document with exactly the given fields.
    Replace,

    /// Update only the given leaf fields; everything else is preserved.
    Merge,
}

/// Port for writing documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `document` to `collection/doc_id`, creating it if absent.
    ///
    /// # Errors
    /// Returns `StoreError` if the write is not applied.
    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        document: Document,
        mode: WriteMode,
    ) -> Result<(), StoreError>;
}

/// Collection names used by the payment flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub orders: String,
    pub webhooks: String,
    pub members: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            orders: "razorpay-orders".to_string(),
            webhooks: "razorpay-webhooks".to_string(),
            members: "samvedana-members".to_string(),
        }
    }
}
