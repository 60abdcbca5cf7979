//! In-Memory Document Store Adapter
//!
//! Stores documents in memory with the same replace/merge semantics as
//! Firestore. Useful for testing and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::{Document, FieldValue, Fields};
use crate::ports::{DocumentStore, StoreError, WriteMode};

/// A write applied to the store, kept for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedWrite {
    pub collection: String,
    pub doc_id: String,
    pub mode: WriteMode,
}

/// In-memory document storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<(String, String), Fields>>>,
    writes: Arc<RwLock<Vec<AppliedWrite>>>,
    failures: Arc<RwLock<HashMap<String, StoreError>>>,
    /// Time used for server timestamps; wall clock when unset.
    fixed_now: Option<DateTime<Utc>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve server timestamps to `now` instead of the wall clock.
    pub fn with_fixed_clock(now: DateTime<Utc>) -> Self {
        Self {
            fixed_now: Some(now),
            ..Self::default()
        }
    }

    /// Fail every write to `collection` with `error`.
    pub async fn fail_collection(&self, collection: &str, error: StoreError) {
        self.failures
            .write()
            .await
            .insert(collection.to_string(), error);
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Current fields of a document, if it exists.
    pub async fn get(&self, collection: &str, doc_id: &str) -> Option<Fields> {
        self.documents
            .read()
            .await
            .get(&(collection.to_string(), doc_id.to_string()))
            .cloned()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .await
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }

    /// Number of writes applied across all collections.
    pub async fn write_count(&self) -> usize {
        self.writes.read().await.len()
    }

    pub async fn writes(&self) -> Vec<AppliedWrite> {
        self.writes.read().await.clone()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.documents.write().await.clear();
        self.writes.write().await.clear();
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }
}

/// Replaces every `ServerTimestamp` sentinel with `now`.
fn resolve_server_timestamps(fields: Fields, now: DateTime<Utc>) -> Fields {
    fields
        .into_iter()
        .map(|(name, value)| (name, resolve_value(value, now)))
        .collect()
}

fn resolve_value(value: FieldValue, now: DateTime<Utc>) -> FieldValue {
    match value {
        FieldValue::ServerTimestamp => FieldValue::Timestamp(now),
        FieldValue::Map(nested) => FieldValue::Map(resolve_server_timestamps(nested, now)),
        FieldValue::Array(items) => {
            FieldValue::Array(items.into_iter().map(|v| resolve_value(v, now)).collect())
        }
        other => other,
    }
}

/// Merges `incoming` into `existing` by leaf path.
///
/// Non-empty maps merge recursively; any other value replaces what was there.
fn merge_fields(existing: &mut Fields, incoming: Fields) {
    for (name, value) in incoming {
        match (existing.get_mut(&name), value) {
            (Some(FieldValue::Map(current)), FieldValue::Map(nested)) if !nested.is_empty() => {
                merge_fields(current, nested);
            }
            (_, value) => {
                existing.insert(name, value);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        document: Document,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        if let Some(error) = self.failures.read().await.get(collection) {
            return Err(error.clone());
        }

        let fields = resolve_server_timestamps(document.into_fields(), self.now());
        let key = (collection.to_string(), doc_id.to_string());

        {
            let mut documents = self.documents.write().await;
            match mode {
                WriteMode::Replace => {
                    documents.insert(key, fields);
                }
                WriteMode::Merge => {
                    merge_fields(documents.entry(key).or_default(), fields);
                }
            }
        }

        self.writes.write().await.push(AppliedWrite {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
            mode,
        });

        Ok(())
    }
}
