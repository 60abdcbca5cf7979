//! Cloud Firestore document store over the REST API.
//!
//! Every write is a single `documents:commit` call:
//! - `Replace` sends the document with no update mask, overwriting it.
//! - `Merge` adds an `updateMask` listing each leaf path, so fields outside
//!   the mask are preserved.
//!
//! `ServerTimestamp` fields become `REQUEST_TIME` transforms in the same write.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use super::credentials::ServiceAccountKey;
use super::token_provider::AccessTokenProvider;
use super::value_codec::{encode_fields, field_path};
use crate::domain::document::Document;
use crate::ports::{DocumentStore, StoreError, WriteMode};

/// Default Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firestore connection settings.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database_id: String,
    pub base_url: String,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: "(default)".to_string(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
        }
    }

    /// Set a custom REST endpoint (for the emulator or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// `projects/{project}/databases/{database}`
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/databases/{}",
            self.project_id, self.database_id
        )
    }

    pub fn document_name(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path(), collection, doc_id)
    }

    fn commit_url(&self) -> String {
        format!("{}/{}/documents:commit", self.base_url, self.database_path())
    }
}

/// Error body returned by Google APIs.
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Firestore-backed `DocumentStore`.
pub struct FirestoreDocumentStore {
    config: FirestoreConfig,
    tokens: AccessTokenProvider,
    http_client: reqwest::Client,
}

impl FirestoreDocumentStore {
    /// Creates a store for the key's project, or `project_id` when given.
    pub fn new(key: ServiceAccountKey, project_id: Option<String>) -> Self {
        let project_id = project_id
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| key.project_id.clone());
        Self::with_config(FirestoreConfig::new(project_id), key)
    }

    pub fn with_config(config: FirestoreConfig, key: ServiceAccountKey) -> Self {
        let http_client = reqwest::Client::new();
        Self {
            config,
            tokens: AccessTokenProvider::new(key, http_client.clone()),
            http_client,
        }
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }
}

/// Builds the `documents:commit` request body for one write.
pub fn build_commit_request(
    config: &FirestoreConfig,
    collection: &str,
    doc_id: &str,
    document: &Document,
    mode: WriteMode,
) -> Value {
    let mut write = json!({
        "update": {
            "name": config.document_name(collection, doc_id),
            "fields": encode_fields(document.fields()),
        }
    });

    if mode == WriteMode::Merge {
        let mask: Vec<String> = document
            .merge_paths()
            .iter()
            .map(|path| field_path(path))
            .collect();
        write["updateMask"] = json!({ "fieldPaths": mask });
    }

    let transforms: Vec<Value> = document
        .server_timestamp_paths()
        .iter()
        .map(|path| json!({ "fieldPath": field_path(path), "setToServerValue": "REQUEST_TIME" }))
        .collect();
    if !transforms.is_empty() {
        write["updateTransforms"] = Value::Array(transforms);
    }

    json!({ "writes": [write] })
}

fn validate_ids(collection: &str, doc_id: &str) -> Result<(), StoreError> {
    for (label, id) in [("collection", collection), ("document id", doc_id)] {
        if id.is_empty() || id.contains('/') || id == "." || id == ".." {
            return Err(StoreError::InvalidDocument(format!(
                "invalid {}: {:?}",
                label, id
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        document: Document,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        validate_ids(collection, doc_id)?;

        let body = build_commit_request(&self.config, collection, doc_id, &document, mode);
        let token = self.tokens.access_token().await?;

        let response = self
            .http_client
            .post(self.config.commit_url())
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(collection, doc_id, ?mode, "Firestore write committed");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<GoogleErrorEnvelope>(&text) {
            Ok(envelope) if !envelope.error.status.is_empty() => {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => format!("Firestore returned {}", status),
        };

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Err(StoreError::Authentication(message)),
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Err(StoreError::Unavailable(message)),
            _ => Err(StoreError::Rejected {
                collection: collection.to_string(),
                doc_id: doc_id.to_string(),
                message,
            }),
        }
    }
}

impl std::fmt::Debug for FirestoreDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreDocumentStore")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish()
    }
}
