//! Service-account credentials for the Firestore REST API.
//!
//! Credentials come from a key file on disk or from the same JSON supplied
//! inline (typically an environment variable on hosts without a writable
//! filesystem). Both are parsed in memory; nothing is written to disk.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

/// Default OAuth token endpoint for Google service accounts.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Errors loading service-account credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Failed to read credentials file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid service account JSON: {0}")]
    Parse(String),

    #[error("Service account key is missing {0}")]
    MissingField(&'static str),
}

/// Where the service-account key is read from.
#[derive(Clone)]
pub enum CredentialSource {
    /// Path to a service-account key file.
    File(PathBuf),

    /// The key file contents.
    Inline(SecretString),
}

impl CredentialSource {
    /// Reads and parses the service-account key.
    pub fn load(&self) -> Result<ServiceAccountKey, CredentialsError> {
        match self {
            CredentialSource::File(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|e| CredentialsError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                ServiceAccountKey::from_json(&contents)
            }
            CredentialSource::Inline(json) => {
                use secrecy::ExposeSecret;
                ServiceAccountKey::from_json(json.expose_secret())
            }
        }
    }

    /// Short description for logs; never includes key material.
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::File(path) => format!("file {}", path.display()),
            CredentialSource::Inline(_) => "inline JSON".to_string(),
        }
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
            CredentialSource::Inline(_) => f.debug_tuple("Inline").field(&"[REDACTED]").finish(),
        }
    }
}

/// The fields of a Google service-account key the store needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: String,

    #[serde(default)]
    pub client_email: String,

    /// PEM-encoded RSA private key.
    pub private_key: SecretString,

    #[serde(default)]
    pub private_key_id: Option<String>,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parses a key from its JSON form, requiring an email and project.
    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        let key: ServiceAccountKey =
            serde_json::from_str(json).map_err(|e| CredentialsError::Parse(e.to_string()))?;

        if key.client_email.is_empty() {
            return Err(CredentialsError::MissingField("client_email"));
        }
        if key.project_id.is_empty() {
            return Err(CredentialsError::MissingField("project_id"));
        }

        Ok(key)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
