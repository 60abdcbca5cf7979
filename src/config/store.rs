//! Document store configuration (Cloud Firestore)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::firestore::CredentialSource;
use crate::ports::Collections;

/// Environment variable honoured when `store.credentials_path` is unset.
pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment variable honoured when `store.credentials_json` is unset.
pub const INLINE_CREDENTIALS_ENV: &str = "FIREBASE_SERVICE_ACCOUNT_JSON";

/// Document store configuration
///
/// With no credential source the service runs against a no-op store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to a service-account key file
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Service-account key JSON supplied inline
    #[serde(default)]
    pub credentials_json: Option<SecretString>,

    /// Overrides the project id found in the key
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_orders_collection")]
    pub orders_collection: String,

    #[serde(default = "default_webhooks_collection")]
    pub webhooks_collection: String,

    #[serde(default = "default_members_collection")]
    pub members_collection: String,
}

/// Credentials from the conventional unprefixed Google variables.
///
/// Field names are the lowercased [`GOOGLE_CREDENTIALS_ENV`] and
/// [`INLINE_CREDENTIALS_ENV`], as produced by an unprefixed
/// `config::Environment` source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialFallbacks {
    #[serde(default)]
    pub google_application_credentials: Option<PathBuf>,

    #[serde(default)]
    pub firebase_service_account_json: Option<SecretString>,
}

impl StoreConfig {
    /// Fills unset credential fields from the fallbacks, preferring the path.
    pub fn with_fallbacks(mut self, fallbacks: CredentialFallbacks) -> Self {
        if self.credentials_path.is_none() && self.credentials_json.is_none() {
            if let Some(path) = fallbacks.google_application_credentials {
                self.credentials_path = Some(path);
            } else {
                self.credentials_json = fallbacks.firebase_service_account_json;
            }
        }
        self
    }

    /// The configured credential source, ignoring blank values.
    pub fn credential_source(&self) -> Option<CredentialSource> {
        let path = self
            .credentials_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty());
        let json = self
            .credentials_json
            .as_ref()
            .filter(|j| !j.expose_secret().trim().is_empty());

        match (path, json) {
            (Some(path), _) => Some(CredentialSource::File(path.clone())),
            (None, Some(json)) => Some(CredentialSource::Inline(json.clone())),
            (None, None) => None,
        }
    }

    pub fn collections(&self) -> Collections {
        Collections {
            orders: self.orders_collection.clone(),
            webhooks: self.webhooks_collection.clone(),
            members: self.members_collection.clone(),
        }
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_path = self
            .credentials_path
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty());
        let has_json = self
            .credentials_json
            .as_ref()
            .is_some_and(|j| !j.expose_secret().trim().is_empty());
        if has_path && has_json {
            return Err(ValidationError::ConflictingCredentials);
        }

        for name in [
            &self.orders_collection,
            &self.webhooks_collection,
            &self.members_collection,
        ] {
            if name.trim().is_empty() || name.contains('/') {
                return Err(ValidationError::InvalidCollectionName(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            credentials_json: None,
            project_id: None,
            orders_collection: default_orders_collection(),
            webhooks_collection: default_webhooks_collection(),
            members_collection: default_members_collection(),
        }
    }
}

fn default_orders_collection() -> String {
    Collections::default().orders
}

fn default_webhooks_collection() -> String {
    Collections::default().webhooks
}

fn default_members_collection() -> String {
    Collections::default().members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_credentials() {
        let config = StoreConfig::default();
        assert!(config.credential_source().is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.collections(), Collections::default());
    }

    #[test]
    fn test_path_source() {
        let config = StoreConfig {
            credentials_path: Some(PathBuf::from("/etc/gateway/sa.json")),
            ..Default::default()
        };
        assert!(matches!(
            config.credential_source(),
            Some(CredentialSource::File(p)) if p == PathBuf::from("/etc/gateway/sa.json")
        ));
    }

    #[test]
    fn test_inline_source() {
        let config = StoreConfig {
            credentials_json: Some(SecretString::new("{\"type\":\"service_account\"}".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            config.credential_source(),
            Some(CredentialSource::Inline(_))
        ));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = StoreConfig {
            credentials_path: Some(PathBuf::new()),
            credentials_json: Some(SecretString::new("  ".to_string())),
            ..Default::default()
        };
        assert!(config.credential_source().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_sources_conflict() {
        let config = StoreConfig {
            credentials_path: Some(PathBuf::from("sa.json")),
            credentials_json: Some(SecretString::new("{}".to_string())),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ConflictingCredentials));
    }

    #[test]
    fn test_fallbacks_fill_only_unset_credentials() {
        let fallbacks = CredentialFallbacks {
            google_application_credentials: Some(PathBuf::from("/var/run/sa.json")),
            firebase_service_account_json: Some(SecretString::new("{}".to_string())),
        };

        let config = StoreConfig::default().with_fallbacks(fallbacks.clone());
        assert_eq!(config.credentials_path, Some(PathBuf::from("/var/run/sa.json")));
        assert!(config.credentials_json.is_none());

        let config = StoreConfig {
            credentials_json: Some(SecretString::new("{\"type\":\"service_account\"}".to_string())),
            ..Default::default()
        }
        .with_fallbacks(fallbacks);
        assert!(config.credentials_path.is_none());
        assert!(matches!(
            config.credential_source(),
            Some(CredentialSource::Inline(_))
        ));
    }

    #[test]
    fn test_inline_fallback_without_path() {
        let config = StoreConfig::default().with_fallbacks(CredentialFallbacks {
            google_application_credentials: None,
            firebase_service_account_json: Some(SecretString::new("{}".to_string())),
        });
        assert!(matches!(
            config.credential_source(),
            Some(CredentialSource::Inline(_))
        ));
    }

    #[test]
    fn test_collection_names() {
        let config = StoreConfig {
            members_collection: "members/nested".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCollectionName("members/nested".to_string()))
        );

        let config = StoreConfig {
            orders_collection: "orders".to_string(),
            ..Default::default()
        };
        assert_eq!(config.collections().orders, "orders");
    }
}
