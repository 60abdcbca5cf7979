//! OAuth access tokens for the Firestore REST API.
//!
//! Implements the service-account JWT bearer flow: a short-lived RS256
//! assertion signed with the account's private key is exchanged at the token
//! endpoint for an access token, which is cached until shortly before it
//! expires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::credentials::ServiceAccountKey;
use crate::ports::StoreError;

/// OAuth scope for Firestore reads and writes.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Lifetime requested for each signed assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed once less than this much lifetime remains.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Claims of the signed assertion sent to the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, issued_at: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: DATASTORE_SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

/// Cached access token with expiry tracking.
struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    fn new(token: String, lifetime: Duration) -> Self {
        Self {
            token: SecretString::new(token),
            expires_at: Instant::now() + lifetime,
        }
    }

    fn is_fresh(&self) -> bool {
        self.expires_at
            .checked_duration_since(Instant::now())
            .map(|remaining| remaining > REFRESH_MARGIN)
            .unwrap_or(false)
    }
}

/// Issues and caches access tokens for one service account.
pub struct AccessTokenProvider {
    key: ServiceAccountKey,
    http_client: reqwest::Client,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl AccessTokenProvider {
    pub fn new(key: ServiceAccountKey, http_client: reqwest::Client) -> Self {
        Self {
            key,
            http_client,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Signs a JWT bearer assertion for the token endpoint.
    pub fn sign_assertion(&self, issued_at: i64) -> Result<String, StoreError> {
        let claims = AssertionClaims::new(&self.key, issued_at);

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(
            self.key.private_key.expose_secret().as_bytes(),
        )
        .map_err(|e| StoreError::Authentication(format!("Invalid service account key: {}", e)))?;

        jsonwebtoken::encode(&header, &claims, &encoding_key)
            .map_err(|e| StoreError::Authentication(format!("Failed to sign assertion: {}", e)))
    }

    /// Returns a valid access token, using the cache when possible.
    pub async fn access_token(&self) -> Result<SecretString, StoreError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.is_fresh() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(ref cached) = *cache {
            if cached.is_fresh() {
                return Ok(cached.token.clone());
            }
        }

        let fetched = self.fetch_token().await?;
        let token = fetched.token.clone();
        *cache = Some(fetched);

        Ok(token)
    }

    async fn fetch_token(&self) -> Result<CachedToken, StoreError> {
        let assertion = self.sign_assertion(chrono::Utc::now().timestamp())?;

        tracing::debug!(client_email = %self.key.client_email, "Requesting Firestore access token");

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Token endpoint unreachable");
                StoreError::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Token exchange rejected");
            return Err(StoreError::Authentication(format!(
                "Token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            StoreError::Authentication(format!("Failed to parse token response: {}", e))
        })?;

        Ok(CachedToken::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
        ))
    }
}

impl std::fmt::Debug for AccessTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenProvider")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .finish()
    }
}
