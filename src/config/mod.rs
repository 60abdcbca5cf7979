//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PAYMENT_GATEWAY`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use rzp_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on port {}", config.server.port);
//! ```

mod error;
mod razorpay;
mod server;
mod store;

pub use error::{ConfigError, ValidationError};
pub use razorpay::RazorpayConfig;
pub use server::{Environment, ServerConfig};
pub use store::{
    CredentialFallbacks, StoreConfig, GOOGLE_CREDENTIALS_ENV, INLINE_CREDENTIALS_ENV,
};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`], then call [`AppConfig::validate()`]
/// before building any adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, CORS origin, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Razorpay keys and capture behaviour
    #[serde(default)]
    pub razorpay: RazorpayConfig,

    /// Firestore credentials and collection names
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `PAYMENT_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `GOOGLE_APPLICATION_CREDENTIALS` or
    ///    `FIREBASE_SERVICE_ACCOUNT_JSON` for store credentials
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYMENT_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAYMENT_GATEWAY__RAZORPAY__KEY_ID=...` -> `razorpay.key_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing keys are reported by [`AppConfig::validate()`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYMENT_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        let fallbacks: CredentialFallbacks = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        config.store = config.store.with_fallbacks(fallbacks);
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.razorpay.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
