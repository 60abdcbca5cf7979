//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid frontend origin: {0}")]
    InvalidFrontendOrigin(String),

    #[error("Invalid payment capture mode {0} (expected 0 or 1)")]
    InvalidCaptureMode(u8),

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKeyId,

    #[error("Both credentials_path and credentials_json are set")]
    ConflictingCredentials,

    #[error("Invalid collection name: {0:?}")]
    InvalidCollectionName(String),
}
