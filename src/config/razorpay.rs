//! Razorpay configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::razorpay::DEFAULT_API_BASE_URL;
use crate::domain::payment::CaptureMode;

/// Payment processor configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayConfig {
    /// Public key id (`rzp_test_...` / `rzp_live_...`)
    #[serde(default)]
    pub key_id: String,

    /// API key secret; also signs checkout confirmations
    #[serde(default = "empty_secret")]
    pub key_secret: SecretString,

    /// Webhook signing secret. When empty every webhook is rejected.
    #[serde(default = "empty_secret")]
    pub webhook_secret: SecretString,

    /// `payment_capture` flag for new orders: 1 automatic, 0 manual
    #[serde(default = "default_capture")]
    pub default_capture: u8,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl RazorpayConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    pub fn capture_mode(&self) -> Result<CaptureMode, ValidationError> {
        CaptureMode::try_from(self.default_capture).map_err(ValidationError::InvalidCaptureMode)
    }

    pub fn webhook_secret_configured(&self) -> bool {
        !self.webhook_secret.expose_secret().is_empty()
    }

    /// Validate payment configuration
    ///
    /// An empty webhook secret is allowed; the webhook endpoint then rejects
    /// every delivery.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY__KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY__KEY_SECRET"));
        }
        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }
        self.capture_mode()?;
        Ok(())
    }
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: empty_secret(),
            webhook_secret: empty_secret(),
            default_capture: default_capture(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_capture() -> u8 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
