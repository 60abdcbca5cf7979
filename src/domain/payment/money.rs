//! Amount, currency and capture-mode value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::PaymentError;

/// A strictly positive amount in the smallest currency unit (paise for INR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    /// Creates an amount, rejecting zero.
    pub fn new(value: u64) -> Result<Self, PaymentError> {
        if value == 0 {
            return Err(PaymentError::invalid_request(
                "amount must be a positive integer in minor units",
            ));
        }
        Ok(Self(value))
    }

    /// Validates a loosely typed JSON value as an amount.
    ///
    /// Absent, null, string, fractional, zero and negative values are all
    /// rejected; `field` names the offending request field in the error.
    pub fn from_json(value: Option<&Value>, field: &str) -> Result<Self, PaymentError> {
        let value = value
            .filter(|v| !v.is_null())
            .ok_or_else(|| PaymentError::invalid_request(format!("{field} is required")))?;

        let amount = value.as_u64().ok_or_else(|| {
            PaymentError::invalid_request(format!(
                "{field} must be a positive integer in minor units"
            ))
        })?;

        Self::new(amount)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported currencies. Orders are always raised in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether authorized payments are captured automatically or by an explicit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    Manual,
    #[default]
    Automatic,
}

impl CaptureMode {
    /// The processor's numeric `payment_capture` flag.
    pub fn as_flag(&self) -> u8 {
        match self {
            CaptureMode::Manual => 0,
            CaptureMode::Automatic => 1,
        }
    }

    pub fn is_manual(&self) -> bool {
        *self == CaptureMode::Manual
    }
}

impl TryFrom<u8> for CaptureMode {
    type Error = u8;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(CaptureMode::Manual),
            1 => Ok(CaptureMode::Automatic),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_positive_integer() {
        let amount = MinorUnits::from_json(Some(&json!(50000)), "amountInPaise").unwrap();
        assert_eq!(amount.value(), 50000);
    }

    #[test]
    fn rejects_missing_and_null() {
        assert!(matches!(
            MinorUnits::from_json(None, "amountInPaise"),
            Err(PaymentError::InvalidRequest(msg)) if msg == "amountInPaise is required"
        ));
        assert!(MinorUnits::from_json(Some(&Value::Null), "amountInPaise").is_err());
    }

    #[test]
    fn rejects_wrong_types() {
        for value in [json!("50000"), json!(true), json!([1]), json!({"v": 1})] {
            assert!(
                MinorUnits::from_json(Some(&value), "amountInPaise").is_err(),
                "accepted {value}"
            );
        }
    }

    #[test]
    fn rejects_zero_negative_and_fractional() {
        for value in [json!(0), json!(-100), json!(99.5)] {
            assert!(
                MinorUnits::from_json(Some(&value), "amountInPaise").is_err(),
                "accepted {value}"
            );
        }
    }

    #[test]
    fn currency_serializes_as_iso_code() {
        assert_eq!(serde_json::to_value(Currency::Inr).unwrap(), json!("INR"));
        assert_eq!(Currency::default().to_string(), "INR");
    }

    #[test]
    fn capture_mode_flag_round_trips() {
        assert_eq!(CaptureMode::try_from(0), Ok(CaptureMode::Manual));
        assert_eq!(CaptureMode::try_from(1), Ok(CaptureMode::Automatic));
        assert_eq!(CaptureMode::try_from(2), Err(2));
        assert_eq!(CaptureMode::Manual.as_flag(), 0);
        assert!(CaptureMode::Manual.is_manual());
        assert!(!CaptureMode::default().is_manual());
    }
}
