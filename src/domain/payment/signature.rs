//! Razorpay signature verification.
//!
//! Both trust boundaries use the same scheme: lowercase hex of
//! HMAC-SHA256(secret, message), compared in constant time.
//!
//! - Checkout confirmation: message is `{order_id}|{payment_id}`, keyed by
//!   the API key secret.
//! - Webhooks: message is the exact raw request body, keyed by the webhook
//!   secret. Re-serializing the parsed JSON would change the bytes.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
pub fn compute_signature(secret: &[u8], message: &[u8]) -> String {
    // HMAC takes keys of any length
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Returns true when `candidate` is the signature of `message` under `secret`.
pub fn verify(secret: &[u8], message: &[u8], candidate: &str) -> bool {
    let expected = compute_signature(secret, message);
    constant_time_compare(expected.as_bytes(), candidate.as_bytes())
}

/// The message signed by the checkout flow.
pub fn payment_message(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Verifies checkout confirmations submitted by the client.
#[derive(Clone)]
pub struct PaymentSignatureVerifier {
    key_secret: SecretString,
}

impl PaymentSignatureVerifier {
    pub fn new(key_secret: impl Into<String>) -> Self {
        Self {
            key_secret: SecretString::new(key_secret.into()),
        }
    }

    /// Checks `signature` against `{order_id}|{payment_id}`.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` on any mismatch.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError> {
        let message = payment_message(order_id, payment_id);
        if verify(
            self.key_secret.expose_secret().as_bytes(),
            message.as_bytes(),
            signature,
        ) {
            Ok(())
        } else {
            Err(PaymentError::InvalidSignature)
        }
    }
}

/// Verifies server-to-server webhook notifications.
///
/// An empty webhook secret fails closed: every notification is rejected
/// instead of being checked against an HMAC keyed by the empty string.
#[derive(Clone)]
pub struct WebhookSignatureVerifier {
    secret: Option<SecretString>,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then(|| SecretString::new(secret)),
        }
    }

    /// A verifier that rejects everything.
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Checks the signature header against the raw request body.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` when the header is missing, mismatched, or no
    /// secret is configured.
    pub fn verify(&self, raw_body: &[u8], signature: Option<&str>) -> Result<(), PaymentError> {
        let secret = self.secret.as_ref().ok_or(PaymentError::InvalidSignature)?;
        let signature = signature.ok_or(PaymentError::InvalidSignature)?;

        if verify(secret.expose_secret().as_bytes(), raw_body, signature) {
            Ok(())
        } else {
            Err(PaymentError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY_SECRET: &str = "s3cr3t";

    // ══════════════════════════════════════════════════════════════
    // Raw HMAC
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signature_matches_known_vector() {
        // RFC 4231 test case 2
        let sig = compute_signature(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn signature_is_lowercase_hex_of_32_bytes() {
        let sig = compute_signature(KEY_SECRET.as_bytes(), b"order_ABC|pay_XYZ");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn empty_and_oversized_keys_are_accepted() {
        let long_key = [0x5a_u8; 200];
        for key in [&b""[..], &long_key[..]] {
            let sig = compute_signature(key, b"body");
            assert_eq!(sig.len(), 64);
            assert!(verify(key, b"body", &sig));
        }
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let sig = compute_signature(KEY_SECRET.as_bytes(), b"msg").to_uppercase();
        assert!(!verify(KEY_SECRET.as_bytes(), b"msg", &sig));
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let sig = compute_signature(KEY_SECRET.as_bytes(), b"msg");
        assert!(!verify(KEY_SECRET.as_bytes(), b"msg", &sig[..63]));
        assert!(!verify(KEY_SECRET.as_bytes(), b"msg", ""));
    }

    // ══════════════════════════════════════════════════════════════
    // Checkout confirmation
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn payment_message_uses_literal_pipe() {
        assert_eq!(payment_message("order_ABC", "pay_XYZ"), "order_ABC|pay_XYZ");
    }

    #[test]
    fn payment_verifier_accepts_expected_signature() {
        let verifier = PaymentSignatureVerifier::new(KEY_SECRET);
        let expected = compute_signature(KEY_SECRET.as_bytes(), b"order_ABC|pay_XYZ");

        assert!(verifier.verify("order_ABC", "pay_XYZ", &expected).is_ok());
    }

    #[test]
    fn payment_verifier_rejects_any_other_string() {
        let verifier = PaymentSignatureVerifier::new(KEY_SECRET);
        let expected = compute_signature(KEY_SECRET.as_bytes(), b"order_ABC|pay_XYZ");

        let extended = format!("{expected}0");
        for candidate in ["", "deadbeef", &expected[1..], extended.as_str()] {
            assert_eq!(
                verifier.verify("order_ABC", "pay_XYZ", candidate),
                Err(PaymentError::InvalidSignature)
            );
        }
    }

    #[test]
    fn payment_verifier_rejects_swapped_ids() {
        let verifier = PaymentSignatureVerifier::new(KEY_SECRET);
        let expected = compute_signature(KEY_SECRET.as_bytes(), b"order_ABC|pay_XYZ");

        assert!(verifier.verify("pay_XYZ", "order_ABC", &expected).is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Webhooks
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn webhook_verifier_uses_raw_bytes() {
        let verifier = WebhookSignatureVerifier::new("whsec");
        let raw = br#"{"event": "payment.captured",  "payload": {}}"#;
        let sig = compute_signature(b"whsec", raw);

        assert!(verifier.verify(raw, Some(&sig)).is_ok());

        // Same JSON, different whitespace
        let reserialized = br#"{"event":"payment.captured","payload":{}}"#;
        assert_eq!(
            verifier.verify(reserialized, Some(&sig)),
            Err(PaymentError::InvalidSignature)
        );
    }

    #[test]
    fn webhook_verifier_rejects_missing_header() {
        let verifier = WebhookSignatureVerifier::new("whsec");
        assert_eq!(
            verifier.verify(b"{}", None),
            Err(PaymentError::InvalidSignature)
        );
    }

    #[test]
    fn empty_webhook_secret_fails_closed() {
        let verifier = WebhookSignatureVerifier::new("");
        let sig = compute_signature(b"", b"{}");

        assert!(!verifier.is_configured());
        assert_eq!(
            verifier.verify(b"{}", Some(&sig)),
            Err(PaymentError::InvalidSignature)
        );
        assert!(!WebhookSignatureVerifier::disabled().is_configured());
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn computed_signature_always_verifies(
            secret in proptest::collection::vec(any::<u8>(), 0..64),
            message in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let sig = compute_signature(&secret, &message);
            prop_assert!(verify(&secret, &message, &sig));
        }

        #[test]
        fn single_byte_mutation_never_verifies(
            secret in proptest::collection::vec(any::<u8>(), 1..64),
            message in proptest::collection::vec(any::<u8>(), 0..256),
            index in 0usize..64,
            replacement in any::<u8>(),
        ) {
            let sig = compute_signature(&secret, &message);
            let mut mutated = sig.clone().into_bytes();
            prop_assume!(mutated[index] != replacement);
            mutated[index] = replacement;
            let mutated = String::from_utf8_lossy(&mutated).into_owned();

            prop_assert!(!verify(&secret, &message, &mutated));
        }
    }
}
