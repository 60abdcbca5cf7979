//! VerifyPaymentHandler - Command handler for client checkout confirmations.
//!
//! After a successful checkout the client submits the order id, payment id
//! and the signature Razorpay gave it. Once the signature checks out:
//!
//! 1. In manual-capture mode, the payment is captured (best effort).
//! 2. The order document is merged with the verification fields.
//! 3. The member document, if one is referenced, is marked as paid.
//!
//! Re-submitting the same confirmation repeats these steps harmlessly.

use std::sync::Arc;

use crate::domain::payment::{
    BestEffort, CaptureMode, Currency, MemberPaymentUpdate, MemberReference, MinorUnits,
    PaymentError, PaymentSignatureVerifier, VerificationRecord,
};
use crate::ports::{
    CapturePaymentRequest, Collections, DocumentStore, PaymentProcessor, WriteMode,
};

/// Command to verify a checkout confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyPaymentCommand {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
    /// Amount to capture in manual-capture mode.
    pub amount: Option<MinorUnits>,
    pub member: Option<MemberReference>,
}

/// Result of a verified confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyPaymentResult {
    pub capture: BestEffort,
    /// Member document updated, if one was referenced.
    pub member_id: Option<String>,
}

/// Handler for verifying checkout confirmations.
pub struct VerifyPaymentHandler {
    processor: Arc<dyn PaymentProcessor>,
    store: Arc<dyn DocumentStore>,
    verifier: PaymentSignatureVerifier,
    collections: Collections,
    capture_mode: CaptureMode,
}

impl VerifyPaymentHandler {
    pub fn new(
        processor: Arc<dyn PaymentProcessor>,
        store: Arc<dyn DocumentStore>,
        verifier: PaymentSignatureVerifier,
        collections: Collections,
        capture_mode: CaptureMode,
    ) -> Self {
        Self {
            processor,
            store,
            verifier,
            collections,
            capture_mode,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, PaymentError> {
        if cmd.payment_id.is_empty() || cmd.order_id.is_empty() || cmd.signature.is_empty() {
            return Err(PaymentError::invalid_request(
                "razorpay_payment_id, razorpay_order_id and razorpay_signature are required",
            ));
        }

        if let Err(e) = self
            .verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            tracing::warn!(
                order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                "Payment signature mismatch"
            );
            return Err(e);
        }

        let capture = self.capture_if_manual(&cmd).await;

        let record = VerificationRecord {
            order_id: cmd.order_id.clone(),
            payment_id: cmd.payment_id.clone(),
            member: cmd.member.clone(),
        };
        self.store
            .set(
                &self.collections.orders,
                &record.order_id,
                record.to_document(),
                WriteMode::Merge,
            )
            .await
            .map_err(|e| {
                tracing::error!(order_id = %cmd.order_id, error = %e, "Failed to record verification");
                PaymentError::persistence(e.to_string())
            })?;

        let member_id = cmd.member.as_ref().and_then(MemberReference::member_id);
        if let Some(member_id) = &member_id {
            let update = MemberPaymentUpdate {
                member_id: member_id.clone(),
                order_id: cmd.order_id.clone(),
                payment_id: cmd.payment_id.clone(),
            };
            self.store
                .set(
                    &self.collections.members,
                    &update.member_id,
                    update.to_document(),
                    WriteMode::Merge,
                )
                .await
                .map_err(|e| {
                    tracing::error!(member_id = %member_id, error = %e, "Failed to update member");
                    PaymentError::persistence(e.to_string())
                })?;
        }

        tracing::info!(
            order_id = %cmd.order_id,
            payment_id = %cmd.payment_id,
            capture = %capture,
            member_id = member_id.as_deref().unwrap_or(""),
            "Payment verified"
        );

        Ok(VerifyPaymentResult { capture, member_id })
    }

    /// Captures the payment when orders use manual capture and an amount was given.
    async fn capture_if_manual(&self, cmd: &VerifyPaymentCommand) -> BestEffort {
        let amount = match (self.capture_mode, cmd.amount) {
            (CaptureMode::Manual, Some(amount)) => amount,
            _ => return BestEffort::Skipped,
        };

        let outcome = BestEffort::from_result(
            self.processor
                .capture_payment(CapturePaymentRequest {
                    payment_id: cmd.payment_id.clone(),
                    amount,
                    currency: Currency::Inr,
                })
                .await,
        );

        // Commonly "already captured" on a repeated confirmation
        if let BestEffort::Failed(reason) = &outcome {
            tracing::warn!(payment_id = %cmd.payment_id, error = %reason, "Capture failed");
        }

        outcome
    }
}
