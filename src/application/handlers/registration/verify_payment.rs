//! VerifyPaymentHandler - Command handler for confirming a checkout payment.

use std::sync::Arc;

use crate::domain::foundation::{RegistrationId, Timestamp};
use crate::domain::registration::{PaymentSignatureVerifier, PaymentStatus, RegistrationError};
use crate::ports::RegistrationRepository;

/// Command carrying the payment report from the checkout client.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub registration_id: RegistrationId,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentResult {
    pub registration_id: RegistrationId,
    pub status: PaymentStatus,
    /// True when the registration was already paid by this exact report.
    pub already_settled: bool,
}

/// Handler for the verify-payment step of the registration flow.
///
/// Checks run in a fixed order: the claimed order must be the one bound to
/// the registration before the signature is looked at.
pub struct VerifyPaymentHandler {
    repository: Arc<dyn RegistrationRepository>,
    verifier: PaymentSignatureVerifier,
}

impl VerifyPaymentHandler {
    pub fn new(
        repository: Arc<dyn RegistrationRepository>,
        verifier: PaymentSignatureVerifier,
    ) -> Self {
        Self {
            repository,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, RegistrationError> {
        // 1. Load registration
        let mut registration = self
            .repository
            .find_by_id(&cmd.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(cmd.registration_id))?;

        // 2. Order binding
        if !registration.order_matches(&cmd.order_id) {
            tracing::warn!(
                registration_id = %registration.id,
                claimed_order_id = %cmd.order_id,
                "Payment reported for a different order"
            );
            return Err(RegistrationError::order_mismatch(registration.id));
        }

        // 3. Signature
        let signature_valid = self
            .verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature);

        if registration.is_paid() {
            return if registration.is_settled_by(&cmd.payment_id, &cmd.signature) {
                tracing::info!(registration_id = %registration.id, "Payment already verified");
                Ok(VerifyPaymentResult {
                    registration_id: registration.id,
                    status: PaymentStatus::Paid,
                    already_settled: true,
                })
            } else if !signature_valid {
                Err(RegistrationError::invalid_signature(registration.id))
            } else {
                Err(RegistrationError::already_paid(registration.id))
            };
        }

        if !signature_valid {
            registration.mark_failed(cmd.payment_id.clone(), cmd.signature)?;
            self.repository.update(&registration).await?;

            tracing::warn!(
                registration_id = %registration.id,
                order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                status = %registration.payment_status,
                "Payment signature rejected"
            );
            return Err(RegistrationError::invalid_signature(registration.id));
        }

        // 4. Settle
        registration.mark_paid(cmd.payment_id.clone(), cmd.signature, Timestamp::now())?;
        self.repository.update(&registration).await?;

        tracing::info!(
            registration_id = %registration.id,
            order_id = %cmd.order_id,
            payment_id = %cmd.payment_id,
            status = %registration.payment_status,
            "Payment verified"
        );

        Ok(VerifyPaymentResult {
            registration_id: registration.id,
            status: registration.payment_status,
            already_settled: false,
        })
    }
}
