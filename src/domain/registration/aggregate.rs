//! Registration aggregate entity.
//!
//! A Registration is one farmer form submission plus its payment lifecycle.
//!
//! # Invariants
//!
//! - `id` is globally unique and never changes
//! - `order_id` is set at most once
//! - `payment_status == Paid` implies `paid_at`, `payment_id` and `signature` are set
//! - Status transitions follow the `PaymentStatus` state machine

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId, StateMachine, Timestamp};

use super::{FarmerDetails, PaymentStatus};

/// Registration aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Unique identifier for this registration.
    pub id: RegistrationId,

    /// Form payload, passed through unchanged.
    pub details: FarmerDetails,

    /// Gateway order bound to this registration.
    pub order_id: Option<String>,

    /// Current payment state.
    pub payment_status: PaymentStatus,

    /// Payment id from the last reported payment attempt.
    pub payment_id: Option<String>,

    /// Signature from the last reported payment attempt.
    pub signature: Option<String>,

    /// When the payment was verified.
    pub paid_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Optimistic concurrency counter, owned by the repository.
    pub version: i32,
}

impl Registration {
    /// Create a new pending registration from a form submission.
    pub fn create(id: RegistrationId, details: FarmerDetails) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            details: details.strip_reserved(),
            order_id: None,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            signature: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Bind the gateway order to this registration.
    ///
    /// # Errors
    ///
    /// Fails if an order is already bound, the id is empty, or the
    /// registration is no longer pending.
    pub fn attach_order(&mut self, order_id: impl Into<String>) -> Result<(), DomainError> {
        let order_id = order_id.into();
        if order_id.trim().is_empty() {
            return Err(DomainError::validation("orderId", "Gateway order id is empty"));
        }
        if self.order_id.is_some() {
            return Err(self.state_error("attach order to"));
        }
        if self.payment_status != PaymentStatus::Pending {
            return Err(self.state_error("attach order to"));
        }

        self.order_id = Some(order_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns true if `claimed` is the order bound to this registration.
    ///
    /// A registration without an order matches nothing.
    pub fn order_matches(&self, claimed: &str) -> bool {
        match &self.order_id {
            Some(order_id) => !claimed.is_empty() && order_id == claimed,
            None => false,
        }
    }

    /// Record a verified payment.
    ///
    /// # Errors
    ///
    /// Returns error if the current status does not allow payment.
    pub fn mark_paid(
        &mut self,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
        paid_at: Timestamp,
    ) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Paid)?;
        self.payment_id = Some(payment_id.into());
        self.signature = Some(signature.into());
        self.paid_at = Some(paid_at);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record a payment attempt whose signature did not verify.
    ///
    /// # Errors
    ///
    /// Returns error if the registration is already paid or its order failed.
    pub fn mark_failed(
        &mut self,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Failed)?;
        self.payment_id = Some(payment_id.into());
        self.signature = Some(signature.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record that the gateway order could not be opened.
    pub fn mark_order_failed(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::OrderFailed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// True if this paid registration was settled by exactly this payment report.
    pub fn is_settled_by(&self, payment_id: &str, signature: &str) -> bool {
        self.is_paid()
            && self.payment_id.as_deref() == Some(payment_id)
            && self.signature.as_deref() == Some(signature)
    }

    fn transition_to(&mut self, target: PaymentStatus) -> Result<(), DomainError> {
        let current = self.payment_status;
        self.payment_status = current.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("current", current.as_str())
        })?;
        Ok(())
    }

    fn state_error(&self, attempted: &str) -> DomainError {
        DomainError::new(ErrorCode::InvalidStateTransition, attempted)
            .with_detail("current", self.payment_status.as_str())
    }
}
