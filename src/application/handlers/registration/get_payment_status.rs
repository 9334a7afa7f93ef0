//! GetPaymentStatusHandler - Query handler for a registration's payment state.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{RegistrationId, Timestamp};
use crate::domain::registration::{PaymentStatus, Registration, RegistrationError};
use crate::ports::RegistrationRepository;

/// Query for the payment state of one registration.
#[derive(Debug, Clone)]
pub struct GetPaymentStatusQuery {
    pub registration_id: RegistrationId,
}

/// Read model exposed to polling clients. Never includes the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusView {
    pub registration_id: RegistrationId,
    pub payment_status: PaymentStatus,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub paid_at: Option<Timestamp>,
}

impl From<&Registration> for PaymentStatusView {
    fn from(registration: &Registration) -> Self {
        Self {
            registration_id: registration.id,
            payment_status: registration.payment_status,
            order_id: registration.order_id.clone(),
            payment_id: registration.payment_id.clone(),
            paid_at: registration.paid_at,
        }
    }
}

pub struct GetPaymentStatusHandler {
    repository: Arc<dyn RegistrationRepository>,
}

impl GetPaymentStatusHandler {
    pub fn new(repository: Arc<dyn RegistrationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetPaymentStatusQuery,
    ) -> Result<PaymentStatusView, RegistrationError> {
        let registration = self
            .repository
            .find_by_id(&query.registration_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(query.registration_id))?;

        Ok(PaymentStatusView::from(&registration))
    }
}
