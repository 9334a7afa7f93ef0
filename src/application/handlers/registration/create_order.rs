//! CreateOrderHandler - Command handler for registering a farmer and opening a payment order.

use std::sync::Arc;

use crate::domain::foundation::RegistrationId;
use crate::domain::registration::{FarmerDetails, Registration, RegistrationError};
use crate::ports::{
    CreateOrderRequest, GatewayOrder, OrderNotes, PaymentGateway, RegistrationRepository,
};

/// Charge applied to every registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Amount in minor units (paise).
    pub amount: i64,
    pub currency: String,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            amount: 30000,
            currency: "INR".to_string(),
        }
    }
}

/// Command to register a farmer and open the registration-fee order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub details: FarmerDetails,
}

/// Result of successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub registration_id: RegistrationId,
    pub order: GatewayOrder,
}

/// Handler for the create-order step of the registration flow.
///
/// The registration is stored as pending before the gateway is called, so a
/// gateway failure leaves an `order_failed` record rather than nothing.
pub struct CreateOrderHandler {
    repository: Arc<dyn RegistrationRepository>,
    gateway: Arc<dyn PaymentGateway>,
    policy: OrderPolicy,
}

impl CreateOrderHandler {
    pub fn new(
        repository: Arc<dyn RegistrationRepository>,
        gateway: Arc<dyn PaymentGateway>,
        policy: OrderPolicy,
    ) -> Self {
        Self {
            repository,
            gateway,
            policy,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, RegistrationError> {
        // 1. Persist pending registration
        let mut registration = Registration::create(RegistrationId::new(), cmd.details);
        self.repository.create(&registration).await?;

        // 2. Open the gateway order
        let request = CreateOrderRequest {
            amount: self.policy.amount,
            currency: self.policy.currency.clone(),
            receipt: registration.id.receipt(),
            notes: OrderNotes {
                farmer_name: registration.details.farmer_name_or_default().to_string(),
                contact_number: registration.details.contact_number_or_default().to_string(),
            },
        };

        let order = match self.gateway.create_order(request).await {
            Ok(order) => order,
            Err(gateway_error) => {
                return Err(self
                    .fail_order(&mut registration, gateway_error.to_string())
                    .await);
            }
        };

        // 3. Bind the order to the registration
        if let Err(e) = registration.attach_order(order.id.clone()) {
            return Err(self
                .fail_order(&mut registration, format!("Unusable gateway order: {}", e))
                .await);
        }
        self.repository.update(&registration).await?;

        tracing::info!(
            registration_id = %registration.id,
            order_id = %order.id,
            amount = order.amount,
            "Registration order created"
        );

        Ok(CreateOrderResult {
            registration_id: registration.id,
            order,
        })
    }

    async fn fail_order(&self, registration: &mut Registration, reason: String) -> RegistrationError {
        tracing::error!(
            registration_id = %registration.id,
            error = %reason,
            "Payment order creation failed"
        );
        self.record_order_failure(registration).await;
        RegistrationError::order_creation_failed(reason)
    }

    /// Best effort: a failure here is logged and never replaces the gateway error.
    async fn record_order_failure(&self, registration: &mut Registration) {
        if let Err(e) = registration.mark_order_failed() {
            tracing::warn!(registration_id = %registration.id, error = %e, "Cannot mark order failed");
            return;
        }
        if let Err(e) = self.repository.update(registration).await {
            tracing::warn!(
                registration_id = %registration.id,
                error = %e,
                "Failed to persist order_failed status"
            );
        }
    }
}
