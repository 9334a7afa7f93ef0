//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for unit and
//! integration tests. Supports:
//! - Deterministic order ids
//! - Error injection
//! - Request tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{CreateOrderRequest, GatewayOrder, PaymentGateway, PaymentGatewayError};

/// Mock payment gateway for testing.
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.set_error(PaymentGatewayError::network("connection reset"));
/// let result = gateway.create_order(request).await; // Err(Network)
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Orders handed out so far (also used to number new ids).
    requests: Vec<CreateOrderRequest>,

    /// Error returned by every call while set.
    error: Option<PaymentGatewayError>,

    /// Fixed id for the next order.
    next_order_id: Option<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway that fails every order.
    pub fn failing(error: PaymentGatewayError) -> Self {
        let gateway = Self::new();
        gateway.set_error(error);
        gateway
    }

    /// Fail all subsequent calls with `error`.
    pub fn set_error(&self, error: PaymentGatewayError) {
        self.inner.lock().unwrap().error = Some(error);
    }

    /// Use a fixed id for the next order.
    pub fn set_next_order_id(&self, id: impl Into<String>) {
        self.inner.lock().unwrap().next_order_id = Some(id.into());
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(error) = &state.error {
            return Err(error.clone());
        }

        let id = state
            .next_order_id
            .take()
            .unwrap_or_else(|| format!("order_mock{:06}", state.requests.len()));

        Ok(GatewayOrder {
            id,
            entity: Some("order".to_string()),
            amount: request.amount,
            amount_paid: 0,
            amount_due: request.amount,
            currency: request.currency,
            receipt: Some(request.receipt),
            status: Some("created".to_string()),
            attempts: 0,
            notes: serde_json::to_value(&request.notes).unwrap_or_default(),
            created_at: chrono::Utc::now().timestamp(),
            extra: Default::default(),
        })
    }
}
