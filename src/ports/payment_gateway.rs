//! Payment gateway port for opening payment orders.
//!
//! Defines the contract for the external payment processor (e.g., Razorpay).
//! The gateway's shared secret is not part of this contract: it is only used
//! locally to verify payment signatures.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a new order for the customer to pay.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, PaymentGatewayError>;
}

/// Request to open an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in the currency's minor unit (paise for INR).
    pub amount: i64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Merchant receipt label.
    pub receipt: String,

    /// Free-form key/value metadata stored with the order.
    pub notes: OrderNotes,
}

/// Metadata attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotes {
    pub farmer_name: String,
    pub contact_number: String,
}

/// Order as returned by the gateway.
///
/// Returned to the checkout client verbatim, so unknown gateway fields are
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order id (e.g. `order_...`).
    pub id: String,

    #[serde(default)]
    pub entity: Option<String>,

    pub amount: i64,

    #[serde(default)]
    pub amount_paid: i64,

    #[serde(default)]
    pub amount_due: i64,

    pub currency: String,

    #[serde(default)]
    pub receipt: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub attempts: u32,

    #[serde(default)]
    pub notes: serde_json::Value,

    /// Gateway creation time (Unix seconds).
    #[serde(default)]
    pub created_at: i64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payment gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentGatewayError {
    #[error("Gateway network error: {0}")]
    Network(String),

    #[error("Gateway rejected credentials")]
    Unauthorized,

    #[error("Gateway rejected request: {0}")]
    BadRequest(String),

    #[error("Gateway error: {0}")]
    Provider(String),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}

impl PaymentGatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        PaymentGatewayError::Network(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        PaymentGatewayError::Provider(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        PaymentGatewayError::InvalidResponse(message.into())
    }
}
