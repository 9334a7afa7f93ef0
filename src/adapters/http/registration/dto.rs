//! Request and response DTOs for the registration API.
//!
//! Field names follow what the checkout client already sends: camelCase for
//! our own fields, Razorpay's snake_case for the payment report.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::RegistrationId;
use crate::domain::registration::details::scalar_string;
use crate::ports::GatewayOrder;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Payment report posted by the checkout client after Razorpay returns.
///
/// Missing or null fields deserialize as empty strings and fail the normal
/// checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyPaymentRequest {
    #[serde(rename = "registrationId", deserialize_with = "text_or_empty")]
    pub registration_id: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub razorpay_order_id: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub razorpay_payment_id: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub razorpay_signature: String,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_string(deserializer)?.unwrap_or_default())
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a created order; `order` is the gateway object verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: GatewayOrder,
    pub registration_id: RegistrationId,
}

/// `{ "ok": true }`
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Error body: a client-facing message plus a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
