//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Razorpay Orders API.
//!
//! # Security
//!
//! - API calls authenticate with HTTP basic auth (key id / key secret)
//! - The key secret is held as `secrecy::SecretString` and never logged
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret);
//! let adapter = RazorpayPaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{CreateOrderRequest, GatewayOrder, PaymentGateway, PaymentGatewayError};

const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key id (rzp_live_... or rzp_test_...).
    key_id: String,

    /// Key secret, also the payment signature secret.
    key_secret: SecretString,

    /// Base URL for the Razorpay API.
    api_base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_base_url)
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Error envelope returned by Razorpay on non-2xx responses.
#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorBody,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Razorpay payment gateway adapter.
pub struct RazorpayPaymentAdapter {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayPaymentAdapter {
    /// Create a new adapter with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built (e.g. TLS backend unavailable).
    pub fn new(config: RazorpayConfig) -> Result<Self, PaymentGatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentGatewayError::provider(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentGatewayError {
        let description = serde_json::from_str::<RazorpayErrorEnvelope>(body)
            .ok()
            .map(|envelope| {
                format!(
                    "{}: {}",
                    envelope.error.code.unwrap_or_else(|| "UNKNOWN".to_string()),
                    envelope.error.description.unwrap_or_default()
                )
            })
            .unwrap_or_else(|| body.to_string());

        match status {
            reqwest::StatusCode::UNAUTHORIZED => PaymentGatewayError::Unauthorized,
            s if s.is_client_error() => PaymentGatewayError::BadRequest(description),
            _ => PaymentGatewayError::provider(format!("HTTP {}: {}", status, description)),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayPaymentAdapter {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, PaymentGatewayError> {
        let response = self
            .http_client
            .post(self.config.orders_url())
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&request)
            .send()
            .await
            .map_err(|e| PaymentGatewayError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                receipt = %request.receipt,
                error = %error_text,
                "Razorpay create_order failed"
            );
            return Err(Self::error_from_response(status, &error_text));
        }

        let order: GatewayOrder = response.json().await.map_err(|e| {
            PaymentGatewayError::invalid_response(format!("Failed to parse Razorpay order: {}", e))
        })?;

        tracing::debug!(order_id = %order.id, receipt = %request.receipt, "Razorpay order created");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RazorpayConfig {
        RazorpayConfig::new("rzp_test_key", SecretString::new("topsecret".to_string()))
    }

    #[test]
    fn orders_url_uses_default_base() {
        assert_eq!(config().orders_url(), "https://api.razorpay.com/v1/orders");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = config().with_base_url("http://localhost:9000/");
        assert_eq!(config.orders_url(), "http://localhost:9000/v1/orders");
    }

    #[test]
    fn debug_redacts_secret() {
        let debug = format!("{:?}", config());
        assert!(debug.contains("rzp_test_key"));
        assert!(!debug.contains("topsecret"));
    }

    #[test]
    fn unauthorized_maps_to_unauthorized() {
        let err = RazorpayPaymentAdapter::error_from_response(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Authentication failed"}}"#,
        );
        assert_eq!(err, PaymentGatewayError::Unauthorized);
    }

    #[test]
    fn client_error_carries_razorpay_description() {
        let err = RazorpayPaymentAdapter::error_from_response(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"amount must be at least 100"}}"#,
        );
        assert_eq!(
            err,
            PaymentGatewayError::BadRequest(
                "BAD_REQUEST_ERROR: amount must be at least 100".to_string()
            )
        );
    }

    #[test]
    fn server_error_with_plain_body_maps_to_provider() {
        let err = RazorpayPaymentAdapter::error_from_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream unavailable",
        );
        assert!(matches!(err, PaymentGatewayError::Provider(msg) if msg.contains("upstream unavailable")));
    }

    #[test]
    fn adapter_builds_from_config() {
        assert!(RazorpayPaymentAdapter::new(config().with_timeout(Duration::from_secs(5))).is_ok());
    }
}
