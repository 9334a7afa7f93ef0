//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Razorpay, including:
//! - Order creation over the Orders REST API
//! - A mock gateway for tests and local development
//!
//! Payment signature verification lives in the domain
//! (`domain::registration::PaymentSignatureVerifier`); it needs only the
//! key secret, never a network call.
//!
//! # Configuration
//!
//! Required environment variables:
//! - `FARM_REGISTRATION__PAYMENT__RAZORPAY_KEY_ID`
//! - `FARM_REGISTRATION__PAYMENT__RAZORPAY_KEY_SECRET`

mod mock_payment_gateway;
mod razorpay_adapter;

pub use mock_payment_gateway::MockPaymentGateway;
pub use razorpay_adapter::{RazorpayConfig, RazorpayPaymentAdapter};
