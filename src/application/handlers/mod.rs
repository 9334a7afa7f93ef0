//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod registration;

pub use registration::{
    CreateOrderCommand, CreateOrderHandler, CreateOrderResult, GetPaymentStatusHandler,
    GetPaymentStatusQuery, OrderPolicy, PaymentStatusView, VerifyPaymentCommand,
    VerifyPaymentHandler, VerifyPaymentResult,
};
