//! Registration command and query handlers.
//!
//! Commands:
//! - `CreateOrderHandler` - Store a registration and open its payment order
//! - `VerifyPaymentHandler` - Check a reported payment and settle the registration
//!
//! Queries:
//! - `GetPaymentStatusHandler` - Read the payment state of a registration

mod create_order;
mod get_payment_status;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult, OrderPolicy};
pub use get_payment_status::{GetPaymentStatusHandler, GetPaymentStatusQuery, PaymentStatusView};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
