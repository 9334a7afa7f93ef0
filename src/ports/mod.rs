//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RegistrationRepository` - Registration store
//! - `PaymentGateway` - Remote payment order creation

mod payment_gateway;
mod registration_repository;

pub use payment_gateway::{
    CreateOrderRequest, GatewayOrder, OrderNotes, PaymentGateway, PaymentGatewayError,
};
pub use registration_repository::RegistrationRepository;
