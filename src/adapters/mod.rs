//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `memory` - In-memory registration store for tests and local runs
//! - `postgres` - PostgreSQL registration store (sqlx)
//! - `razorpay` - Razorpay order gateway (reqwest) and its mock

pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;

pub use memory::InMemoryRegistrationRepository;
pub use postgres::PostgresRegistrationRepository;
pub use razorpay::{MockPaymentGateway, RazorpayConfig, RazorpayPaymentAdapter};
