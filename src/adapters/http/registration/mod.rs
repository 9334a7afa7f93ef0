//! HTTP adapter for registration endpoints.
//!
//! Exposes the registration flow via REST API:
//! - `GET /` - Service information
//! - `GET /health` - Liveness probe
//! - `GET /api/test` - Connectivity probe
//! - `POST /api/create-order` - Store a farmer registration and open its order
//! - `POST /api/verify-payment` - Verify the checkout's payment report
//! - `GET /api/registrations/:id/payment` - Poll a registration's payment state

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{RegistrationApiError, RegistrationAppState, ServiceInfo};
pub use routes::{registration_router, registration_routes};
