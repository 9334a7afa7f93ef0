//! Axum router configuration for registration endpoints.
//!
//! This module defines the route structure for the registration API
//! and wires them to their corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    api_test, create_order, get_payment_status, health, service_info, verify_payment,
    RegistrationAppState,
};

/// Create the registration API router, mounted under `/api`.
///
/// # Routes
/// - `GET /test` - Connectivity probe
/// - `POST /create-order` - Store the form and open a payment order
/// - `POST /verify-payment` - Verify a payment report
/// - `GET /registrations/:id/payment` - Payment state of a registration
pub fn registration_routes() -> Router<RegistrationAppState> {
    Router::new()
        .route("/test", get(api_test))
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/registrations/:id/payment", get(get_payment_status))
}

/// Create the complete registration module router.
///
/// # Routes
/// - `GET /` - Service information
/// - `GET /health` - Liveness probe
/// - `/api/...` - See [`registration_routes`]
pub fn registration_router() -> Router<RegistrationAppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .nest("/api", registration_routes())
}
