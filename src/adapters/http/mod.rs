//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the registration routes with the cross-cutting
//! layers: request tracing, timeout, CORS and the JSON body limit.

pub mod middleware;
pub mod registration;

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use middleware::create_cors_layer;
pub use registration::{registration_router, RegistrationAppState};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Router-level settings taken from `ServerConfig`.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the complete application router.
pub fn app_router(state: RegistrationAppState, settings: &HttpSettings) -> Router {
    registration_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(create_cors_layer(&settings.cors_origins))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    )
}
