//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `cors` - Cross-origin policy from server configuration

pub mod cors;

pub use cors::create_cors_layer;
