//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Database pool size must be between 1 and 50")]
    InvalidPoolSize,

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKeyId,

    #[error("Charge amount must be positive")]
    InvalidAmount,

    #[error("Currency must be a three-letter upper-case code")]
    InvalidCurrency,

    #[error("Invalid payment gateway URL")]
    InvalidGatewayUrl,
}
