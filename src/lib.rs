//! Farm Registration - farmer registration intake with Razorpay payments
//!
//! A farmer submits a registration form; the service stores it as pending,
//! opens a Razorpay order for the registration fee and later confirms the
//! payment by checking the HMAC-SHA256 signature the checkout returns.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
