//! Registration domain module.
//!
//! Farmer form submissions and their payment lifecycle.
//!
//! # Module Structure
//!
//! - `aggregate` - Registration aggregate entity
//! - `details` - Typed form payload with catch-all attributes
//! - `status` - PaymentStatus state machine
//! - `signature` - Gateway payment signature verification
//! - `errors` - RegistrationError taxonomy

mod aggregate;
pub(crate) mod details;
mod errors;
mod signature;
mod status;

pub use aggregate::Registration;
pub use details::{CropEntry, FarmerDetails};
pub use errors::RegistrationError;
pub use signature::{
    compute_payment_signature, verify_payment_signature, PaymentSignatureVerifier,
    SIGNATURE_SEPARATOR,
};
pub use status::PaymentStatus;
