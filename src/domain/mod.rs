//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `registration` - Farmer registration and its payment lifecycle

pub mod foundation;
pub mod registration;
