//! Registration-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | OrderMismatch | 400 |
//! | InvalidSignature | 400 |
//! | ValidationFailed | 400 |
//! | AlreadyPaid | 409 |
//! | InvalidState | 409 |
//! | ConcurrentModification | 409 |
//! | OrderCreationFailed | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId};

/// Errors of the order-creation and payment-verification workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No registration with this id (or the id is malformed).
    NotFound(String),

    /// The claimed gateway order is not the one bound to the registration.
    OrderMismatch { registration_id: RegistrationId },

    /// The payment signature did not verify.
    InvalidSignature { registration_id: RegistrationId },

    /// The registration is already paid with a different payment.
    AlreadyPaid { registration_id: RegistrationId },

    /// Operation not allowed in the current payment state.
    InvalidState { current: String, attempted: String },

    /// Another request changed the registration first.
    ConcurrentModification(RegistrationId),

    /// Required form data missing or malformed.
    ValidationFailed { field: String, message: String },

    /// The gateway could not open an order.
    OrderCreationFailed(String),

    /// Store or other infrastructure failure.
    Infrastructure(String),
}

impl RegistrationError {
    pub fn not_found(id: impl ToString) -> Self {
        RegistrationError::NotFound(id.to_string())
    }

    pub fn order_mismatch(registration_id: RegistrationId) -> Self {
        RegistrationError::OrderMismatch { registration_id }
    }

    pub fn invalid_signature(registration_id: RegistrationId) -> Self {
        RegistrationError::InvalidSignature { registration_id }
    }

    pub fn already_paid(registration_id: RegistrationId) -> Self {
        RegistrationError::AlreadyPaid { registration_id }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        RegistrationError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn concurrent_modification(id: RegistrationId) -> Self {
        RegistrationError::ConcurrentModification(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn order_creation_failed(reason: impl Into<String>) -> Self {
        RegistrationError::OrderCreationFailed(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RegistrationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::NotFound(_) => ErrorCode::RegistrationNotFound,
            RegistrationError::OrderMismatch { .. } => ErrorCode::OrderMismatch,
            RegistrationError::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            RegistrationError::AlreadyPaid { .. } => ErrorCode::AlreadyPaid,
            RegistrationError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            RegistrationError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            RegistrationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RegistrationError::OrderCreationFailed(_) => ErrorCode::PaymentGatewayError,
            RegistrationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a message suitable for logs.
    pub fn message(&self) -> String {
        match self {
            RegistrationError::NotFound(id) => format!("Registration not found: {}", id),
            RegistrationError::OrderMismatch { registration_id } => {
                format!("Order mismatch for registration {}", registration_id)
            }
            RegistrationError::InvalidSignature { registration_id } => {
                format!("Invalid payment signature for registration {}", registration_id)
            }
            RegistrationError::AlreadyPaid { registration_id } => {
                format!("Registration {} is already paid", registration_id)
            }
            RegistrationError::InvalidState { current, attempted } => {
                format!("Cannot {} registration in {} state", attempted, current)
            }
            RegistrationError::ConcurrentModification(id) => {
                format!("Registration {} was modified concurrently", id)
            }
            RegistrationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RegistrationError::OrderCreationFailed(reason) => {
                format!("Order creation failed: {}", reason)
            }
            RegistrationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Expected business outcomes, as opposed to incidents.
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            RegistrationError::OrderCreationFailed(_) | RegistrationError::Infrastructure(_)
        )
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                RegistrationError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::InvalidStateTransition => RegistrationError::InvalidState {
                current: err
                    .details
                    .get("current")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                attempted: err.message,
            },
            ErrorCode::ConcurrentModification => match err
                .details
                .get("registration_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => RegistrationError::ConcurrentModification(id),
                None => RegistrationError::Infrastructure(err.to_string()),
            },
            _ => RegistrationError::Infrastructure(err.to_string()),
        }
    }
}
