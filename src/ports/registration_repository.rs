//! Registration repository port.
//!
//! Defines the contract for persisting and retrieving Registration aggregates.
//!
//! # Design
//!
//! - **Schema owner**: `create` rejects records missing required form fields
//! - **Optimistic locking**: `update` only applies to the version that was read
//!
//! # Example
//!
//! ```ignore
//! let mut registration = repo
//!     .find_by_id(&id)
//!     .await?
//!     .ok_or_else(|| RegistrationError::not_found(id))?;
//!
//! registration.mark_paid(payment_id, signature, Timestamp::now())?;
//! repo.update(&registration).await?; // fails if another request won the race
//! ```

use crate::domain::foundation::{DomainError, RegistrationId};
use crate::domain::registration::Registration;
use async_trait::async_trait;

/// Repository port for Registration persistence.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Persist a new registration.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if required form fields are missing
    /// - `DatabaseError` on persistence failure
    async fn create(&self, registration: &Registration) -> Result<(), DomainError>;

    /// Find a registration by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError>;

    /// Update an existing registration.
    ///
    /// Succeeds only if the stored version equals `registration.version`;
    /// the stored version is then incremented.
    ///
    /// # Errors
    ///
    /// - `RegistrationNotFound` if the registration doesn't exist
    /// - `ConcurrentModification` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, registration: &Registration) -> Result<(), DomainError>;
}
