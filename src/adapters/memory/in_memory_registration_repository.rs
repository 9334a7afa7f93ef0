//! In-Memory Registration Repository
//!
//! Stores registrations in a process-local map with the same validation and
//! optimistic-locking rules as the PostgreSQL adapter.
//! Useful for testing and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId};
use crate::domain::registration::Registration;
use crate::ports::RegistrationRepository;

/// In-memory storage for registrations
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationRepository {
    registrations: Arc<RwLock<HashMap<RegistrationId, Registration>>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored registrations
    pub async fn count(&self) -> usize {
        self.registrations.read().await.len()
    }

    /// All stored registrations, in no particular order
    pub async fn all(&self) -> Vec<Registration> {
        self.registrations.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        registration.details.validate_required()?;

        let mut registrations = self.registrations.write().await;
        if registrations.contains_key(&registration.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Registration {} already exists", registration.id),
            ));
        }
        registrations.insert(registration.id, registration.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        Ok(self.registrations.read().await.get(id).cloned())
    }

    async fn update(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut registrations = self.registrations.write().await;
        let stored = registrations.get_mut(&registration.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::RegistrationNotFound,
                format!("Registration {} not found", registration.id),
            )
        })?;

        if stored.version != registration.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Registration {} is at version {}, update was based on {}",
                    registration.id, stored.version, registration.version
                ),
            )
            .with_detail("registration_id", registration.id.to_string()));
        }

        let mut next = registration.clone();
        next.version = registration.version + 1;
        *stored = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::details::complete_details;
    use crate::domain::registration::FarmerDetails;

    fn registration() -> Registration {
        Registration::create(RegistrationId::new(), complete_details())
    }

    #[tokio::test]
    async fn create_then_find_returns_registration() {
        let repo = InMemoryRegistrationRepository::new();
        let reg = registration();

        repo.create(&reg).await.unwrap();

        let found = repo.find_by_id(&reg.id).await.unwrap();
        assert_eq!(found, Some(reg));
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let repo = InMemoryRegistrationRepository::new();
        let found = repo.find_by_id(&RegistrationId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let repo = InMemoryRegistrationRepository::new();
        let reg = Registration::create(RegistrationId::new(), FarmerDetails::default());

        let err = repo.create(&reg).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryRegistrationRepository::new();
        let mut reg = registration();
        repo.create(&reg).await.unwrap();

        reg.attach_order("order_1").unwrap();
        repo.update(&reg).await.unwrap();

        let stored = repo.find_by_id(&reg.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.order_id.as_deref(), Some("order_1"));
    }

    #[tokio::test]
    async fn stale_update_is_rejected() {
        let repo = InMemoryRegistrationRepository::new();
        let reg = registration();
        repo.create(&reg).await.unwrap();

        let mut first = reg.clone();
        let mut second = reg.clone();
        first.attach_order("order_1").unwrap();
        second.attach_order("order_2").unwrap();

        repo.update(&first).await.unwrap();
        let err = repo.update(&second).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrentModification);
        let stored = repo.find_by_id(&reg.id).await.unwrap().unwrap();
        assert_eq!(stored.order_id.as_deref(), Some("order_1"));
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let repo = InMemoryRegistrationRepository::new();
        let err = repo.update(&registration()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistrationNotFound);
    }
}
