//! In-memory adapters for tests and local development.

mod in_memory_registration_repository;

pub use in_memory_registration_repository::InMemoryRegistrationRepository;
