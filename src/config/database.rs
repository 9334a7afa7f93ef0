//! Registration store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Upper bound on pooled connections; the service issues one short query
/// per request step.
const MAX_POOL_SIZE: u32 = 50;

/// Backing store selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStore {
    Postgres,
    /// Process-local map; contents are lost on restart.
    InMemory,
}

/// Database configuration
///
/// Leaving `url` empty selects the in-memory store, which production
/// refuses.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Apply `migrations/` when the pool is opened
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn store(&self) -> RegistrationStore {
        if self.url.trim().is_empty() {
            RegistrationStore::InMemory
        } else {
            RegistrationStore::Postgres
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match self.store() {
            RegistrationStore::InMemory if *environment == Environment::Production => {
                Err(ValidationError::MissingRequired("DATABASE_URL"))
            }
            RegistrationStore::InMemory => Ok(()),
            RegistrationStore::Postgres => {
                let url = self.url.trim();
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
                if self.max_connections == 0 || self.max_connections > MAX_POOL_SIZE {
                    return Err(ValidationError::InvalidPoolSize);
                }
                if self.connect_timeout_secs == 0 {
                    return Err(ValidationError::InvalidTimeout);
                }
                Ok(())
            }
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_run_migrations() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_url_selects_memory_store() {
        let config = DatabaseConfig {
            url: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.store(), RegistrationStore::InMemory);
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Staging).is_ok());
    }

    #[test]
    fn production_refuses_memory_store() {
        assert_eq!(
            DatabaseConfig::default().validate(&Environment::Production),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }

    #[test]
    fn postgres_url_selects_postgres_store() {
        let config = postgres("postgresql://farm:pw@localhost:5432/farm");
        assert_eq!(config.store(), RegistrationStore::Postgres);
        assert!(config.validate(&Environment::Production).is_ok());
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert!(config.run_migrations);
    }

    #[test]
    fn non_postgres_url_is_rejected() {
        assert_eq!(
            postgres("mongodb://localhost/farm").validate(&Environment::Development),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn pool_size_must_be_in_range() {
        for size in [0, MAX_POOL_SIZE + 1] {
            let config = DatabaseConfig {
                max_connections: size,
                ..postgres("postgres://localhost/farm")
            };
            assert_eq!(
                config.validate(&Environment::Development),
                Err(ValidationError::InvalidPoolSize)
            );
        }
    }

    #[test]
    fn zero_connect_timeout_is_rejected() {
        let config = DatabaseConfig {
            connect_timeout_secs: 0,
            ..postgres("postgres://localhost/farm")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTimeout)
        );
    }
}
