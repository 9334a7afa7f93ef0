//! PostgreSQL adapters.
//!
//! Repository implementations backed by a `sqlx::PgPool`, plus pool
//! construction from `DatabaseConfig`.

mod registration_repository;

pub use registration_repository::PostgresRegistrationRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Embedded migrations under `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect a pool according to configuration and optionally run migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect(config.url.trim())
        .await?;

    if config.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}
