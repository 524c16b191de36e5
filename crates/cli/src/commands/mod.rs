//! CLI subcommand implementations.

pub mod check_in;
pub mod event;
pub mod migrate;

use passin_server::config::{ConfigError, ServerConfig};
use passin_server::db::{attendees::PgAttendeeStore, create_pool};
use sqlx::PgPool;
use thiserror::Error;

/// Errors from connecting to the database.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect to the database named by `PASSIN_DATABASE_URL`.
///
/// Uses the same configuration loading and pool settings as the server.
pub async fn connect() -> Result<PgPool, ConnectError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    Ok(create_pool(&config.database_url).await?)
}

/// Connect and wrap the pool in the attendee store.
pub async fn connect_store() -> Result<PgAttendeeStore, ConnectError> {
    Ok(PgAttendeeStore::new(connect().await?))
}
