//! Embedded Diesel migrations for the gallery schema.
//!
//! Migrations are compiled into the binary so a deployed server can bring
//! an empty database up to date without shipping the SQL files alongside it.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration to the database at `database_url`.
///
/// Blocks the calling thread; async callers should wrap this in
/// `tokio::task::spawn_blocking`. Returns the number of migrations applied.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|error| MigrationError::Connect {
            message: error.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })?;
    Ok(applied.len())
}
