//! Embedded schema migrations.
//!
//! Migrations under `backend/migrations` are compiled into the binary and
//! applied by the `create-schema` tool at deployment time. The server never
//! migrates on start-up.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Embedded migrations from the backend/migrations directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database file could not be opened.
    #[error("failed to open database {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: diesel::ConnectionError,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration to the SQLite file at `database_url`.
///
/// Returns the versions that were applied, oldest first. Already-applied
/// migrations are skipped, so repeated runs are harmless.
pub fn run_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|source| MigrationError::Connect {
            url: database_url.to_owned(),
            source,
        })?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    Ok(applied.iter().map(ToString::to_string).collect())
}
