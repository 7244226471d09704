#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Apply the embedded migrations to the configured SQLite database.
//!
//! Reads the database path the same way the server does (`CAFES_DATABASE_URL`
//! or `--database-url`, default `cafes.db`). Safe to run repeatedly.
//!
//! # Examples
//! ```sh
//! CAFES_DATABASE_URL=/srv/cafes/cafes.db cargo run --bin create-schema
//! ```

use cafes::outbound::persistence::run_migrations;
use cafes::settings::ServerSettings;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(eyre!("failed to load .env: {e}"));
        }
    }
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let settings = ServerSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let database_url = settings.database_url();
    let applied = run_migrations(database_url)
        .wrap_err_with(|| format!("failed to create schema in {database_url}"))?;

    if applied.is_empty() {
        info!(database = database_url, "schema already up to date");
    } else {
        info!(database = database_url, migrations = ?applied, "schema migrations applied");
    }
    println!("{database_url}: {} migration(s) applied", applied.len());
    Ok(())
}
