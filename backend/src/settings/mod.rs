//! Server configuration.
//!
//! Non-secret settings come from [`ServerSettings`] (OrthoConfig, `CAFES_*`
//! environment variables or CLI flags). Secrets are read separately through
//! [`secrets_from_env`] so they never pass through argument parsing.

mod secrets;

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub use secrets::{BuildMode, Secrets, SettingsError, key_fingerprint, secrets_from_env};

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_DATABASE_URL: &str = "cafes.db";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Listener and store settings loaded at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAFES")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Path of the SQLite database file.
    pub database_url: Option<String>,
    /// Upper bound on pooled SQLite connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Configured bind address, or `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured database path, or `cafes.db`.
    #[must_use]
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Configured pool size, or 8.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
