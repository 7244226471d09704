//! Async connection pool for Diesel SQLite connections.
//!
//! Diesel's SQLite connection is synchronous. `diesel-async`'s
//! [`SyncConnectionWrapper`] runs it on Tokio's blocking pool so repositories
//! use the same async Diesel API they would against a server database, and
//! `bb8` handles checkout and limits.
//!
//! Every new connection runs [`CONNECTION_PRAGMAS`] before it joins the pool.

use std::time::Duration;

use diesel::{ConnectionError, ConnectionResult};
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Async-capable SQLite connection.
pub type AsyncSqliteConnection = SyncConnectionWrapper<SqliteConnection>;

/// Per-connection settings. Writers wait up to five seconds for the file lock
/// instead of failing with `SQLITE_BUSY`, and WAL lets readers run alongside a
/// writer.
const CONNECTION_PRAGMAS: &str =
    "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;";

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cafes::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("cafes.db")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_url(), "cafes.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a configuration for the SQLite file at `database_url`.
    ///
    /// Defaults: 8 connections, none kept idle, 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 8,
            min_idle: None,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Pool of SQLite connections.
///
/// Connections are opened lazily; a missing schema surfaces as a query
/// error on first use rather than at build time.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncSqliteConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(establish_connection);
        let manager = AsyncDieselConnectionManager::<AsyncSqliteConnection>::new_with_config(
            &config.database_url,
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncSqliteConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

fn establish_connection(url: &str) -> BoxFuture<'_, ConnectionResult<AsyncSqliteConnection>> {
    async move {
        let mut conn = AsyncSqliteConnection::establish(url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}
