//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by a single
//! SQLite file, reached through `diesel-async`'s sync connection wrapper and
//! `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel models and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to
//!   `CafeRepositoryError` variants.
//!
//! # Example
//!
//! ```no_run
//! use cafes::outbound::persistence::{DbPool, DieselCafeRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), cafes::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("cafes.db")).await?;
//! let repo = DieselCafeRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_cafe_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cafe_repository::DieselCafeRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{AsyncSqliteConnection, DbPool, PoolConfig, PoolError};
