//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed cafe repository using Diesel ORM.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod persistence;
