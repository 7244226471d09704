//! Driving port for cafe read operations.
//!
//! Inbound adapters use this port to list and show cafes without depending
//! on repository details.

use async_trait::async_trait;

use crate::domain::{Cafe, CafeId, Error};

/// Driving port for cafe reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CafesQuery: Send + Sync {
    /// Every cafe in identifier order.
    async fn list_cafes(&self) -> Result<Vec<Cafe>, Error>;

    /// One cafe; [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the identifier is unknown.
    async fn get_cafe(&self, id: CafeId) -> Result<Cafe, Error>;
}
