//! Driving port for cafe mutations.

use async_trait::async_trait;

use crate::domain::{Cafe, CafeForm, CafeId, Error, FormErrors};

/// Result of an add-cafe submission that reached the store or was rejected
/// by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCafeOutcome {
    /// The cafe was stored.
    Added(Cafe),
    /// The submission failed validation or collided with an existing name;
    /// nothing was stored.
    Rejected(FormErrors),
}

/// Driving port for adding and removing cafes.
///
/// Authorisation happens in the inbound adapter; callers of `delete_cafe`
/// have already passed the admin gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CafesCommand: Send + Sync {
    /// Validate `form` and store the resulting cafe.
    ///
    /// Validation failures and duplicate names are reported as
    /// [`AddCafeOutcome::Rejected`]; `Err` is reserved for store failures.
    async fn add_cafe(&self, form: &CafeForm) -> Result<AddCafeOutcome, Error>;

    /// Remove one cafe; `NotFound` when the identifier is unknown.
    async fn delete_cafe(&self, id: CafeId) -> Result<(), Error>;
}
