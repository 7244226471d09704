//! Port for cafe persistence.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{Cafe, CafeId, NewCafe};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cafe repository adapters.
    pub enum CafeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "cafe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cafe repository query failed: {message}",
        /// Another cafe already uses this name.
        DuplicateName { name: String } =>
            "a cafe named {name:?} already exists",
        /// No cafe has this identifier.
        NotFound { id: CafeId } =>
            "cafe {id} does not exist",
    }
}

/// Port for reading and writing cafe records.
///
/// Every mutating call commits on its own; there is no unit of work spanning
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CafeRepository: Send + Sync {
    /// Every cafe in identifier order.
    async fn list_all(&self) -> Result<Vec<Cafe>, CafeRepositoryError>;

    /// Fetch one cafe; `None` when the identifier is unknown.
    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafeRepositoryError>;

    /// Store a new cafe and return its assigned identifier.
    async fn insert(&self, cafe: &NewCafe) -> Result<CafeId, CafeRepositoryError>;

    /// Remove one cafe, failing with `NotFound` when nothing was removed.
    async fn delete_by_id(&self, id: CafeId) -> Result<(), CafeRepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    rows: BTreeMap<CafeId, NewCafe>,
}

/// Process-local repository with the same uniqueness and not-found rules as
/// the SQLite adapter.
#[derive(Debug, Default)]
pub struct InMemoryCafeRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryCafeRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `cafes`. Later duplicates of a name are
    /// skipped.
    #[must_use]
    pub fn with_cafes(cafes: impl IntoIterator<Item = NewCafe>) -> Self {
        let repo = Self::new();
        {
            let mut state = repo.lock();
            for cafe in cafes {
                let _ = Self::insert_locked(&mut state, &cafe);
            }
        }
        repo
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert_locked(
        state: &mut InMemoryState,
        cafe: &NewCafe,
    ) -> Result<CafeId, CafeRepositoryError> {
        if state.rows.values().any(|row| row.name == cafe.name) {
            return Err(CafeRepositoryError::duplicate_name(cafe.name.as_str()));
        }
        state.next_id += 1;
        let id = CafeId::new(state.next_id);
        state.rows.insert(id, cafe.clone());
        Ok(id)
    }
}

#[async_trait]
impl CafeRepository for InMemoryCafeRepository {
    async fn list_all(&self) -> Result<Vec<Cafe>, CafeRepositoryError> {
        let state = self.lock();
        Ok(state
            .rows
            .iter()
            .map(|(id, details)| Cafe::new(*id, details.clone()))
            .collect())
    }

    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafeRepositoryError> {
        let state = self.lock();
        Ok(state
            .rows
            .get(&id)
            .map(|details| Cafe::new(id, details.clone())))
    }

    async fn insert(&self, cafe: &NewCafe) -> Result<CafeId, CafeRepositoryError> {
        let mut state = self.lock();
        Self::insert_locked(&mut state, cafe)
    }

    async fn delete_by_id(&self, id: CafeId) -> Result<(), CafeRepositoryError> {
        let mut state = self.lock();
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CafeRepositoryError::not_found(id))
    }
}
