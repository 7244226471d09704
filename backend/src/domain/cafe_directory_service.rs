//! Cafe directory domain service.
//!
//! Implements the cafe driving ports over a [`CafeRepository`]. Form
//! validation runs before the store is touched, and a name collision reported
//! by the store is folded back into the form errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AddCafeOutcome, CafeRepository, CafeRepositoryError, CafesCommand, CafesQuery,
};
use crate::domain::{
    Cafe, CafeField, CafeForm, CafeId, DUPLICATE_NAME_MESSAGE, Error, FormErrors,
};

fn map_repository_error(error: CafeRepositoryError) -> Error {
    match error {
        CafeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cafe repository unavailable: {message}"))
        }
        CafeRepositoryError::Query { message } => {
            Error::internal(format!("cafe repository error: {message}"))
        }
        CafeRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("a cafe named {name:?} already exists"))
        }
        CafeRepositoryError::NotFound { id } => Error::not_found(format!("cafe {id} not found")),
    }
}

/// Service implementing [`CafesQuery`] and [`CafesCommand`].
#[derive(Clone)]
pub struct CafeDirectoryService<R> {
    cafe_repo: Arc<R>,
}

impl<R> CafeDirectoryService<R> {
    /// Create a service over the cafe repository.
    pub fn new(cafe_repo: Arc<R>) -> Self {
        Self { cafe_repo }
    }
}

#[async_trait]
impl<R> CafesQuery for CafeDirectoryService<R>
where
    R: CafeRepository,
{
    async fn list_cafes(&self) -> Result<Vec<Cafe>, Error> {
        self.cafe_repo
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get_cafe(&self, id: CafeId) -> Result<Cafe, Error> {
        self.cafe_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("cafe {id} not found")))
    }
}

#[async_trait]
impl<R> CafesCommand for CafeDirectoryService<R>
where
    R: CafeRepository,
{
    async fn add_cafe(&self, form: &CafeForm) -> Result<AddCafeOutcome, Error> {
        let new_cafe = match form.validate() {
            Ok(new_cafe) => new_cafe,
            Err(errors) => return Ok(AddCafeOutcome::Rejected(errors)),
        };

        match self.cafe_repo.insert(&new_cafe).await {
            Ok(id) => {
                info!(cafe_id = %id, name = %new_cafe.name, "cafe added");
                Ok(AddCafeOutcome::Added(Cafe::new(id, new_cafe)))
            }
            Err(CafeRepositoryError::DuplicateName { name }) => {
                warn!(name = %name, "rejected duplicate cafe name");
                let mut errors = FormErrors::default();
                errors.add(CafeField::Name, DUPLICATE_NAME_MESSAGE);
                Ok(AddCafeOutcome::Rejected(errors))
            }
            Err(other) => Err(map_repository_error(other)),
        }
    }

    async fn delete_cafe(&self, id: CafeId) -> Result<(), Error> {
        self.cafe_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        info!(cafe_id = %id, "cafe deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "cafe_directory_service_tests.rs"]
mod tests;
