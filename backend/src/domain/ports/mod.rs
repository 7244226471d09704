//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cafe_repository;
mod cafes_command;
mod cafes_query;

#[cfg(test)]
pub use cafe_repository::MockCafeRepository;
pub use cafe_repository::{CafeRepository, CafeRepositoryError, InMemoryCafeRepository};
#[cfg(test)]
pub use cafes_command::MockCafesCommand;
pub use cafes_command::{AddCafeOutcome, CafesCommand};
#[cfg(test)]
pub use cafes_query::MockCafesQuery;
pub use cafes_query::CafesQuery;
