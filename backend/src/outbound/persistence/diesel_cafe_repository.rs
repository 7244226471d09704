//! SQLite-backed `CafeRepository` implementation using Diesel ORM.
//!
//! Each operation is a single statement that commits on its own. Name
//! uniqueness is enforced by the table's UNIQUE constraint, so concurrent
//! inserts of the same name resolve in the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CafeRepository, CafeRepositoryError};
use crate::domain::{Cafe, CafeId, HttpsUrl, NewCafe, SeatingCapacity};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CafeRow, NewCafeRow};
use super::pool::{DbPool, PoolError};
use super::schema::cafe;

/// Diesel-backed implementation of the `CafeRepository` port.
#[derive(Clone)]
pub struct DieselCafeRepository {
    pool: DbPool,
}

impl DieselCafeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CafeRepositoryError {
    map_basic_pool_error(error, CafeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CafeRepositoryError {
    map_basic_diesel_error(
        error,
        CafeRepositoryError::query,
        CafeRepositoryError::connection,
    )
}

const fn flag_to_db(flag: bool) -> i32 {
    if flag { 1 } else { 0 }
}

/// Convert a database row to a domain cafe.
///
/// Rows written by this adapter always convert; a failure means the file was
/// edited outside the application. Failures are logged here with the offending
/// column.
fn row_to_cafe(row: CafeRow) -> Result<Cafe, CafeRepositoryError> {
    let id = CafeId::new(row.id);
    let corrupt = |column: &str| {
        tracing::warn!(cafe_id = %id, column, "stored cafe failed validation");
        CafeRepositoryError::query(format!("cafe {id} has an invalid {column}"))
    };

    let map_url = HttpsUrl::new(row.map_url).map_err(|_| corrupt("map_url"))?;
    let img_url = HttpsUrl::new(row.img_url).map_err(|_| corrupt("img_url"))?;
    let seats = SeatingCapacity::from_code(&row.seats).ok_or_else(|| corrupt("seats"))?;

    Ok(Cafe::new(
        id,
        NewCafe {
            name: row.name,
            map_url,
            img_url,
            location: row.location,
            has_sockets: row.has_sockets != 0,
            has_toilet: row.has_toilet != 0,
            has_wifi: row.has_wifi != 0,
            can_take_calls: row.can_take_calls != 0,
            seats,
            coffee_price: row.coffee_price,
        },
    ))
}

#[async_trait]
impl CafeRepository for DieselCafeRepository {
    async fn list_all(&self) -> Result<Vec<Cafe>, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CafeRow> = cafe::table
            .order(cafe::id.asc())
            .select(CafeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // One bad row must not hide the rest of the directory.
        Ok(rows
            .into_iter()
            .filter_map(|row| row_to_cafe(row).ok())
            .collect())
    }

    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CafeRow> = cafe::table
            .filter(cafe::id.eq(id.get()))
            .select(CafeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_cafe).transpose()
    }

    async fn insert(&self, new_cafe: &NewCafe) -> Result<CafeId, CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCafeRow {
            name: &new_cafe.name,
            map_url: new_cafe.map_url.as_str(),
            img_url: new_cafe.img_url.as_str(),
            location: &new_cafe.location,
            has_sockets: flag_to_db(new_cafe.has_sockets),
            has_toilet: flag_to_db(new_cafe.has_toilet),
            has_wifi: flag_to_db(new_cafe.has_wifi),
            can_take_calls: flag_to_db(new_cafe.can_take_calls),
            seats: new_cafe.seats.code(),
            coffee_price: &new_cafe.coffee_price,
        };

        let id: i32 = diesel::insert_into(cafe::table)
            .values(&row)
            .returning(cafe::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    CafeRepositoryError::duplicate_name(new_cafe.name.as_str())
                } else {
                    map_diesel_error(error)
                }
            })?;

        Ok(CafeId::new(id))
    }

    async fn delete_by_id(&self, id: CafeId) -> Result<(), CafeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(cafe::table.filter(cafe::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(CafeRepositoryError::not_found(id));
        }
        Ok(())
    }
}
