//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::cafe;

/// Row struct for reading from the cafe table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cafe)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CafeRow {
    pub id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub has_sockets: i32,
    pub has_toilet: i32,
    pub has_wifi: i32,
    pub can_take_calls: i32,
    pub seats: String,
    pub coffee_price: String,
}

/// Insertable struct for creating new cafe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cafe)]
pub(crate) struct NewCafeRow<'a> {
    pub name: &'a str,
    pub map_url: &'a str,
    pub img_url: &'a str,
    pub location: &'a str,
    pub has_sockets: i32,
    pub has_toilet: i32,
    pub has_wifi: i32,
    pub can_take_calls: i32,
    pub seats: &'a str,
    pub coffee_price: &'a str,
}
