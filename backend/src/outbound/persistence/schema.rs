//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` against a migrated database after schema changes.

diesel::table! {
    /// One row per cafe.
    ///
    /// Amenity flags are stored as `0`/`1` integers and `seats` holds the
    /// seating bucket code (`0`..`5`).
    cafe (id) {
        /// Primary key assigned by SQLite.
        id -> Integer,
        /// Unique display name (max 250 characters).
        name -> Text,
        map_url -> Text,
        img_url -> Text,
        location -> Text,
        has_sockets -> Integer,
        has_toilet -> Integer,
        has_wifi -> Integer,
        can_take_calls -> Integer,
        seats -> Text,
        coffee_price -> Text,
    }
}
