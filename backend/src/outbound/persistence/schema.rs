//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/sql/users.sql`. The service does
//! not create or migrate tables; operators provision them.

diesel::table! {
    /// User records.
    ///
    /// `id` is a `SERIAL` primary key assigned on insert.
    users (id) {
        id -> Int4,
        name -> Text,
        email -> Text,
    }
}
