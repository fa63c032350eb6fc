//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking,
//! running against SQLite through diesel-async's sync connection wrapper.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod urls;

pub use pool::{DbError, SqlitePool};
pub use urls::UrlRepository;
