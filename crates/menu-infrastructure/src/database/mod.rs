//! Database module (SQLite adapters)

pub mod connection;
pub mod sqlite;

pub use connection::{create_pool, run_migrations};
pub use sqlite::{SqliteMenuRepository, SqlitePermissionRegistry};
