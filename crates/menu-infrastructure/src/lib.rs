//! # Menu Infrastructure
//!
//! SQLite and file-backed implementations of the menu core ports (adapters).

pub mod database;
pub mod registry;

pub use database::{create_pool, run_migrations, SqliteMenuRepository, SqlitePermissionRegistry};
pub use registry::RouteFileRegistry;
