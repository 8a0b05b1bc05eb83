//! SQLite repository implementations

pub mod menu_repo_impl;
pub mod permission_registry_impl;

pub use menu_repo_impl::SqliteMenuRepository;
pub use permission_registry_impl::SqlitePermissionRegistry;
