//! Repository and registry traits (ports)

pub mod menu_repository;
pub mod registry;

pub use menu_repository::MenuRepository;
pub use registry::{PermissionRegistry, RouteRegistry};

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use registry::{MockPermissionRegistry, MockRouteRegistry};
