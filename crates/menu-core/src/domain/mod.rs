//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu console.

pub mod menu_group;
pub mod menu_item;
pub mod resource;
pub mod route;
pub mod tree;

// Re-export all entities and enums
pub use menu_group::{MenuGroup, NewMenuGroup};
pub use menu_item::{MenuItem, MenuTarget, NewMenuItem};
pub use resource::{ResourceDescriptor, ResourceRegistry};
pub use route::RouteDescriptor;
pub use tree::MenuTree;
