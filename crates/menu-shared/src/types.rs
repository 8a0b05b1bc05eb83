//! Common types

/// Surrogate key of menu groups and menu items.
pub type EntityId = i64;

/// Display ordering value; lower sorts first.
pub type SortOrder = i32;
