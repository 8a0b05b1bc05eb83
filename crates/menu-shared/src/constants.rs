//! Application-wide constants

/// Options visible at once in a searchable list.
pub const SEARCH_SCROLL_WINDOW: usize = 15;
pub const DEFAULT_SORT_ORDER: i32 = 0;
/// Deepest allowed menu level; a root item is level 1.
pub const MAX_MENU_DEPTH: usize = 5;
/// Sort order increment used when seeding groups and items.
pub const SEED_SORT_STEP: i32 = 10;

/// Longest key or label accepted for groups and items, in characters.
pub const MAX_KEY_LENGTH: usize = 255;
pub const MAX_LABEL_LENGTH: usize = 255;
/// Longest icon name accepted, in characters.
pub const MAX_ICON_LENGTH: usize = 100;
