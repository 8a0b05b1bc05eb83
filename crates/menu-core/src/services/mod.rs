//! Domain services (business logic)

pub mod menu_item_builder;
pub mod resource_seeder;

pub use menu_item_builder::{summary_lines, BuildOutcome, MenuItemBuilder};
pub use resource_seeder::{ResourceMenuSeeder, SeedReport};
