// ============================================================================
// Menu Core - Menu Group Entity
// File: crates/menu-core/src/domain/menu_group.rs
// Description: Top-level navigation category
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_shared::{EntityId, SortOrder};

/// Menu Group entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub id: EntityId,
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub sort_order: SortOrder,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuGroup {
    /// Option text used when the group is offered for selection.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label, self.key)
    }
}

/// Field set for inserting a menu group
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewMenuGroup {
    #[validate(length(min = 1, max = 255, message = "Menu group key must be between 1 and 255 characters"))]
    pub key: String,

    #[validate(length(min = 1, max = 255, message = "Menu group label must be between 1 and 255 characters"))]
    pub label: String,

    #[validate(length(max = 100, message = "Menu group icon too long"))]
    pub icon: Option<String>,

    pub sort_order: SortOrder,
    pub is_active: bool,
}

impl NewMenuGroup {
    pub fn new(
        key: String,
        label: String,
        icon: Option<String>,
        sort_order: SortOrder,
    ) -> Result<Self, validator::ValidationErrors> {
        let group = Self {
            key: key.trim().to_string(),
            label: label.trim().to_string(),
            icon: icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty()),
            sort_order,
            is_active: true,
        };

        group.validate()?;
        Ok(group)
    }
}
