// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Navigable entry inside a menu group
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_shared::{EntityId, SortOrder};

/// Where a menu item navigates to. A route and a URL never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuTarget {
    Route(String),
    Url(String),
    #[default]
    None,
}

impl MenuTarget {
    pub fn from_columns(route: Option<String>, url: Option<String>) -> Self {
        match (route, url) {
            (Some(route), _) => MenuTarget::Route(route),
            (None, Some(url)) => MenuTarget::Url(url),
            (None, None) => MenuTarget::None,
        }
    }

    pub fn route(&self) -> Option<&str> {
        match self {
            MenuTarget::Route(route) => Some(route),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            MenuTarget::Url(url) => Some(url),
            _ => None,
        }
    }
}

/// Menu Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: EntityId,
    pub menu_group_id: EntityId,
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub url: Option<String>,
    pub permission_name: Option<String>,
    pub parent_id: Option<EntityId>,
    pub sort_order: SortOrder,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn target(&self) -> MenuTarget {
        MenuTarget::from_columns(self.route.clone(), self.url.clone())
    }

    /// Option text used when the item is offered as a parent.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label, self.key)
    }
}

/// Field set for inserting a menu item
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewMenuItem {
    pub menu_group_id: EntityId,

    #[validate(length(min = 1, max = 255, message = "Menu item key must be between 1 and 255 characters"))]
    pub key: String,

    #[validate(length(min = 1, max = 255, message = "Menu item label must be between 1 and 255 characters"))]
    pub label: String,

    #[validate(length(max = 100, message = "Menu item icon too long"))]
    pub icon: Option<String>,

    pub target: MenuTarget,
    pub permission_name: Option<String>,
    pub parent_id: Option<EntityId>,
    pub sort_order: SortOrder,
    pub is_active: bool,
}

impl NewMenuItem {
    /// A root, active item without icon, target or permission.
    pub fn new(menu_group_id: EntityId, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            menu_group_id,
            key: key.into().trim().to_string(),
            label: label.into().trim().to_string(),
            icon: None,
            target: MenuTarget::None,
            permission_name: None,
            parent_id: None,
            sort_order: 0,
            is_active: true,
        }
    }

    pub fn with_target(mut self, target: MenuTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_parent(mut self, parent_id: Option<EntityId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}
