//! Menu store trait (port)

use async_trait::async_trait;

use menu_shared::EntityId;

use crate::domain::{MenuGroup, MenuItem, NewMenuGroup, NewMenuItem};
use crate::error::DomainError;

/// Persistence of menu groups and items.
///
/// Implementations enforce key uniqueness at write time and report it as
/// `DuplicateGroupKey` / `DuplicateItemKey`, distinct from other failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All groups ordered by sort order.
    async fn list_groups(&self) -> Result<Vec<MenuGroup>, DomainError>;
    async fn find_group_by_key(&self, key: &str) -> Result<Option<MenuGroup>, DomainError>;
    async fn create_group(&self, group: &NewMenuGroup) -> Result<MenuGroup, DomainError>;

    async fn key_exists_in_group(&self, group_id: EntityId, key: &str) -> Result<bool, DomainError>;
    async fn find_item_by_key(&self, group_id: EntityId, key: &str) -> Result<Option<MenuItem>, DomainError>;
    /// Items of the group without a parent, ordered by sort order.
    async fn list_root_items(&self, group_id: EntityId) -> Result<Vec<MenuItem>, DomainError>;
    async fn list_items(&self, group_id: EntityId) -> Result<Vec<MenuItem>, DomainError>;
    async fn create_item(&self, item: &NewMenuItem) -> Result<MenuItem, DomainError>;
    async fn find_item(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError>;
}
