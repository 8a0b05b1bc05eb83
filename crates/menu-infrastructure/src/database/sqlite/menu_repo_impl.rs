// ============================================================================
// Menu Infrastructure - SQLite Menu Repository
// File: crates/menu-infrastructure/src/database/sqlite/menu_repo_impl.rs
// ============================================================================

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{error, info};
use validator::Validate;

use menu_core::domain::{MenuGroup, MenuItem, NewMenuGroup, NewMenuItem};
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;
use menu_shared::constants::MAX_MENU_DEPTH;
use menu_shared::EntityId;

const GROUP_COLUMNS: &str =
    r#"id, "key", label, icon, sort_order, is_active, created_at, updated_at"#;

const ITEM_COLUMNS: &str = r#"id, menu_group_id, "key", label, icon, route, url, permission_name,
    parent_id, sort_order, is_active, created_at, updated_at"#;

pub struct SqliteMenuRepository {
    pool: SqlitePool,
}

impl SqliteMenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuGroupRow {
    pub id: i64,
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuGroupRow> for MenuGroup {
    fn from(row: MenuGroupRow) -> Self {
        MenuGroup {
            id: row.id,
            key: row.key,
            label: row.label,
            icon: row.icon,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i64,
    pub menu_group_id: i64,
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub url: Option<String>,
    pub permission_name: Option<String>,
    pub parent_id: Option<i64>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            menu_group_id: row.menu_group_id,
            key: row.key,
            label: row.label,
            icon: row.icon,
            route: row.route,
            url: row.url,
            permission_name: row.permission_name,
            parent_id: row.parent_id,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

fn database_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn list_groups(&self) -> Result<Vec<MenuGroup>, DomainError> {
        let rows: Vec<MenuGroupRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menu_groups ORDER BY sort_order, id",
            GROUP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing menu groups"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_group_by_key(&self, key: &str) -> Result<Option<MenuGroup>, DomainError> {
        let row: Option<MenuGroupRow> = sqlx::query_as(&format!(
            r#"SELECT {} FROM menu_groups WHERE "key" = ?"#,
            GROUP_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding menu group by key"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_group(&self, group: &NewMenuGroup) -> Result<MenuGroup, DomainError> {
        group.validate()?;
        info!("Creating menu group: {}", group.key);

        let now = Utc::now();
        let row: MenuGroupRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO menu_groups ("key", label, icon, sort_order, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            GROUP_COLUMNS
        ))
        .bind(&group.key)
        .bind(&group.label)
        .bind(&group.icon)
        .bind(group.sort_order)
        .bind(group.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::DuplicateGroupKey(group.key.clone())
            } else {
                error!("Database error creating menu group: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        info!("Menu group created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn key_exists_in_group(&self, group_id: EntityId, key: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM menu_items WHERE menu_group_id = ? AND "key" = ?)"#,
        )
        .bind(group_id)
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("checking menu item key"))?;

        Ok(exists)
    }

    async fn find_item_by_key(&self, group_id: EntityId, key: &str) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            r#"SELECT {} FROM menu_items WHERE menu_group_id = ? AND "key" = ?"#,
            ITEM_COLUMNS
        ))
        .bind(group_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding menu item by key"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_root_items(&self, group_id: EntityId) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menu_items WHERE menu_group_id = ? AND parent_id IS NULL ORDER BY sort_order, id",
            ITEM_COLUMNS
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing root menu items"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_items(&self, group_id: EntityId) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menu_items WHERE menu_group_id = ? ORDER BY sort_order, id",
            ITEM_COLUMNS
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing menu items"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_item(&self, item: &NewMenuItem) -> Result<MenuItem, DomainError> {
        item.validate()?;
        info!("Creating menu item: {} in group {}", item.key, item.menu_group_id);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("starting menu item transaction"))?;

        let group: Option<i64> = sqlx::query_scalar("SELECT id FROM menu_groups WHERE id = ?")
            .bind(item.menu_group_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error("checking menu group"))?;
        if group.is_none() {
            return Err(DomainError::GroupNotFound(item.menu_group_id));
        }

        // Walk the ancestor chain: the parent must share the group and the new
        // item must not land deeper than the maximum nesting level.
        if let Some(parent_id) = item.parent_id {
            let mut depth = 1;
            let mut seen = HashSet::new();
            let mut current = Some(parent_id);

            while let Some(id) = current {
                let row: Option<(i64, Option<i64>)> =
                    sqlx::query_as("SELECT menu_group_id, parent_id FROM menu_items WHERE id = ?")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(database_error("reading parent menu item"))?;
                let (group_id, next) = row.ok_or(DomainError::ParentNotFound(id))?;

                if group_id != item.menu_group_id {
                    return Err(DomainError::ParentNotInGroup {
                        parent_id,
                        group_id: item.menu_group_id,
                    });
                }
                if !seen.insert(id) {
                    return Err(DomainError::CycleDetected(id));
                }

                depth += 1;
                if depth > MAX_MENU_DEPTH {
                    return Err(DomainError::MaxDepthExceeded(MAX_MENU_DEPTH));
                }
                current = next;
            }
        }

        let now = Utc::now();
        let row: MenuItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO menu_items (
                menu_group_id, "key", label, icon, route, url, permission_name,
                parent_id, sort_order, is_active, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(item.menu_group_id)
        .bind(&item.key)
        .bind(&item.label)
        .bind(&item.icon)
        .bind(item.target.route())
        .bind(item.target.url())
        .bind(&item.permission_name)
        .bind(item.parent_id)
        .bind(item.sort_order)
        .bind(item.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::DuplicateItemKey {
                    group_id: item.menu_group_id,
                    key: item.key.clone(),
                }
            } else {
                error!("Database error creating menu item: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        tx.commit()
            .await
            .map_err(database_error("committing menu item"))?;

        info!("Menu item created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn find_item(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menu_items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding menu item"))?;

        Ok(row.map(|r| r.into()))
    }
}
