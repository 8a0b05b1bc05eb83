//! Shared fixtures for the SQLite integration tests.
#![allow(dead_code)]

use menu_core::domain::{MenuGroup, MenuItem, NewMenuGroup, NewMenuItem};
use menu_core::repositories::MenuRepository;
use menu_infrastructure::{create_pool, run_migrations, SqliteMenuRepository};
use sqlx::SqlitePool;

pub async fn memory_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn group(repo: &SqliteMenuRepository, key: &str, label: &str) -> MenuGroup {
    let group = NewMenuGroup::new(key.to_string(), label.to_string(), None, 0).unwrap();
    repo.create_group(&group).await.unwrap()
}

pub async fn item(
    repo: &SqliteMenuRepository,
    group_id: i64,
    key: &str,
    parent_id: Option<i64>,
) -> MenuItem {
    let item = NewMenuItem::new(group_id, key, key.to_uppercase()).with_parent(parent_id);
    repo.create_item(&item).await.unwrap()
}

pub async fn add_permissions(pool: &SqlitePool, names: &[&str]) {
    for name in names {
        sqlx::query("INSERT INTO permissions (name) VALUES (?)")
            .bind(*name)
            .execute(pool)
            .await
            .unwrap();
    }
}
