// ============================================================================
// Menu Infrastructure - SQLite Permission Registry
// File: crates/menu-infrastructure/src/database/sqlite/permission_registry_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

use menu_core::error::DomainError;
use menu_core::repositories::PermissionRegistry;

/// Reads permission names from the `permissions` table.
pub struct SqlitePermissionRegistry {
    pool: SqlitePool,
}

impl SqlitePermissionRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRegistry for SqlitePermissionRegistry {
    async fn permission_names(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT name FROM permissions ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing permissions: {}", e);
                DomainError::DatabaseError(e.to_string())
            })
    }
}
