// ============================================================================
// Menu Core - Resource Menu Seeder
// File: crates/menu-core/src/services/resource_seeder.rs
// ============================================================================
//! Seeds menu groups and items from the registered admin resources.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use menu_shared::constants::SEED_SORT_STEP;
use menu_shared::utils::format_label;

use crate::domain::{
    MenuGroup, MenuItem, MenuTarget, NewMenuGroup, NewMenuItem, ResourceDescriptor, ResourceRegistry,
};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

/// Counts of one seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub groups_created: usize,
    pub groups_existing: usize,
    pub groups_failed: usize,
    pub items_created: usize,
    pub items_existing: usize,
    pub items_skipped: usize,
    pub items_failed: usize,
}

impl SeedReport {
    pub fn created_anything(&self) -> bool {
        self.groups_created + self.items_created > 0
    }

    pub fn has_failures(&self) -> bool {
        self.groups_failed + self.items_failed > 0
    }
}

pub struct ResourceMenuSeeder<R: MenuRepository> {
    menu_repo: Arc<R>,
}

impl<R: MenuRepository> ResourceMenuSeeder<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// First-or-create one group per resource group and one item per resource.
    /// Existing rows are left untouched, so repeated runs create nothing.
    ///
    /// A resource the store rejects (invalid field, taken key) is logged and
    /// counted as failed; the run goes on with the next one. Database failures
    /// end the run.
    pub async fn seed(&self, registry: &ResourceRegistry) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();
        let mut group_order = 0;
        let mut item_order = 0;

        for (group_name, resources) in registry.grouped() {
            group_order += SEED_SORT_STEP;
            let group = match self.first_or_create_group(&group_name, group_order, &mut report).await {
                Ok(group) => group,
                Err(e) if e.is_rejected_record() => {
                    warn!("Skipping menu group '{}' and its {} resources: {}", group_name, resources.len(), e);
                    report.groups_failed += 1;
                    report.items_failed += resources.len();
                    item_order += SEED_SORT_STEP * resources.len() as i32;
                    continue;
                }
                Err(e) => return Err(e),
            };

            for resource in resources {
                // Every resource owns a sort slot, seeded or not.
                item_order += SEED_SORT_STEP;

                if !resource.is_complete() {
                    warn!("Skipping resource {}: title or slug is blank", resource.name);
                    report.items_skipped += 1;
                    continue;
                }

                match self.first_or_create_item(&group, resource, item_order).await {
                    Ok(Some(created)) => {
                        info!("Seeded menu item {} in group {}", created.key, group.key);
                        report.items_created += 1;
                    }
                    Ok(None) => report.items_existing += 1,
                    Err(e) if e.is_rejected_record() => {
                        warn!("Skipping resource {}: {}", resource.name, e);
                        report.items_failed += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(report)
    }

    async fn first_or_create_group(
        &self,
        name: &str,
        sort_order: i32,
        report: &mut SeedReport,
    ) -> Result<MenuGroup, DomainError> {
        let key = name.trim().to_lowercase();

        if let Some(existing) = self.menu_repo.find_group_by_key(&key).await? {
            report.groups_existing += 1;
            return Ok(existing);
        }

        let group = NewMenuGroup::new(key, format_label(name), None, sort_order)?;
        let created = self.menu_repo.create_group(&group).await?;

        info!("Seeded menu group {}", created.key);
        report.groups_created += 1;
        Ok(created)
    }

    /// `None` when the group already holds an item with the resource's slug.
    async fn first_or_create_item(
        &self,
        group: &MenuGroup,
        resource: &ResourceDescriptor,
        sort_order: i32,
    ) -> Result<Option<MenuItem>, DomainError> {
        let slug = resource.slug.trim();

        if self.menu_repo.find_item_by_key(group.id, slug).await?.is_some() {
            return Ok(None);
        }

        let item = NewMenuItem::new(group.id, slug, resource.title.as_str())
            .with_target(MenuTarget::Route(resource.route_name()))
            .with_sort_order(sort_order);
        item.validate()?;

        self.menu_repo.create_item(&item).await.map(Some)
    }
}
