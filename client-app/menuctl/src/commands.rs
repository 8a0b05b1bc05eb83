//! Subcommand handlers

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use menu_core::domain::{MenuGroup, MenuItem, MenuTree, ResourceRegistry};
use menu_core::repositories::MenuRepository;
use menu_core::services::{BuildOutcome, MenuItemBuilder, ResourceMenuSeeder};
use menu_infrastructure::{run_migrations, RouteFileRegistry, SqliteMenuRepository, SqlitePermissionRegistry};
use menu_shared::config::AppConfig;

use crate::terminal::TerminalPrompter;

pub async fn create_item(config: &AppConfig, pool: SqlitePool) -> anyhow::Result<()> {
    let routes = RouteFileRegistry::load(&config.registry.routes_file)?;
    let builder = MenuItemBuilder::new(
        Arc::new(SqliteMenuRepository::new(pool.clone())),
        Arc::new(routes),
        Arc::new(SqlitePermissionRegistry::new(pool)),
    );

    let mut prompter = TerminalPrompter::new();
    match builder.run(&mut prompter).await? {
        BuildOutcome::Created(item) => info!("Builder created menu item {}", item.id),
        BuildOutcome::Cancelled => info!("Builder cancelled"),
    }
    Ok(())
}

pub async fn seed_resources(config: &AppConfig, pool: SqlitePool) -> anyhow::Result<()> {
    let registry = ResourceRegistry::from_settings(&config.resources)?;
    if registry.is_empty() {
        println!("No resources registered. Add [[resources]] entries to the configuration.");
        return Ok(());
    }

    let seeder = ResourceMenuSeeder::new(Arc::new(SqliteMenuRepository::new(pool)));
    let report = seeder.seed(&registry).await?;

    println!(
        "Menu groups: {} created, {} existing, {} failed",
        report.groups_created, report.groups_existing, report.groups_failed
    );
    println!(
        "Menu items:  {} created, {} existing, {} skipped, {} failed",
        report.items_created, report.items_existing, report.items_skipped, report.items_failed
    );
    if report.has_failures() {
        println!("Some resources were not seeded; see the log for details.");
    }
    Ok(())
}

#[derive(Serialize)]
struct GroupListing<'a> {
    group: &'a MenuGroup,
    items: Vec<TreeEntry<'a>>,
}

#[derive(Serialize)]
struct TreeEntry<'a> {
    depth: usize,
    item: &'a MenuItem,
}

pub async fn list(pool: SqlitePool, group_key: Option<String>, json: bool) -> anyhow::Result<()> {
    let repo = SqliteMenuRepository::new(pool);

    let groups = match group_key {
        Some(key) => {
            let group = repo
                .find_group_by_key(&key)
                .await?
                .with_context(|| format!("Menu group not found: {}", key))?;
            vec![group]
        }
        None => repo.list_groups().await?,
    };

    let mut trees = Vec::with_capacity(groups.len());
    for group in &groups {
        let items = repo.list_items(group.id).await?;
        let tree = MenuTree::build(items)
            .with_context(|| format!("Menu group '{}' has an inconsistent item tree", group.key))?;
        trees.push(tree);
    }

    if json {
        let listings: Vec<GroupListing> = groups
            .iter()
            .zip(&trees)
            .map(|(group, tree)| GroupListing {
                group,
                items: tree
                    .walk()
                    .into_iter()
                    .map(|(depth, item)| TreeEntry { depth, item })
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No menu groups found.");
    }
    for (group, tree) in groups.iter().zip(&trees) {
        println!("{}", group.display_name());
        for (depth, item) in tree.walk() {
            println!("{}{}", "  ".repeat(depth), describe(item));
        }
    }
    Ok(())
}

fn describe(item: &MenuItem) -> String {
    let mut line = item.display_name();
    if let Some(route) = &item.route {
        line.push_str(&format!(" -> route {}", route));
    }
    if let Some(url) = &item.url {
        line.push_str(&format!(" -> {}", url));
    }
    if let Some(permission) = &item.permission_name {
        line.push_str(&format!(" [{}]", permission));
    }
    if !item.is_active {
        line.push_str(" (inactive)");
    }
    line
}

pub async fn migrate(pool: SqlitePool) -> anyhow::Result<()> {
    run_migrations(&pool).await?;
    println!("Migrations applied.");
    Ok(())
}
