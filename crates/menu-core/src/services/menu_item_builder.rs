// ============================================================================
// Menu Core - Menu Item Builder
// File: crates/menu-core/src/services/menu_item_builder.rs
// ============================================================================
//! Interactive construction of one menu item.
//!
//! The operator picks (or creates) a group, a key that is free in that group,
//! label, icon, target, permission, parent, sort order and active flag, then
//! reviews everything before a single `create_item` call.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use menu_shared::constants::{MAX_ICON_LENGTH, MAX_KEY_LENGTH, MAX_LABEL_LENGTH, SEARCH_SCROLL_WINDOW};
use menu_shared::EntityId;

use crate::domain::{MenuGroup, MenuItem, MenuTarget, NewMenuGroup, NewMenuItem};
use crate::error::DomainError;
use crate::prompt::{
    optional_text, optional_text_max, required_text, required_text_max, sort_order, PromptError, Prompter,
    SelectOption,
};
use crate::repositories::{MenuRepository, PermissionRegistry, RouteRegistry};

/// How a builder run ended. Both variants are a successful run.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Created(MenuItem),
    Cancelled,
}

enum PermissionChoice {
    Name(String),
    NoPermission,
    Custom,
}

impl PermissionChoice {
    fn option(&self) -> SelectOption {
        match self {
            PermissionChoice::Name(name) => SelectOption::new(name.clone(), name.clone()),
            PermissionChoice::NoPermission => SelectOption::new("", "None"),
            PermissionChoice::Custom => SelectOption::new("", "Enter custom permission name"),
        }
    }
}

pub struct MenuItemBuilder<R: MenuRepository> {
    menu_repo: Arc<R>,
    routes: Arc<dyn RouteRegistry>,
    permissions: Arc<dyn PermissionRegistry>,
}

impl<R: MenuRepository> MenuItemBuilder<R> {
    pub fn new(
        menu_repo: Arc<R>,
        routes: Arc<dyn RouteRegistry>,
        permissions: Arc<dyn PermissionRegistry>,
    ) -> Self {
        Self {
            menu_repo,
            routes,
            permissions,
        }
    }

    /// Runs the whole protocol. An operator interrupt counts as a cancellation.
    pub async fn run(&self, prompter: &mut dyn Prompter) -> Result<BuildOutcome, DomainError> {
        prompter.info("Creating a new menu item...");
        prompter.line("");

        match self.build(prompter).await {
            Err(DomainError::Prompt(PromptError::Interrupted)) => {
                info!("Menu item builder interrupted by operator");
                prompter.info("Cancelled.");
                Ok(BuildOutcome::Cancelled)
            }
            outcome => outcome,
        }
    }

    async fn build(&self, prompter: &mut dyn Prompter) -> Result<BuildOutcome, DomainError> {
        let group = self.select_group(prompter).await?;
        let mut key = self.acquire_key(prompter, &group).await?;
        let label = required_text_max(prompter, "Menu item label", MAX_LABEL_LENGTH)?;
        let icon = optional_text_max(prompter, "Icon (optional, e.g., \"heroicon-o-home\")", MAX_ICON_LENGTH)?;
        let target = self.choose_target(prompter)?;
        let permission_name = self.select_permission(prompter).await?;
        let parent_id = self.select_parent(prompter, &group).await?;
        let sort_order = sort_order(prompter, "Sort order")?;
        let is_active = prompter.confirm("Is active?", true)?;

        let parent_label = match parent_id {
            Some(id) => self.menu_repo.find_item(id).await?.map(|parent| parent.label),
            None => None,
        };

        loop {
            let draft = NewMenuItem {
                menu_group_id: group.id,
                key: key.clone(),
                label: label.clone(),
                icon: icon.clone(),
                target: target.clone(),
                permission_name: permission_name.clone(),
                parent_id,
                sort_order,
                is_active,
            };
            // Field limits are enforced at the prompts; this only trips if they drift.
            if let Err(errors) = draft.validate() {
                prompter.error(&format!("Menu item is invalid: {}", errors));
                return Err(errors.into());
            }

            prompter.line("");
            prompter.info("Menu item details:");
            for line in summary_lines(&group, &draft, parent_label.as_deref()) {
                prompter.line(&line);
            }
            prompter.line("");

            if !prompter.confirm("Create this menu item?", true)? {
                prompter.info("Cancelled.");
                return Ok(BuildOutcome::Cancelled);
            }

            match self.menu_repo.create_item(&draft).await {
                Ok(item) => {
                    info!("Menu item created: {} in group {}", item.key, group.key);
                    prompter.line("");
                    prompter.info("Menu item created successfully!");
                    return Ok(BuildOutcome::Created(item));
                }
                Err(DomainError::DuplicateItemKey { key: taken, .. }) => {
                    warn!("Menu item key taken at commit: {} in group {}", taken, group.key);
                    prompter.error(&format!(
                        "Key '{}' was taken in this menu group before it could be saved. Please choose another.",
                        taken
                    ));
                    key = self.acquire_key(prompter, &group).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn select_group(&self, prompter: &mut dyn Prompter) -> Result<MenuGroup, DomainError> {
        let groups = self.menu_repo.list_groups().await?;

        if groups.is_empty() {
            prompter.warn("No menu groups found. Creating a new one...");
            return self.create_group(prompter).await;
        }

        let mut options: Vec<SelectOption> = groups
            .iter()
            .map(|group| SelectOption::new(group.key.clone(), group.display_name()))
            .collect();
        options.push(SelectOption::new("", "Create new menu group"));

        let choice = prompter.select("Select menu group", &options)?;
        match groups.into_iter().nth(choice) {
            Some(group) => Ok(group),
            None => self.create_group(prompter).await,
        }
    }

    async fn create_group(&self, prompter: &mut dyn Prompter) -> Result<MenuGroup, DomainError> {
        let mut key = required_text_max(prompter, "Menu group key", MAX_KEY_LENGTH)?;
        let label = required_text_max(prompter, "Menu group label", MAX_LABEL_LENGTH)?;
        let icon = optional_text_max(prompter, "Icon (optional)", MAX_ICON_LENGTH)?;
        let sort_order = sort_order(prompter, "Sort order")?;

        loop {
            let group = match NewMenuGroup::new(key.clone(), label.clone(), icon.clone(), sort_order) {
                Ok(group) => group,
                Err(errors) => {
                    prompter.error(&format!("Menu group is invalid: {}", errors));
                    return Err(errors.into());
                }
            };

            match self.menu_repo.create_group(&group).await {
                Ok(created) => {
                    info!("Menu group created: {}", created.key);
                    prompter.info(&format!("Menu group '{}' created.", created.label));
                    return Ok(created);
                }
                Err(DomainError::DuplicateGroupKey(taken)) => {
                    prompter.error(&format!(
                        "Menu group key '{}' already exists. Please choose another.",
                        taken
                    ));
                    key = required_text_max(prompter, "Menu group key", MAX_KEY_LENGTH)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn acquire_key(
        &self,
        prompter: &mut dyn Prompter,
        group: &MenuGroup,
    ) -> Result<String, DomainError> {
        loop {
            let key = required_text_max(prompter, "Menu item key (unique within group)", MAX_KEY_LENGTH)?;

            if !self.menu_repo.key_exists_in_group(group.id, &key).await? {
                return Ok(key);
            }

            prompter.error(&format!(
                "Key '{}' already exists in this menu group. Please choose another.",
                key
            ));
        }
    }

    fn choose_target(&self, prompter: &mut dyn Prompter) -> Result<MenuTarget, DomainError> {
        if prompter.confirm("Use a route? (No = use URL instead)", true)? {
            Ok(self
                .select_route(prompter)?
                .map(MenuTarget::Route)
                .unwrap_or_default())
        } else {
            Ok(MenuTarget::Url(required_text(prompter, "URL")?))
        }
    }

    fn select_route(&self, prompter: &mut dyn Prompter) -> Result<Option<String>, DomainError> {
        let mut routes = self.routes.routes();
        routes.retain(|route| !route.name.trim().is_empty());
        routes.sort_by(|a, b| a.name.cmp(&b.name));
        routes.dedup_by(|a, b| a.name == b.name);

        if routes.is_empty() {
            warn!("Route registry is empty, menu item will have no route");
            prompter.warn("No named routes found.");
            return Ok(None);
        }

        let options: Vec<SelectOption> = routes
            .iter()
            .map(|route| SelectOption::new(route.name.clone(), route.label()))
            .collect();

        let choice = prompter.search("Search and select a route", &options, SEARCH_SCROLL_WINDOW)?;
        Ok(routes.into_iter().nth(choice).map(|route| route.name))
    }

    async fn select_permission(&self, prompter: &mut dyn Prompter) -> Result<Option<String>, DomainError> {
        if !prompter.confirm("Add a permission requirement?", false)? {
            return Ok(None);
        }

        let mut names = self.permissions.permission_names().await?;
        names.sort();
        names.dedup();

        if names.is_empty() {
            warn!("Permission registry is empty, falling back to manual entry");
            prompter.warn("No permissions found. The permission name will be stored as typed.");
            return Ok(optional_text(prompter, "Enter permission name manually (optional)")?);
        }

        let mut choices: Vec<PermissionChoice> = names.into_iter().map(PermissionChoice::Name).collect();
        choices.push(PermissionChoice::NoPermission);
        choices.push(PermissionChoice::Custom);
        let options: Vec<SelectOption> = choices.iter().map(PermissionChoice::option).collect();

        let choice = prompter.search("Search and select a permission", &options, SEARCH_SCROLL_WINDOW)?;
        match choices.into_iter().nth(choice) {
            Some(PermissionChoice::Name(name)) => Ok(Some(name)),
            Some(PermissionChoice::Custom) => Ok(Some(required_text(prompter, "Enter permission name")?)),
            Some(PermissionChoice::NoPermission) | None => Ok(None),
        }
    }

    async fn select_parent(
        &self,
        prompter: &mut dyn Prompter,
        group: &MenuGroup,
    ) -> Result<Option<EntityId>, DomainError> {
        if !prompter.confirm("Set a parent menu item?", false)? {
            return Ok(None);
        }

        let items = self.menu_repo.list_root_items(group.id).await?;
        if items.is_empty() {
            prompter.warn("No parent menu items available in this group.");
            return Ok(None);
        }

        let options: Vec<SelectOption> = items
            .iter()
            .map(|item| SelectOption::new(item.key.clone(), item.display_name()))
            .collect();

        let choice = prompter.select("Select parent menu item", &options)?;
        Ok(items.get(choice).map(|item| item.id))
    }
}

/// Review lines for a draft; absent optional fields are left out.
pub fn summary_lines(group: &MenuGroup, draft: &NewMenuItem, parent_label: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        format!("  Group: {}", group.label),
        format!("  Key: {}", draft.key),
        format!("  Label: {}", draft.label),
    ];
    if let Some(icon) = &draft.icon {
        lines.push(format!("  Icon: {}", icon));
    }
    if let Some(route) = draft.target.route() {
        lines.push(format!("  Route: {}", route));
    }
    if let Some(url) = draft.target.url() {
        lines.push(format!("  URL: {}", url));
    }
    if let Some(permission) = &draft.permission_name {
        lines.push(format!("  Permission: {}", permission));
    }
    if let Some(parent) = parent_label {
        lines.push(format!("  Parent: {}", parent));
    }
    lines.push(format!("  Sort Order: {}", draft.sort_order));
    lines.push(format!("  Active: {}", if draft.is_active { "Yes" } else { "No" }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::Sequence;

    use crate::domain::RouteDescriptor;
    use crate::prompt::scripted::{Answer, ScriptedPrompter};
    use crate::repositories::{MockMenuRepository, MockPermissionRegistry, MockRouteRegistry};

    fn group(id: EntityId, key: &str, label: &str) -> MenuGroup {
        MenuGroup {
            id,
            key: key.to_string(),
            label: label.to_string(),
            icon: None,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn persisted(item: &NewMenuItem, id: EntityId) -> MenuItem {
        MenuItem {
            id,
            menu_group_id: item.menu_group_id,
            key: item.key.clone(),
            label: item.label.clone(),
            icon: item.icon.clone(),
            route: item.target.route().map(str::to_string),
            url: item.target.url().map(str::to_string),
            permission_name: item.permission_name.clone(),
            parent_id: item.parent_id,
            sort_order: item.sort_order,
            is_active: item.is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn routes(list: Vec<RouteDescriptor>) -> MockRouteRegistry {
        let mut routes = MockRouteRegistry::new();
        routes.expect_routes().returning(move || list.clone());
        routes
    }

    fn permissions(names: &[&str]) -> MockPermissionRegistry {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let mut permissions = MockPermissionRegistry::new();
        permissions
            .expect_permission_names()
            .returning(move || Ok(names.clone()));
        permissions
    }

    fn repo_with_group() -> MockMenuRepository {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups()
            .returning(|| Ok(vec![group(1, "main", "Main")]));
        repo.expect_key_exists_in_group().returning(|_, _| Ok(false));
        repo
    }

    fn builder(
        repo: MockMenuRepository,
        routes: MockRouteRegistry,
        permissions: MockPermissionRegistry,
    ) -> MenuItemBuilder<MockMenuRepository> {
        MenuItemBuilder::new(Arc::new(repo), Arc::new(routes), Arc::new(permissions))
    }

    /// Answers after the key prompt for a route-backed item without extras.
    fn plain_route_answers(confirm_create: bool) -> Vec<Answer> {
        vec![
            Answer::text("Home"),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::search("", 0),
            Answer::Confirm(false),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(confirm_create),
        ]
    }

    #[tokio::test]
    async fn test_declined_review_never_writes() {
        let mut repo = repo_with_group();
        repo.expect_create_item().never();
        repo.expect_create_group().never();

        let mut answers = vec![Answer::Select(0), Answer::text("home")];
        answers.extend(plain_route_answers(false));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET", "HEAD"], "/")]),
            permissions(&[]),
        );
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert_eq!(outcome, BuildOutcome::Cancelled);
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_reprompted_before_commit() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups()
            .returning(|| Ok(vec![group(1, "main", "Main")]));
        repo.expect_key_exists_in_group()
            .returning(|_, key| Ok(key == "dashboard"));
        repo.expect_create_item()
            .withf(|item| item.key == "home")
            .times(1)
            .returning(|item| Ok(persisted(item, 7)));

        let mut answers = vec![Answer::Select(0), Answer::text("dashboard"), Answer::text("home")];
        answers.extend(plain_route_answers(true));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET", "HEAD"], "/")]),
            permissions(&[]),
        );
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert!(matches!(outcome, BuildOutcome::Created(ref item) if item.key == "home"));
        assert_eq!(
            prompter.errors(),
            vec!["Key 'dashboard' already exists in this menu group. Please choose another."]
        );
    }

    #[tokio::test]
    async fn test_empty_route_registry_degrades_to_no_route() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.target == MenuTarget::None)
            .times(1)
            .returning(|item| Ok(persisted(item, 3)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("home"),
            Answer::text("Home"),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(false),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        let outcome = builder.run(&mut prompter).await.unwrap();

        match outcome {
            BuildOutcome::Created(item) => {
                assert_eq!(item.route, None);
                assert_eq!(item.url, None);
            }
            other => panic!("expected created item, got {:?}", other),
        }
        assert_eq!(prompter.warnings(), vec!["No named routes found."]);
    }

    #[tokio::test]
    async fn test_route_search_and_url_target() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.target == MenuTarget::Route("users.index".into()))
            .times(1)
            .returning(|item| Ok(persisted(item, 4)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("users"),
            Answer::text("Users"),
            Answer::text("heroicon-o-users"),
            Answer::Confirm(true),
            Answer::search("USERS", 0),
            Answer::Confirm(false),
            Answer::Confirm(false),
            Answer::text("10"),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(
            repo,
            routes(vec![
                RouteDescriptor::new("users.index", &["GET", "HEAD"], "users"),
                RouteDescriptor::new("dashboard", &["GET", "HEAD"], "/"),
            ]),
            permissions(&[]),
        );
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.searches, vec![vec!["users.index (GET|HEAD users)".to_string()]]);
    }

    #[tokio::test]
    async fn test_url_target_is_free_text() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.target == MenuTarget::Url("not a url".into()))
            .times(1)
            .returning(|item| Ok(persisted(item, 5)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("docs"),
            Answer::text("Docs"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::text("not a url"),
            Answer::Confirm(false),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.errors(), vec!["URL is required."]);
    }

    #[tokio::test]
    async fn test_permission_search_picks_matching_name() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.permission_name.as_deref() == Some("edit-users"))
            .times(1)
            .returning(|item| Ok(persisted(item, 6)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("users"),
            Answer::text("Users"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text("/users"),
            Answer::Confirm(true),
            Answer::search("edit", 0),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&["view-users", "edit-users"]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.searches, vec![vec!["edit-users".to_string()]]);
    }

    #[tokio::test]
    async fn test_custom_permission_sentinel_does_not_collide() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.permission_name.as_deref() == Some("reports.export"))
            .times(1)
            .returning(|item| Ok(persisted(item, 8)));

        // Options: custom, view-users, None, Enter custom permission name
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("export"),
            Answer::text("Export"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text("/export"),
            Answer::Confirm(true),
            Answer::search("custom", 1),
            Answer::text("reports.export"),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&["view-users", "custom"]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(
            prompter.searches,
            vec![vec!["custom".to_string(), "Enter custom permission name".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_empty_permission_registry_falls_back_to_free_text() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.permission_name.is_none())
            .times(1)
            .returning(|item| Ok(persisted(item, 9)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("home"),
            Answer::text("Home"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text("/"),
            Answer::Confirm(true),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_parent_selection_uses_root_item_id() {
        let mut repo = repo_with_group();
        let summary = persisted(&NewMenuItem::new(1, "summary", "Summary"), 42);
        let roots = vec![summary.clone()];
        repo.expect_list_root_items()
            .withf(|group_id| *group_id == 1)
            .returning(move |_| Ok(roots.clone()));
        repo.expect_find_item()
            .withf(|id| *id == 42)
            .returning(move |_| Ok(Some(summary.clone())));
        repo.expect_create_item()
            .withf(|item| item.parent_id == Some(42))
            .times(1)
            .returning(|item| Ok(persisted(item, 43)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("monthly"),
            Answer::text("Monthly"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text("/reports/monthly"),
            Answer::Confirm(false),
            Answer::Confirm(true),
            Answer::Select(0),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.selects[1], vec!["Summary (summary)".to_string()]);
        assert!(prompter
            .messages(crate::prompt::Notice::Line)
            .contains(&"  Parent: Summary"));
    }

    #[tokio::test]
    async fn test_no_root_items_degrades_to_no_parent() {
        let mut repo = repo_with_group();
        repo.expect_list_root_items().returning(|_| Ok(Vec::new()));
        repo.expect_find_item().never();
        repo.expect_create_item()
            .withf(|item| item.parent_id.is_none())
            .times(1)
            .returning(|item| Ok(persisted(item, 2)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("home"),
            Answer::text("Home"),
            Answer::text(""),
            Answer::Confirm(false),
            Answer::text("/"),
            Answer::Confirm(false),
            Answer::Confirm(true),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.warnings(), vec!["No parent menu items available in this group."]);
    }

    #[tokio::test]
    async fn test_group_created_when_none_exist_and_duplicate_key_reprompted() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups().returning(|| Ok(Vec::new()));
        repo.expect_create_group()
            .withf(|group| group.key == "reports")
            .times(1)
            .returning(|group| Err(DomainError::DuplicateGroupKey(group.key.clone())));
        repo.expect_create_group()
            .withf(|group| group.key == "analytics")
            .times(1)
            .returning(|group| {
                let mut created = self::group(5, &group.key, &group.label);
                created.sort_order = group.sort_order;
                Ok(created)
            });
        repo.expect_key_exists_in_group()
            .withf(|group_id, _| *group_id == 5)
            .returning(|_, _| Ok(false));
        repo.expect_create_item()
            .withf(|item| item.menu_group_id == 5)
            .times(1)
            .returning(|item| Ok(persisted(item, 1)));

        let mut answers = vec![
            Answer::text("reports"),
            Answer::text("Reports"),
            Answer::text(""),
            Answer::text("30"),
            Answer::text("analytics"),
            Answer::text("home"),
        ];
        answers.extend(plain_route_answers(true));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET"], "/")]),
            permissions(&[]),
        );
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(prompter.warnings(), vec!["No menu groups found. Creating a new one..."]);
        assert_eq!(
            prompter.errors(),
            vec!["Menu group key 'reports' already exists. Please choose another."]
        );
    }

    #[tokio::test]
    async fn test_create_new_group_option() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups()
            .returning(|| Ok(vec![group(1, "main", "Main")]));
        repo.expect_create_group()
            .times(1)
            .returning(|group| Ok(self::group(2, &group.key, &group.label)));
        repo.expect_key_exists_in_group().returning(|_, _| Ok(false));
        repo.expect_create_item()
            .withf(|item| item.menu_group_id == 2)
            .times(1)
            .returning(|item| Ok(persisted(item, 1)));

        let mut answers = vec![
            Answer::Select(1),
            Answer::text("reports"),
            Answer::text("Reports"),
            Answer::text("chart"),
            Answer::text(""),
            Answer::text("home"),
        ];
        answers.extend(plain_route_answers(true));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET"], "/")]),
            permissions(&[]),
        );
        builder.run(&mut prompter).await.unwrap();

        assert_eq!(
            prompter.selects[0],
            vec!["Main (main)".to_string(), "Create new menu group".to_string()]
        );
    }

    #[tokio::test]
    async fn test_key_taken_at_commit_is_reacquired() {
        let mut repo = repo_with_group();
        let mut seq = Sequence::new();
        repo.expect_create_item()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|item| {
                Err(DomainError::DuplicateItemKey {
                    group_id: item.menu_group_id,
                    key: item.key.clone(),
                })
            });
        repo.expect_create_item()
            .withf(|item| item.key == "home-2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|item| Ok(persisted(item, 11)));

        let mut answers = vec![Answer::Select(0), Answer::text("home")];
        answers.extend(plain_route_answers(true));
        answers.push(Answer::text("home-2"));
        answers.push(Answer::Confirm(true));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET"], "/")]),
            permissions(&[]),
        );
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert!(matches!(outcome, BuildOutcome::Created(ref item) if item.key == "home-2"));
        assert_eq!(prompter.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_overlong_icon_is_reprompted() {
        let mut repo = repo_with_group();
        repo.expect_create_item()
            .withf(|item| item.icon.as_deref() == Some("heroicon-o-home"))
            .times(1)
            .returning(|item| Ok(persisted(item, 12)));

        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(0),
            Answer::text("home"),
            Answer::text("Home"),
            Answer::text(&"i".repeat(MAX_ICON_LENGTH + 1)),
            Answer::text("heroicon-o-home"),
            Answer::Confirm(false),
            Answer::text("/"),
            Answer::Confirm(false),
            Answer::Confirm(false),
            Answer::text(""),
            Answer::Confirm(true),
            Answer::Confirm(true),
        ]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert!(matches!(outcome, BuildOutcome::Created(ref item) if item.id == 12));
        assert_eq!(
            prompter.errors(),
            vec!["Icon (optional, e.g., \"heroicon-o-home\") must be at most 100 characters."]
        );
    }

    #[tokio::test]
    async fn test_overlong_group_fields_are_reprompted() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups().returning(|| Ok(Vec::new()));
        repo.expect_create_group()
            .withf(|group| group.key == "reports" && group.label == "Reports")
            .times(1)
            .returning(|group| Ok(self::group(3, &group.key, &group.label)));
        repo.expect_key_exists_in_group().returning(|_, _| Ok(false));
        repo.expect_create_item()
            .times(1)
            .returning(|item| Ok(persisted(item, 1)));

        let mut answers = vec![
            Answer::text(&"k".repeat(MAX_KEY_LENGTH + 1)),
            Answer::text("reports"),
            Answer::text(&"L".repeat(MAX_LABEL_LENGTH + 1)),
            Answer::text("Reports"),
            Answer::text(""),
            Answer::text(""),
            Answer::text("home"),
        ];
        answers.extend(plain_route_answers(true));
        let mut prompter = ScriptedPrompter::new(answers);

        let builder = builder(
            repo,
            routes(vec![RouteDescriptor::new("dashboard", &["GET"], "/")]),
            permissions(&[]),
        );
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert!(matches!(outcome, BuildOutcome::Created(_)));
        assert_eq!(
            prompter.errors(),
            vec![
                "Menu group key must be at most 255 characters.",
                "Menu group label must be at most 255 characters.",
            ]
        );
    }

    #[tokio::test]
    async fn test_interrupt_is_a_cancellation() {
        let mut repo = repo_with_group();
        repo.expect_create_item().never();

        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(0), Answer::Interrupt]);

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        let outcome = builder.run(&mut prompter).await.unwrap();

        assert_eq!(outcome, BuildOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_database_failure_is_terminal() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_groups()
            .returning(|| Err(DomainError::DatabaseError("disk I/O error".into())));

        let mut prompter = ScriptedPrompter::new(Vec::new());

        let builder = builder(repo, routes(Vec::new()), permissions(&[]));
        let result = builder.run(&mut prompter).await;

        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[test]
    fn test_summary_omits_absent_fields() {
        let draft = NewMenuItem::new(1, "home", "Home")
            .with_target(MenuTarget::Route("dashboard".into()))
            .with_sort_order(5);

        let lines = summary_lines(&group(1, "main", "Main"), &draft, None);

        assert_eq!(
            lines,
            vec![
                "  Group: Main",
                "  Key: home",
                "  Label: Home",
                "  Route: dashboard",
                "  Sort Order: 5",
                "  Active: Yes",
            ]
        );
    }
}
