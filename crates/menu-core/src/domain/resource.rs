// ============================================================================
// Menu Core - Resource Registry
// File: crates/menu-core/src/domain/resource.rs
// Description: Explicitly registered admin resources used for menu seeding
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use menu_shared::config::ResourceSettings;

use crate::error::DomainError;

/// Menu metadata of one admin resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Registration identifier, unique within a registry.
    pub name: String,
    /// Navigation group the resource belongs to.
    pub group: String,
    pub title: String,
    pub slug: String,
    pub route: Option<String>,
}

impl ResourceDescriptor {
    /// Route bound to the seeded item, `{slug}.index` unless overridden.
    pub fn route_name(&self) -> String {
        match &self.route {
            Some(route) => route.clone(),
            None => format!("{}.index", self.slug),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.slug.trim().is_empty()
    }
}

impl From<&ResourceSettings> for ResourceDescriptor {
    fn from(settings: &ResourceSettings) -> Self {
        Self {
            name: settings.name.clone(),
            group: settings.group.clone(),
            title: settings.title.clone(),
            slug: settings.slug.clone(),
            route: settings.route.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<String, ResourceDescriptor>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &[ResourceSettings]) -> Result<Self, DomainError> {
        let mut registry = Self::new();
        for resource in settings {
            registry.register(ResourceDescriptor::from(resource))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<(), DomainError> {
        if self.resources.contains_key(&descriptor.name) {
            return Err(DomainError::DuplicateResource(descriptor.name));
        }
        self.resources.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources bucketed by group, groups and members ordered by name.
    pub fn grouped(&self) -> Vec<(String, Vec<&ResourceDescriptor>)> {
        let mut groups: BTreeMap<String, Vec<&ResourceDescriptor>> = BTreeMap::new();
        for descriptor in self.resources.values() {
            groups.entry(descriptor.group.clone()).or_default().push(descriptor);
        }
        groups.into_iter().collect()
    }
}
