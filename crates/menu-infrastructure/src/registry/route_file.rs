//! Route registry loaded from a TOML file
//!
//! ```toml
//! [[routes]]
//! name = "users.index"
//! methods = ["GET", "HEAD"]
//! uri = "users"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use menu_core::domain::RouteDescriptor;
use menu_core::error::DomainError;
use menu_core::repositories::RouteRegistry;

#[derive(Debug, Deserialize)]
struct RouteFile {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    name: String,
    #[serde(default)]
    methods: Vec<String>,
    uri: String,
}

#[derive(Debug, Clone, Default)]
pub struct RouteFileRegistry {
    routes: Vec<RouteDescriptor>,
}

impl RouteFileRegistry {
    /// A missing file is an empty registry, not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Route file not found: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainError::RegistryError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let registry = Self::from_toml(&content)?;

        info!("Loaded {} routes from {}", registry.routes.len(), path.display());
        Ok(registry)
    }

    pub fn from_toml(content: &str) -> Result<Self, DomainError> {
        let file: RouteFile = toml::from_str(content)
            .map_err(|e| DomainError::RegistryError(format!("invalid route file: {}", e)))?;

        let routes = file
            .routes
            .into_iter()
            .map(|entry| RouteDescriptor {
                name: entry.name,
                methods: entry.methods,
                uri: entry.uri,
            })
            .collect();

        Ok(Self { routes })
    }
}

impl RouteRegistry for RouteFileRegistry {
    fn routes(&self) -> Vec<RouteDescriptor> {
        self.routes.clone()
    }
}
