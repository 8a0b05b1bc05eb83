//! Configuration management

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
    pub registry: RegistrySettings,
    #[serde(default)]
    pub resources: Vec<ResourceSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// Directory for rolling log files. Logs go to stderr when unset.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistrySettings {
    /// TOML file listing the host application's named routes.
    pub routes_file: String,
}

/// A resource registered for menu seeding.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceSettings {
    pub name: String,
    pub group: String,
    pub title: String,
    pub slug: String,
    pub route: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Path::new("config"))
    }

    /// Layers defaults, `<dir>/default`, `<dir>/<APP_ENV>` and the environment.
    pub fn load_from(dir: &Path) -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.as_str())?
            .set_default("app.name", "menuctl")?
            .set_default("database.url", "sqlite://menu.db")?
            .set_default("database.max_connections", 1)?
            .set_default("log.level", "warn")?
            .set_default("registry.routes_file", "config/routes.toml")?
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        if config.database.url.trim().is_empty() {
            return Err(AppError::InvalidSetting("database.url must not be empty".into()));
        }
        Ok(config)
    }
}
