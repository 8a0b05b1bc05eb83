//! Named route entity, as reported by the host route registry

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub name: String,
    pub methods: Vec<String>,
    pub uri: String,
}

impl RouteDescriptor {
    pub fn new(name: impl Into<String>, methods: &[&str], uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            uri: uri.into(),
        }
    }

    /// `"{name} ({METHODS} {uri})"`, methods joined by `|`.
    pub fn label(&self) -> String {
        format!("{} ({} {})", self.name, self.methods.join("|"), self.uri)
    }
}
