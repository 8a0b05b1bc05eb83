//! Host registries (ports)

use async_trait::async_trait;

use crate::domain::RouteDescriptor;
use crate::error::DomainError;

/// Named routes known to the host application.
#[cfg_attr(test, mockall::automock)]
pub trait RouteRegistry: Send + Sync {
    fn routes(&self) -> Vec<RouteDescriptor>;
}

/// Permission names known to the host access-control layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRegistry: Send + Sync {
    async fn permission_names(&self) -> Result<Vec<String>, DomainError>;
}
