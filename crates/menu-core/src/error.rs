//! Domain errors

use thiserror::Error;

use menu_shared::EntityId;

use crate::prompt::PromptError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu group key already exists: {0}")]
    DuplicateGroupKey(String),

    #[error("Menu item key already exists in menu group {group_id}: {key}")]
    DuplicateItemKey { group_id: EntityId, key: String },

    #[error("Menu group not found: {0}")]
    GroupNotFound(EntityId),

    #[error("Parent menu item not found: {0}")]
    ParentNotFound(EntityId),

    #[error("Parent menu item {parent_id} does not belong to menu group {group_id}")]
    ParentNotInGroup { parent_id: EntityId, group_id: EntityId },

    #[error("Menu item {0} is part of a parent cycle")]
    CycleDetected(EntityId),

    #[error("Menu nesting deeper than {0} levels")]
    MaxDepthExceeded(usize),

    #[error("Resource registered twice: {0}")]
    DuplicateResource(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Uniqueness violations the operator can recover from by choosing another key.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateGroupKey(_) | DomainError::DuplicateItemKey { .. }
        )
    }

    /// Rejections caused by one record's content; other records can still be written.
    pub fn is_rejected_record(&self) -> bool {
        self.is_constraint_violation() || matches!(self, DomainError::ValidationError(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
