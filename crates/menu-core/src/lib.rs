//! # Menu Core
//!
//! Domain entities, services, prompt abstraction and repository traits for
//! the menu console.

pub mod domain;
pub mod error;
pub mod prompt;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use prompt::{PromptError, Prompter};
