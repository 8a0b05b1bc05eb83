//! Operator prompt abstraction
//!
//! The builder talks to the operator only through [`Prompter`], so the same
//! protocol runs against a terminal or a scripted session.

#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

use thiserror::Error;

use menu_shared::utils::{non_blank, parse_sort_order};
use menu_shared::SortOrder;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt interrupted by operator")]
    Interrupted,

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity of a message shown between prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Line,
    Warning,
    Error,
}

/// One entry of a select or search list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Identifier matched by search, e.g. a route name.
    pub value: String,
    /// Text shown to the operator.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.value.to_lowercase().contains(&query) || self.label.to_lowercase().contains(&query)
    }
}

pub trait Prompter {
    /// Free text. Empty input yields `default` when one is given.
    fn text(&mut self, label: &str, default: Option<&str>) -> Result<String, PromptError>;

    fn confirm(&mut self, label: &str, default: bool) -> Result<bool, PromptError>;

    /// Single choice; returns the index into `options`.
    fn select(&mut self, label: &str, options: &[SelectOption]) -> Result<usize, PromptError>;

    /// Filterable choice showing at most `scroll` rows; returns the index into `options`.
    fn search(
        &mut self,
        label: &str,
        options: &[SelectOption],
        scroll: usize,
    ) -> Result<usize, PromptError>;

    fn notify(&mut self, notice: Notice, message: &str);

    fn info(&mut self, message: &str) {
        self.notify(Notice::Info, message);
    }

    fn line(&mut self, message: &str) {
        self.notify(Notice::Line, message);
    }

    fn warn(&mut self, message: &str) {
        self.notify(Notice::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(Notice::Error, message);
    }
}

/// Options whose value or label contains `query`, ignoring case, with their
/// original positions. A blank query keeps everything.
pub fn filter_options<'a>(options: &'a [SelectOption], query: &str) -> Vec<(usize, &'a SelectOption)> {
    let query = query.trim();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| query.is_empty() || option.matches(query))
        .collect()
}

/// Asks until the operator types something other than whitespace.
pub fn required_text(prompter: &mut dyn Prompter, label: &str) -> Result<String, PromptError> {
    required_text_max(prompter, label, usize::MAX)
}

/// Like [`required_text`], also re-asking answers longer than `max_chars`.
pub fn required_text_max(
    prompter: &mut dyn Prompter,
    label: &str,
    max_chars: usize,
) -> Result<String, PromptError> {
    loop {
        let answer = prompter.text(label, None)?;
        match non_blank(&answer) {
            None => prompter.error(&format!("{} is required.", label)),
            Some(value) if value.chars().count() > max_chars => {
                prompter.error(&too_long(label, max_chars));
            }
            Some(value) => return Ok(value),
        }
    }
}

pub fn optional_text(prompter: &mut dyn Prompter, label: &str) -> Result<Option<String>, PromptError> {
    optional_text_max(prompter, label, usize::MAX)
}

/// Blank input is `None`; answers longer than `max_chars` are re-asked.
pub fn optional_text_max(
    prompter: &mut dyn Prompter,
    label: &str,
    max_chars: usize,
) -> Result<Option<String>, PromptError> {
    loop {
        let answer = non_blank(&prompter.text(label, Some(""))?);
        match answer {
            Some(value) if value.chars().count() > max_chars => {
                prompter.error(&too_long(label, max_chars));
            }
            answer => return Ok(answer),
        }
    }
}

fn too_long(label: &str, max_chars: usize) -> String {
    format!("{} must be at most {} characters.", label, max_chars)
}

/// Asks until the answer is a whole number; blank means the default order.
pub fn sort_order(prompter: &mut dyn Prompter, label: &str) -> Result<SortOrder, PromptError> {
    loop {
        let answer = prompter.text(label, Some("0"))?;
        match parse_sort_order(&answer) {
            Some(order) => return Ok(order),
            None => prompter.error(&format!("Sort order must be a whole number, got '{}'.", answer.trim())),
        }
    }
}
