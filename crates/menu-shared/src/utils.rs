//! Utility functions

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::DEFAULT_SORT_ORDER;

fn uppercase_letter() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z])").ok()).as_ref()
}

/// Turns a PascalCase or snake_case name into a spaced "Title Case" label.
pub fn format_label(name: &str) -> String {
    let spaced = match uppercase_letter() {
        Some(re) => re.replace_all(name, " $1").replace('_', " "),
        None => name.replace('_', " "),
    };
    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses a sort order typed by an operator. Blank input means the default.
pub fn parse_sort_order(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(DEFAULT_SORT_ORDER);
    }
    trimmed.parse::<i32>().ok()
}

/// Empty or whitespace-only input becomes `None`.
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
