use crate::types::AllowedWorkspaceClass;
use serde::Serialize;
use std::fmt;

/// Why a restricted-classes + default-class selection cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionError {
    NoSelectableClass,
    NoValidDefault,
}

impl SelectionError {
    pub fn message(self) -> &'static str {
        match self {
            SelectionError::NoSelectableClass => "Must have at least one class.",
            SelectionError::NoValidDefault => "Must have default class.",
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SelectionError {}

/// Check a proposed selection against a resolved, unfiltered class list.
///
/// A class remains selectable when no scope disabled it and it is not in
/// `restricted`. At least one must remain, and `default_class` must be one
/// of them.
pub fn validate_selection(
    classes: &[AllowedWorkspaceClass],
    restricted: &[String],
    default_class: Option<&str>,
) -> Option<SelectionError> {
    let mut remaining = classes
        .iter()
        .filter(|c| !c.is_disabled_in_scope() && !restricted.iter().any(|r| r == c.id()))
        .peekable();

    if remaining.peek().is_none() {
        return Some(SelectionError::NoSelectableClass);
    }

    let Some(default) = default_class.filter(|d| !d.is_empty()) else {
        return Some(SelectionError::NoValidDefault);
    };
    if remaining.any(|c| c.id() == default) {
        None
    } else {
        Some(SelectionError::NoValidDefault)
    }
}
