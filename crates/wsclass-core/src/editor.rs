use crate::error::{Result, WsClassError};
use crate::settings::UpdateRequest;
use crate::types::{AllowedWorkspaceClass, DisableScope, DEFAULT_WS_CLASS};
use crate::validate::{validate_selection, SelectionError};
use serde::Serialize;

// ---------------------------------------------------------------------------
// ClassAvailability
// ---------------------------------------------------------------------------

/// What a user may do with one class while editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClassAvailability {
    /// Disabled by a scope or by the pending restriction list.
    Unavailable { reason: String },
    /// Currently the default class.
    Default,
    Selectable,
}

impl ClassAvailability {
    pub fn title(&self) -> &'static str {
        match self {
            ClassAvailability::Unavailable { .. } => "Unavailable",
            ClassAvailability::Default => "Default",
            ClassAvailability::Selectable => "Set default",
        }
    }

    /// Whether "make default" is allowed.
    pub fn can_become_default(&self) -> bool {
        matches!(self, ClassAvailability::Selectable)
    }
}

fn disabled_reason(scope: DisableScope) -> String {
    format!("{} has disabled this class", scope.subject())
}

// ---------------------------------------------------------------------------
// ClassEditor
// ---------------------------------------------------------------------------

/// Pending edit of a configuration's restricted classes and default class.
///
/// `classes` is the unfiltered resolution the user is editing against,
/// typically computed with the configuration layer ignored so that the
/// configuration's own restrictions show up as toggles instead of as
/// scope-disabled classes.
#[derive(Debug, Clone)]
pub struct ClassEditor {
    classes: Vec<AllowedWorkspaceClass>,
    restricted: Vec<String>,
    default_class: String,
}

impl ClassEditor {
    pub fn new(
        classes: Vec<AllowedWorkspaceClass>,
        restricted: Vec<String>,
        default_class: Option<String>,
    ) -> Self {
        let default_class = default_class
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_WS_CLASS.to_string());
        Self {
            classes,
            restricted,
            default_class,
        }
    }

    pub fn classes(&self) -> &[AllowedWorkspaceClass] {
        &self.classes
    }

    pub fn restricted(&self) -> &[String] {
        &self.restricted
    }

    pub fn default_class(&self) -> &str {
        &self.default_class
    }

    fn find(&self, id: &str) -> Result<&AllowedWorkspaceClass> {
        self.classes
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| WsClassError::ClassNotFound(id.to_string()))
    }

    /// Toggle one class. Disabling appends it to the restricted list once;
    /// enabling removes every occurrence. A class already disabled by a
    /// scope cannot be toggled.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        if let Some(scope) = self.find(id)?.disable_scope() {
            return Err(WsClassError::ClassUnavailable {
                id: id.to_string(),
                reason: disabled_reason(scope),
            });
        }
        if enabled {
            self.restricted.retain(|r| r != id);
        } else if !self.restricted.iter().any(|r| r == id) {
            self.restricted.push(id.to_string());
        }
        Ok(())
    }

    pub fn set_default(&mut self, id: &str) -> Result<()> {
        let availability = self.availability(id)?;
        if let ClassAvailability::Unavailable { reason } = availability {
            return Err(WsClassError::ClassUnavailable {
                id: id.to_string(),
                reason,
            });
        }
        self.default_class = id.to_string();
        Ok(())
    }

    pub fn availability(&self, id: &str) -> Result<ClassAvailability> {
        let cls = self.find(id)?;
        if let Some(scope) = cls.disable_scope() {
            return Ok(ClassAvailability::Unavailable {
                reason: disabled_reason(scope),
            });
        }
        if self.restricted.iter().any(|r| r == id) {
            return Ok(ClassAvailability::Unavailable {
                reason: disabled_reason(DisableScope::Configuration),
            });
        }
        if self.default_class == id {
            return Ok(ClassAvailability::Default);
        }
        Ok(ClassAvailability::Selectable)
    }

    /// Advisory check gating [`ClassEditor::submit`].
    pub fn error(&self) -> Option<SelectionError> {
        validate_selection(&self.classes, &self.restricted, Some(&self.default_class))
    }

    pub fn submit(&self) -> Result<UpdateRequest> {
        if let Some(err) = self.error() {
            return Err(err.into());
        }
        Ok(UpdateRequest {
            restricted_workspace_classes: self.restricted.clone(),
            default_class: Some(self.default_class.clone()),
        })
    }
}
