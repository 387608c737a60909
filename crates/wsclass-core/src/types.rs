use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Class pre-selected for new environments when nothing else is configured.
pub const DEFAULT_WS_CLASS: &str = "g1-standard";

// ---------------------------------------------------------------------------
// WorkspaceClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceClass {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

impl WorkspaceClass {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// The restriction layer a resolution was computed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Installation,
    Organization,
    Configuration,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Installation => "installation",
            Scope::Organization => "organization",
            Scope::Configuration => "configuration",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DisableScope> for Scope {
    fn from(scope: DisableScope) -> Self {
        match scope {
            DisableScope::Organization => Scope::Organization,
            DisableScope::Configuration => Scope::Configuration,
        }
    }
}

// ---------------------------------------------------------------------------
// DisableScope
// ---------------------------------------------------------------------------

/// A layer that is able to disable a class. The installation never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisableScope {
    Organization,
    Configuration,
}

impl DisableScope {
    pub fn as_str(self) -> &'static str {
        match self {
            DisableScope::Organization => "organization",
            DisableScope::Configuration => "configuration",
        }
    }

    /// Who to blame in user-facing text.
    pub fn subject(self) -> &'static str {
        match self {
            DisableScope::Organization => "Your organization",
            DisableScope::Configuration => "Current configuration",
        }
    }
}

impl fmt::Display for DisableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DisableScope {
    type Err = crate::error::WsClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(DisableScope::Organization),
            "configuration" => Ok(DisableScope::Configuration),
            _ => Err(crate::error::WsClassError::InvalidScope(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ClassState / AllowedWorkspaceClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassState {
    #[default]
    Enabled,
    DisabledBy(DisableScope),
}

/// A workspace class annotated with the outcome of scope resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedWorkspaceClass {
    pub class: WorkspaceClass,
    pub state: ClassState,
}

impl AllowedWorkspaceClass {
    pub fn enabled(class: WorkspaceClass) -> Self {
        Self {
            class,
            state: ClassState::Enabled,
        }
    }

    pub fn id(&self) -> &str {
        &self.class.id
    }

    pub fn is_disabled_in_scope(&self) -> bool {
        matches!(self.state, ClassState::DisabledBy(_))
    }

    pub fn disable_scope(&self) -> Option<DisableScope> {
        match self.state {
            ClassState::Enabled => None,
            ClassState::DisabledBy(scope) => Some(scope),
        }
    }
}

// Consumers expect the flat `isDisabledInScope` / `disableScope` pair.
impl Serialize for AllowedWorkspaceClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            #[serde(flatten)]
            class: &'a WorkspaceClass,
            is_disabled_in_scope: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            disable_scope: Option<DisableScope>,
        }

        Wire {
            class: &self.class,
            is_disabled_in_scope: self.is_disabled_in_scope(),
            disable_scope: self.disable_scope(),
        }
        .serialize(serializer)
    }
}
