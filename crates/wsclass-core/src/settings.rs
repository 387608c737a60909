use crate::types::WorkspaceClass;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// OrgSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSettings {
    /// Allow-list. Empty means the organization restricts nothing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_workspace_classes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettings {
    /// Deny-list. Empty means the configuration restricts nothing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_workspace_classes: Vec<String>,
    /// Default class for new environments of this configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_settings: Option<WorkspaceSettings>,
}

impl Configuration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            workspace_settings: None,
        }
    }

    pub fn restricted_classes(&self) -> &[String] {
        self.workspace_settings
            .as_ref()
            .map(|s| s.restricted_workspace_classes.as_slice())
            .unwrap_or(&[])
    }

    pub fn default_class(&self) -> Option<&str> {
        self.workspace_settings
            .as_ref()
            .and_then(|s| s.workspace_class.as_deref())
    }

    /// Apply an accepted update. The default is only replaced when given.
    pub fn apply(&mut self, update: &UpdateRequest) {
        let settings = self.workspace_settings.get_or_insert_with(Default::default);
        settings.restricted_workspace_classes = update.restricted_workspace_classes.clone();
        if let Some(default) = &update.default_class {
            settings.workspace_class = Some(default.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// UpdateRequest
// ---------------------------------------------------------------------------

/// Payload handed to the update collaborator after a successful edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub restricted_workspace_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_class: Option<String>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

/// Everything the resolver consumes, as loaded at one point in time.
/// `None` means the input has not been loaded yet.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub installation: Option<Vec<WorkspaceClass>>,
    pub organization: Option<OrgSettings>,
    pub configurations: Vec<Configuration>,
}

impl Snapshot {
    pub fn configuration(&self, id: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    pub fn check(&self) -> Vec<SnapshotWarning> {
        let mut warnings = Vec::new();
        let classes = self.installation.as_deref().unwrap_or(&[]);

        // 1. Class ids must be unique
        let mut seen = HashSet::new();
        for cls in classes {
            if !seen.insert(cls.id.as_str()) {
                warnings.push(SnapshotWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate workspace class id '{}'", cls.id),
                });
            }
        }

        // 2. Organization allow-list
        if let Some(org) = &self.organization {
            for id in &org.allowed_workspace_classes {
                if !seen.contains(id.as_str()) {
                    warnings.push(SnapshotWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "organization allows unknown workspace class '{id}'"
                        ),
                    });
                }
            }
            if !classes.is_empty()
                && !org.allowed_workspace_classes.is_empty()
                && !classes
                    .iter()
                    .any(|c| org.allowed_workspace_classes.contains(&c.id))
            {
                warnings.push(SnapshotWarning {
                    level: WarnLevel::Error,
                    message: "organization allow-list leaves no workspace class enabled"
                        .to_string(),
                });
            }
        }

        // 3. Per-configuration restrictions and defaults
        for cfg in &self.configurations {
            for id in cfg.restricted_classes() {
                if !seen.contains(id.as_str()) {
                    warnings.push(SnapshotWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "configuration '{}' restricts unknown workspace class '{}'",
                            cfg.id, id
                        ),
                    });
                }
            }
            if let Some(default) = cfg.default_class() {
                if !seen.contains(default) {
                    warnings.push(SnapshotWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "configuration '{}' defaults to unknown workspace class '{}'",
                            cfg.id, default
                        ),
                    });
                }
            }
        }

        warnings
    }
}
