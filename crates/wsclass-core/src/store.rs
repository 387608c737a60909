//! File-backed settings collaborators.
//!
//! The resolver only sees plain values; this module is where they come from
//! and where accepted updates go. [`SettingsStore`] is the seam, and
//! [`FileStore`] keeps everything as YAML under `.wsclass/`.

use crate::error::{Result, WsClassError};
use crate::io::{atomic_write, write_if_missing};
use crate::paths;
use crate::settings::{Configuration, OrgSettings, Snapshot, UpdateRequest};
use crate::types::{WorkspaceClass, DEFAULT_WS_CLASS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub trait SettingsStore {
    /// `None` until the installation list has been published.
    fn installation_classes(&self) -> Result<Option<Vec<WorkspaceClass>>>;

    /// `None` until the organization has saved settings.
    fn org_settings(&self) -> Result<Option<OrgSettings>>;

    fn configuration(&self, id: &str) -> Result<Configuration>;

    /// Persist an accepted edit and return the stored configuration.
    fn update_configuration(&self, id: &str, update: &UpdateRequest) -> Result<Configuration>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open an initialized store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        if !paths::wsclass_dir(root).is_dir() {
            return Err(WsClassError::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Scaffold `.wsclass/`. Existing files are left untouched.
    pub fn init(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(paths::configurations_dir(root))?;
        let installation = default_installation();
        let data = serde_yaml::to_string(&installation)?;
        if write_if_missing(&paths::installation_path(root), data.as_bytes())? {
            tracing::info!(classes = installation.len(), "wrote default installation classes");
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save_installation(&self, classes: &[WorkspaceClass]) -> Result<()> {
        save_yaml(&paths::installation_path(&self.root), &classes)
    }

    pub fn save_org_settings(&self, settings: &OrgSettings) -> Result<()> {
        save_yaml(&paths::organization_path(&self.root), settings)
    }

    pub fn create_configuration(&self, configuration: &Configuration) -> Result<()> {
        paths::validate_configuration_id(&configuration.id)?;
        let path = paths::configuration_path(&self.root, &configuration.id);
        if path.exists() {
            return Err(WsClassError::ConfigurationExists(configuration.id.clone()));
        }
        save_yaml(&path, configuration)
    }

    /// Configurations sorted by id.
    pub fn list_configurations(&self) -> Result<Vec<Configuration>> {
        let dir = paths::configurations_dir(&self.root);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut configurations = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(cfg) = load_yaml::<Configuration>(&path)? {
                configurations.push(cfg);
            }
        }
        configurations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(configurations)
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            installation: self.installation_classes()?,
            organization: self.org_settings()?,
            configurations: self.list_configurations()?,
        })
    }
}

impl SettingsStore for FileStore {
    fn installation_classes(&self) -> Result<Option<Vec<WorkspaceClass>>> {
        load_yaml(&paths::installation_path(&self.root))
    }

    fn org_settings(&self) -> Result<Option<OrgSettings>> {
        load_yaml(&paths::organization_path(&self.root))
    }

    fn configuration(&self, id: &str) -> Result<Configuration> {
        paths::validate_configuration_id(id)?;
        load_yaml(&paths::configuration_path(&self.root, id))?
            .ok_or_else(|| WsClassError::ConfigurationNotFound(id.to_string()))
    }

    fn update_configuration(&self, id: &str, update: &UpdateRequest) -> Result<Configuration> {
        let mut configuration = self.configuration(id)?;
        configuration.apply(update);
        save_yaml(&paths::configuration_path(&self.root, id), &configuration)?;
        tracing::debug!(
            configuration = id,
            restricted = update.restricted_workspace_classes.len(),
            default_class = update.default_class.as_deref().unwrap_or(""),
            "updated configuration workspace settings"
        );
        Ok(configuration)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path)?;
    let value = serde_yaml::from_str(&data)?;
    Ok(Some(value))
}

fn save_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    atomic_write(path, data.as_bytes())
}

fn default_installation() -> Vec<WorkspaceClass> {
    vec![
        WorkspaceClass::new(
            DEFAULT_WS_CLASS,
            "Standard",
            "Up to 4 vCPU, 8GB memory, 30GB disk",
        ),
        WorkspaceClass::new("g1-large", "Large", "Up to 8 vCPU, 16GB memory, 50GB disk"),
    ]
}
