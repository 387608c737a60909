use crate::error::{Result, WsClassError};
use std::path::{Path, PathBuf};

pub const WSCLASS_DIR: &str = ".wsclass";
pub const CONFIGURATIONS_DIR: &str = ".wsclass/configurations";

pub const INSTALLATION_FILE: &str = ".wsclass/installation.yaml";
pub const ORGANIZATION_FILE: &str = ".wsclass/organization.yaml";

pub fn wsclass_dir(root: &Path) -> PathBuf {
    root.join(WSCLASS_DIR)
}

pub fn installation_path(root: &Path) -> PathBuf {
    root.join(INSTALLATION_FILE)
}

pub fn organization_path(root: &Path) -> PathBuf {
    root.join(ORGANIZATION_FILE)
}

pub fn configurations_dir(root: &Path) -> PathBuf {
    root.join(CONFIGURATIONS_DIR)
}

pub fn configuration_path(root: &Path, id: &str) -> PathBuf {
    configurations_dir(root).join(format!("{id}.yaml"))
}

/// Configuration ids become file names, so they must not escape the directory.
pub fn validate_configuration_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.chars().any(char::is_control);
    if ok {
        Ok(())
    } else {
        Err(WsClassError::InvalidConfigurationId(id.to_string()))
    }
}
