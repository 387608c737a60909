use thiserror::Error;

#[derive(Debug, Error)]
pub enum WsClassError {
    #[error("not initialized: run 'wsclass init'")]
    NotInitialized,

    #[error("workspace class not found: {0}")]
    ClassNotFound(String),

    #[error("workspace class '{id}' is unavailable: {reason}")]
    ClassUnavailable { id: String, reason: String },

    #[error("configuration not found: {0}")]
    ConfigurationNotFound(String),

    #[error("configuration already exists: {0}")]
    ConfigurationExists(String),

    #[error("invalid configuration id '{0}': must be non-empty and contain no path separators")]
    InvalidConfigurationId(String),

    #[error("invalid scope: {0}")]
    InvalidScope(String),

    #[error("{0}")]
    Selection(#[from] crate::validate::SelectionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WsClassError>;
