use std::path::PathBuf;
use thiserror::Error;

/// Raised by a [`crate::Host`] when it can't carry out a border operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HostError(pub String);

#[derive(Debug, Error)]
pub enum BorderError {
    #[error("host rejected border operation: {0}")]
    Host(#[from] HostError),

    #[error("failed to read config at {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("you don't have permission to use /{0}")]
    PermissionDenied(&'static str),

    #[error("debug mode is disabled in the config")]
    DebugUnavailable,
}

pub type Result<T, E = BorderError> = std::result::Result<T, E>;
