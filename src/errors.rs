// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::service::RestartPhase;

#[derive(Error, Debug)]
pub enum HostdeployError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("The web server doesn't contain the site {0}")]
    SiteNotFound(String),

    #[error("The site {site} doesn't contain an application at {path}")]
    ApplicationNotFound { site: String, path: String },

    #[error("The directory {relative} doesn't exist (resolved to {physical:?})")]
    PhysicalPathMissing { relative: String, physical: PathBuf },

    #[error("The web server doesn't contain the application pool {0}")]
    PoolNotFound(String),

    #[error("Service did not reach the expected state during {phase} within {timeout:?}")]
    ServiceTimeout { phase: RestartPhase, timeout: Duration },

    #[error("Service command failed: {0}")]
    ServiceCommand(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, HostdeployError>;
