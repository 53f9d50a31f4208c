// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{HostdeployError, Result};
use crate::types::DesiredApplication;

/// Service restarted by `hostdeploy restart` unless `[config].service` says
/// otherwise.
pub const DEFAULT_SERVICE: &str = "W3SVC";

/// Shared deadline for the whole stop + start cycle.
pub const DEFAULT_RESTART_TIMEOUT_MS: u64 = 15_000;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// root = "."
/// host_state = "host-state.toml"
/// service = "W3SVC"
/// restart_timeout_ms = 15000
///
/// [app.Orchard]
/// site = "Default Web Site"
/// name = "Orchard"
/// path = 'orchard\src\Orchard.Web'
/// browse_on_start = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Desired applications keyed by configuration name.
    #[serde(default)]
    pub app: BTreeMap<String, DesiredApplication>,
}

/// `[config]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSection {
    /// Root that application `path`s are resolved against. Relative roots
    /// are resolved against the directory holding the config file.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Host-state document backing the administration surface.
    #[serde(default = "default_host_state")]
    pub host_state: PathBuf,

    /// Service id used by `restart`.
    #[serde(default = "default_service")]
    pub service: String,

    /// Deadline shared by the stop and start phases of `restart`.
    #[serde(default = "default_restart_timeout_ms")]
    pub restart_timeout_ms: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_host_state() -> PathBuf {
    PathBuf::from("host-state.toml")
}

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

fn default_restart_timeout_ms() -> u64 {
    DEFAULT_RESTART_TIMEOUT_MS
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            host_state: default_host_state(),
            service: default_service(),
            restart_timeout_ms: default_restart_timeout_ms(),
        }
    }
}

impl ConfigSection {
    pub fn restart_timeout(&self) -> Duration {
        Duration::from_millis(self.restart_timeout_ms)
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so holders can rely on
/// the invariants checked in `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub app: BTreeMap<String, DesiredApplication>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        app: BTreeMap<String, DesiredApplication>,
    ) -> Self {
        Self { config, app }
    }

    /// Root path with relative values anchored at `base_dir`.
    pub fn resolved_root(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.config.root)
    }

    pub fn resolved_host_state(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.config.host_state)
    }

    /// Applications an operation should act on: the one named `only`, or
    /// every configured application in name order.
    pub fn select_apps(&self, only: Option<&str>) -> Result<Vec<(&str, &DesiredApplication)>> {
        match only {
            Some(name) => self
                .app
                .get_key_value(name)
                .map(|(key, app)| vec![(key.as_str(), app)])
                .ok_or_else(|| {
                    HostdeployError::ConfigError(format!("no [app.{name}] section in config"))
                }),
            None if self.app.is_empty() => Err(HostdeployError::ConfigError(
                "config must contain at least one [app.<name>] section".to_string(),
            )),
            None => Ok(self.app.iter().map(|(key, app)| (key.as_str(), app)).collect()),
        }
    }
}

/// Configuration printed by `hostdeploy sample-config`.
pub fn sample_config() -> RawConfigFile {
    let mut app = BTreeMap::new();
    app.insert(
        "Orchard".to_string(),
        DesiredApplication {
            browse_on_start: true,
            ..DesiredApplication::default()
        },
    );

    RawConfigFile {
        config: ConfigSection::default(),
        app,
    }
}
