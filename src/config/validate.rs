// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HostdeployError, Result};
use crate::types::looks_absolute;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::HostdeployError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.app))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_apps(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.restart_timeout_ms == 0 {
        return Err(HostdeployError::ConfigError(
            "[config].restart_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.config.service.trim().is_empty() {
        return Err(HostdeployError::ConfigError(
            "[config].service must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_apps(cfg: &RawConfigFile) -> Result<()> {
    for (key, app) in cfg.app.iter() {
        if app.site.trim().is_empty() {
            return Err(HostdeployError::ConfigError(format!(
                "app '{}' has an empty `site`",
                key
            )));
        }
        if app.name.trim().is_empty() {
            return Err(HostdeployError::ConfigError(format!(
                "app '{}' has an empty `name`",
                key
            )));
        }
        if app.name.contains(['/', '\\']) {
            return Err(HostdeployError::ConfigError(format!(
                "app '{}' has name '{}'; `name` is a single URL segment and cannot contain path separators",
                key, app.name
            )));
        }
        if looks_absolute(&app.path) {
            return Err(HostdeployError::ConfigError(format!(
                "app '{}' has path '{}'; `path` is resolved under [config].root and must be relative",
                key, app.path
            )));
        }
    }
    Ok(())
}
