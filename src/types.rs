// src/types.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE: &str = "Default Web Site";
pub const DEFAULT_APP_NAME: &str = "Orchard";
pub const DEFAULT_APP_PATH: &str = r"orchard\src\Orchard.Web";

/// Desired deployment of one web application, as declared in
/// `[app.<name>]`.
///
/// Immutable for the duration of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredApplication {
    /// Site that hosts the application. Must already exist.
    #[serde(default = "default_site")]
    pub site: String,

    /// URL segment (`/<name>`) and application pool name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory relative to the configured root. Either `\` or `/` may be
    /// used as the separator.
    #[serde(default = "default_path")]
    pub path: String,

    /// Open the application in the default browser after configuring it.
    #[serde(default)]
    pub browse_on_start: bool,
}

fn default_site() -> String {
    DEFAULT_SITE.to_string()
}

fn default_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_path() -> String {
    DEFAULT_APP_PATH.to_string()
}

impl Default for DesiredApplication {
    fn default() -> Self {
        Self {
            site: default_site(),
            name: default_name(),
            path: default_path(),
            browse_on_start: false,
        }
    }
}

impl DesiredApplication {
    /// Site-relative path of the application, e.g. `/Orchard`.
    pub fn app_path(&self) -> String {
        format!("/{}", self.name)
    }

    /// Absolute location of the application's files under `root`.
    pub fn physical_path(&self, root: &Path) -> PathBuf {
        root.join(normalise_relative_path(&self.path))
    }
}

/// Split a relative path on either separator so that Windows-style paths
/// from shared configs resolve on every platform.
///
/// `relative` must not be absolute (see [`looks_absolute`]); a drive prefix
/// such as `C:\x` would come out drive-relative. Config validation rejects
/// those before they get here.
pub fn normalise_relative_path(relative: &str) -> PathBuf {
    let mut normalised = PathBuf::new();
    for component in relative.split(['\\', '/']).filter(|c| !c.is_empty()) {
        normalised.push(component);
    }
    normalised
}

/// True for rooted paths on either platform: `/x`, `\x`, `\\server\share`
/// and drive paths like `C:\x` or `C:x`.
pub fn looks_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with(['/', '\\'])
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}
