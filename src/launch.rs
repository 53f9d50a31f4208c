// src/launch.rs

//! Opening a configured application in the default browser.
//!
//! Launching is best-effort: callers log failures and carry on.

use std::process::Command;

use anyhow::{anyhow, Context};
use tracing::{info, warn};
use url::Url;

use crate::errors::{HostdeployError, Result};
use crate::host::{Binding, LiveSite};

/// Something that can open a URL for the operator.
pub trait Launcher {
    fn open_url(&self, url: &Url) -> Result<()>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &Url) -> Result<()> {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            // The empty string is the window title `start` expects first.
            c.args(["/C", "start", ""]).arg(url.as_str());
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url.as_str());
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url.as_str());
            c
        };

        cmd.spawn()
            .with_context(|| format!("spawning browser for {}", url))?;
        Ok(())
    }
}

/// `protocol://localhost:port/<app_path>` for a site binding.
///
/// The binding's host header is ignored; the application is always browsed
/// through `localhost`.
pub fn launch_url(binding: &Binding, app_path: &str) -> Result<Url> {
    let base = format!("{}://localhost:{}", binding.protocol, binding.port);
    let mut url = Url::parse(&base)
        .map_err(|e| HostdeployError::Other(anyhow!("invalid binding URL {}: {}", base, e)))?;
    url.set_path(app_path);
    Ok(url)
}

/// Open `app_path` on `site`'s first binding. Never fails: problems are
/// logged at `warn` and swallowed.
pub fn browse(launcher: &dyn Launcher, site: &LiveSite, app_path: &str) {
    let Some(binding) = site.first_binding() else {
        warn!(site = %site.name, "site has no bindings; not launching browser");
        return;
    };

    let url = match launch_url(binding, app_path) {
        Ok(url) => url,
        Err(err) => {
            warn!(site = %site.name, error = %err, "could not build launch URL");
            return;
        }
    };

    match launcher.open_url(&url) {
        Ok(()) => info!(url = %url, "opened application"),
        Err(err) => warn!(url = %url, error = %err, "failed to open application"),
    }
}
