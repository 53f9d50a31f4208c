// src/host/model.rs

//! Snapshot of the web-server host as seen through the administration
//! surface.
//!
//! The same types double as the on-disk host-state document used by
//! [`FileAdministrationSession`](crate::host::FileAdministrationSession):
//!
//! ```toml
//! [[site]]
//! name = "Default Web Site"
//! bindings = [{ protocol = "http", host = "*", port = 80 }]
//!
//! [[site.application]]
//! path = "/"
//! pool = "DefaultAppPool"
//! virtual_directories = [{ path = "/", physical_path = "/var/www" }]
//!
//! [[pool]]
//! name = "DefaultAppPool"
//! ```

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::errors::{HostdeployError, Result};

/// Whole administration snapshot: every site and every application pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostState {
    #[serde(default, rename = "site")]
    pub sites: Vec<LiveSite>,

    #[serde(default, rename = "pool")]
    pub pools: Vec<ApplicationPool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSite {
    pub name: String,

    /// Declared network bindings, in declaration order.
    #[serde(default)]
    pub bindings: Vec<Binding>,

    #[serde(default, rename = "application")]
    pub applications: Vec<LiveApplication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub protocol: String,

    /// Host header; empty or `*` means any host.
    #[serde(default)]
    pub host: String,

    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveApplication {
    /// Site-relative path, e.g. `/Orchard`.
    pub path: String,

    #[serde(rename = "pool")]
    pub application_pool_name: String,

    #[serde(default)]
    pub virtual_directories: Vec<VirtualDirectory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDirectory {
    pub path: String,
    pub physical_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPool {
    pub name: String,

    /// Shell command that drops and restarts the pool's worker process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycle_command: Option<String>,
}

impl LiveApplication {
    /// Physical path of the root virtual directory (`/`).
    pub fn physical_path(&self) -> Option<&Path> {
        self.virtual_directories
            .iter()
            .find(|vdir| vdir.path == "/")
            .map(|vdir| vdir.physical_path.as_path())
    }
}

impl LiveSite {
    pub fn application(&self, path: &str) -> Option<&LiveApplication> {
        self.applications.iter().find(|app| app.path == path)
    }

    /// The first declared binding, used to build launch URLs.
    pub fn first_binding(&self) -> Option<&Binding> {
        self.bindings.first()
    }
}

impl ApplicationPool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recycle_command: None,
        }
    }
}

/// Mutations applied to a working copy of the snapshot.
///
/// Sessions stage changes through these and only persist them on commit.
impl HostState {
    pub fn site_mut(&mut self, name: &str) -> Option<&mut LiveSite> {
        self.sites.iter_mut().find(|site| site.name == name)
    }

    /// Add an application at `path` whose root virtual directory points at
    /// `physical_path`. The pool binding is left empty until
    /// [`HostState::set_application_pool`] is called.
    pub fn add_application(
        &mut self,
        site: &str,
        path: &str,
        physical_path: &Path,
    ) -> Result<&LiveApplication> {
        let live_site = self
            .site_mut(site)
            .ok_or_else(|| HostdeployError::SiteNotFound(site.to_string()))?;

        if live_site.application(path).is_some() {
            return Err(HostdeployError::Other(anyhow!(
                "application {path} already exists in site {site}"
            )));
        }

        live_site.applications.push(LiveApplication {
            path: path.to_string(),
            application_pool_name: String::new(),
            virtual_directories: vec![VirtualDirectory {
                path: "/".to_string(),
                physical_path: physical_path.to_path_buf(),
            }],
        });

        let index = live_site.applications.len() - 1;
        Ok(&live_site.applications[index])
    }

    /// Return the pool called `name`, creating it first if it is absent.
    /// The second element is `true` when the pool was created.
    pub fn add_or_get_pool(&mut self, name: &str) -> (ApplicationPool, bool) {
        if let Some(existing) = self.pools.iter().find(|pool| pool.name == name) {
            return (existing.clone(), false);
        }
        let pool = ApplicationPool::new(name);
        self.pools.push(pool.clone());
        (pool, true)
    }

    pub fn set_application_pool(&mut self, site: &str, path: &str, pool: &str) -> Result<()> {
        if !self.pools.iter().any(|candidate| candidate.name == pool) {
            return Err(HostdeployError::PoolNotFound(pool.to_string()));
        }

        let live_site = self
            .site_mut(site)
            .ok_or_else(|| HostdeployError::SiteNotFound(site.to_string()))?;
        let app = live_site
            .applications
            .iter_mut()
            .find(|app| app.path == path)
            .ok_or_else(|| HostdeployError::ApplicationNotFound {
                site: site.to_string(),
                path: path.to_string(),
            })?;

        app.application_pool_name = pool.to_string();
        Ok(())
    }
}
