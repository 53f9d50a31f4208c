// src/host/session.rs

//! Administration sessions.
//!
//! A session owns a working copy of the host snapshot. Mutations are staged
//! on that copy and become visible to the host only when [`commit`] is
//! called; dropping a session without committing discards them.
//!
//! [`commit`]: AdministrationSession::commit

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::errors::{HostdeployError, Result};
use crate::fs::FileSystem;
use crate::host::model::{ApplicationPool, HostState, LiveApplication};
use crate::host::HostStateReader;

/// Mutating access to the host administration surface.
///
/// Production code uses [`FileAdministrationSession`]; tests can provide an
/// implementation that records every call.
pub trait AdministrationSession {
    /// Current view of the host, including staged changes.
    fn state(&self) -> &HostState;

    fn add_application(
        &mut self,
        site: &str,
        path: &str,
        physical_path: &Path,
    ) -> Result<LiveApplication>;

    /// Reuse the pool called `name` if it exists, otherwise create it.
    fn add_or_get_pool(&mut self, name: &str) -> Result<ApplicationPool>;

    fn set_application_pool(&mut self, site: &str, path: &str, pool: &str) -> Result<()>;

    /// Drop and restart the pool's worker process. Takes effect immediately;
    /// it is not part of the staged changes.
    fn recycle_pool(&mut self, name: &str) -> Result<()>;

    /// Persist every staged change in one step.
    fn commit(&mut self) -> Result<()>;
}

/// Administration surface backed by a TOML host-state document.
///
/// `commit` writes the whole document to a sibling temporary file and renames
/// it over the original, so readers never observe a half-written state.
#[derive(Debug)]
pub struct FileAdministrationSession<F: FileSystem> {
    path: PathBuf,
    fs: F,
    committed: HostState,
    working: HostState,
}

impl<F: FileSystem> FileAdministrationSession<F> {
    /// Load the host-state document at `path` and open a session over it.
    pub fn open(path: impl AsRef<Path>, fs: F) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !fs.exists(&path) {
            return Err(HostdeployError::ConfigError(format!(
                "host state document {:?} does not exist",
                path
            )));
        }

        let contents = fs.read_to_string(&path)?;
        let committed: HostState = toml::from_str(&contents)?;

        debug!(
            path = ?path,
            sites = committed.sites.len(),
            pools = committed.pools.len(),
            "opened administration session"
        );

        Ok(Self {
            path,
            fs,
            working: committed.clone(),
            committed,
        })
    }

    /// Whether there are staged changes that have not been committed.
    pub fn has_pending_changes(&self) -> bool {
        self.working != self.committed
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("host-state"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<F: FileSystem> AdministrationSession for FileAdministrationSession<F> {
    fn state(&self) -> &HostState {
        &self.working
    }

    fn add_application(
        &mut self,
        site: &str,
        path: &str,
        physical_path: &Path,
    ) -> Result<LiveApplication> {
        let app = self.working.add_application(site, path, physical_path)?;
        debug!(site, path, physical_path = ?physical_path, "staged application");
        Ok(app.clone())
    }

    fn add_or_get_pool(&mut self, name: &str) -> Result<ApplicationPool> {
        let (pool, created) = self.working.add_or_get_pool(name);
        debug!(pool = %pool.name, created, "resolved application pool");
        Ok(pool)
    }

    fn set_application_pool(&mut self, site: &str, path: &str, pool: &str) -> Result<()> {
        self.working.set_application_pool(site, path, pool)?;
        debug!(site, path, pool, "staged pool binding");
        Ok(())
    }

    fn recycle_pool(&mut self, name: &str) -> Result<()> {
        let pool = self
            .working
            .pool(name)
            .ok_or_else(|| HostdeployError::PoolNotFound(name.to_string()))?;

        let Some(command) = pool.recycle_command.as_deref() else {
            return Err(HostdeployError::ServiceCommand(format!(
                "pool {name} declares no recycle_command"
            )));
        };

        info!(pool = %name, cmd = %command, "recycling application pool");
        run_shell(command)
    }

    fn commit(&mut self) -> Result<()> {
        let serialized = toml::to_string(&self.working)?;
        let temp = self.temp_path();

        self.fs.write(&temp, serialized.as_bytes())?;
        self.fs.rename(&temp, &self.path)?;
        self.committed = self.working.clone();

        info!(path = ?self.path, "committed host state");
        Ok(())
    }
}

impl<F: FileSystem> Drop for FileAdministrationSession<F> {
    fn drop(&mut self) {
        if self.has_pending_changes() {
            warn!(path = ?self.path, "discarding uncommitted host state changes");
        }
        debug!(path = ?self.path, "closed administration session");
    }
}

fn run_shell(command: &str) -> Result<()> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    let output = cmd
        .output()
        .with_context(|| format!("spawning recycle command '{}'", command))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(HostdeployError::ServiceCommand(format!(
            "'{}' exited with {}: {}",
            command,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
