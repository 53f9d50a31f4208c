use std::path::{Path, PathBuf};

use anyhow::anyhow;
use hostdeploy::errors::{HostdeployError, Result};
use hostdeploy::host::{AdministrationSession, ApplicationPool, HostState, HostStateReader, LiveApplication};

/// One call made against a [`RecordingSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    AddApplication {
        site: String,
        path: String,
        physical_path: PathBuf,
    },
    AddOrGetPool {
        name: String,
        created: bool,
    },
    SetApplicationPool {
        site: String,
        path: String,
        pool: String,
    },
    RecyclePool(String),
    Commit,
}

/// An administration session that:
/// - applies mutations to an in-memory `HostState`
/// - records every call in order
/// - can be told to fail on commit.
pub struct RecordingSession {
    state: HostState,
    calls: Vec<SessionCall>,
    fail_commit: bool,
}

impl RecordingSession {
    pub fn new(state: HostState) -> Self {
        Self {
            state,
            calls: Vec::new(),
            fail_commit: false,
        }
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn calls(&self) -> &[SessionCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn commit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SessionCall::Commit))
            .count()
    }

    pub fn created_pools(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SessionCall::AddOrGetPool { name, created: true } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn created_applications(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SessionCall::AddApplication { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

impl AdministrationSession for RecordingSession {
    fn state(&self) -> &HostState {
        &self.state
    }

    fn add_application(
        &mut self,
        site: &str,
        path: &str,
        physical_path: &Path,
    ) -> Result<LiveApplication> {
        self.calls.push(SessionCall::AddApplication {
            site: site.to_string(),
            path: path.to_string(),
            physical_path: physical_path.to_path_buf(),
        });
        self.state
            .add_application(site, path, physical_path)
            .map(|app| app.clone())
    }

    fn add_or_get_pool(&mut self, name: &str) -> Result<ApplicationPool> {
        let (pool, created) = self.state.add_or_get_pool(name);
        self.calls.push(SessionCall::AddOrGetPool {
            name: name.to_string(),
            created,
        });
        Ok(pool)
    }

    fn set_application_pool(&mut self, site: &str, path: &str, pool: &str) -> Result<()> {
        self.calls.push(SessionCall::SetApplicationPool {
            site: site.to_string(),
            path: path.to_string(),
            pool: pool.to_string(),
        });
        self.state.set_application_pool(site, path, pool)
    }

    fn recycle_pool(&mut self, name: &str) -> Result<()> {
        if self.state.pool(name).is_none() {
            return Err(HostdeployError::PoolNotFound(name.to_string()));
        }
        self.calls.push(SessionCall::RecyclePool(name.to_string()));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.fail_commit {
            return Err(HostdeployError::Other(anyhow!("commit rejected by test session")));
        }
        self.calls.push(SessionCall::Commit);
        Ok(())
    }
}
