// src/reconcile/plan.rs

//! Pure planning step: desired application + snapshot -> mutation plan.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{HostdeployError, Result};
use crate::fs::FileSystem;
use crate::host::{HostStateReader, LiveApplication};
use crate::types::DesiredApplication;

/// How the application pool is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolAction {
    /// A pool with this name already exists and will be bound as-is, whoever
    /// created it.
    Reuse(String),
    /// No pool with this name exists; one will be created.
    Create(String),
}

impl PoolAction {
    pub fn name(&self) -> &str {
        match self {
            PoolAction::Reuse(name) | PoolAction::Create(name) => name,
        }
    }
}

/// Mutations needed to create a missing application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplication {
    pub site: String,
    /// Site-relative path, e.g. `/Orchard`.
    pub app_path: String,
    pub physical_path: PathBuf,
    pub pool: PoolAction,
}

/// Result of comparing desired and live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPlan {
    /// The application already exists; nothing is written.
    AlreadyConverged {
        site: String,
        application: LiveApplication,
    },
    /// Create the application, resolve its pool, bind, then commit once.
    Create(CreateApplication),
}

impl MutationPlan {
    pub fn is_noop(&self) -> bool {
        matches!(self, MutationPlan::AlreadyConverged { .. })
    }

    pub fn site(&self) -> &str {
        match self {
            MutationPlan::AlreadyConverged { site, .. } => site,
            MutationPlan::Create(create) => &create.site,
        }
    }
}

impl fmt::Display for MutationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationPlan::AlreadyConverged { site, application } => write!(
                f,
                "{}{}: already present (pool {}), no changes",
                site, application.path, application.application_pool_name
            ),
            MutationPlan::Create(create) => {
                writeln!(
                    f,
                    "{}{}: create application -> {}",
                    create.site,
                    create.app_path,
                    create.physical_path.display()
                )?;
                match &create.pool {
                    PoolAction::Reuse(name) => writeln!(f, "  reuse application pool {name}")?,
                    PoolAction::Create(name) => writeln!(f, "  create application pool {name}")?,
                }
                write!(f, "  bind {} to pool {}", create.app_path, create.pool.name())
            }
        }
    }
}

/// Compare `desired` with `snapshot` and decide what to change.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. the site must exist (the filesystem is not consulted otherwise);
/// 2. an existing application at `/<name>` short-circuits to
///    [`MutationPlan::AlreadyConverged`];
/// 3. the physical directory must exist.
///
/// Nothing here writes anywhere.
pub fn reconcile_plan<R>(
    desired: &DesiredApplication,
    snapshot: &R,
    root: &Path,
    fs: &dyn FileSystem,
) -> Result<MutationPlan>
where
    R: HostStateReader + ?Sized,
{
    let site = snapshot
        .site(&desired.site)
        .ok_or_else(|| HostdeployError::SiteNotFound(desired.site.clone()))?;

    let app_path = desired.app_path();
    let physical_path = desired.physical_path(root);

    if let Some(existing) = site.application(&app_path) {
        debug!(site = %site.name, app = %app_path, "application already present");
        return Ok(MutationPlan::AlreadyConverged {
            site: site.name.clone(),
            application: existing.clone(),
        });
    }

    if !fs.is_dir(&physical_path) {
        return Err(HostdeployError::PhysicalPathMissing {
            relative: desired.path.clone(),
            physical: physical_path,
        });
    }

    let pool = match snapshot.pool(&desired.name) {
        Some(existing) => PoolAction::Reuse(existing.name.clone()),
        None => PoolAction::Create(desired.name.clone()),
    };

    Ok(MutationPlan::Create(CreateApplication {
        site: site.name.clone(),
        app_path,
        physical_path,
        pool,
    }))
}
