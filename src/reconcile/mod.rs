// src/reconcile/mod.rs

//! Reconciliation of a desired application against the live host.
//!
//! - [`plan`] is pure: it reads a snapshot and returns a [`MutationPlan`].
//! - [`apply`] pushes a plan through an [`AdministrationSession`].
//!
//! [`configure`] runs both, then optionally opens the application.

pub mod apply;
pub mod plan;

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::host::{AdministrationSession, HostStateReader, LiveApplication};
use crate::launch::{browse, Launcher};
use crate::types::DesiredApplication;

pub use apply::apply;
pub use plan::{reconcile_plan, CreateApplication, MutationPlan, PoolAction};

/// Converge `desired` into the host behind `session`.
///
/// Returns the live application, whether it was just created or already
/// existed. Calling this twice with unchanged live state performs no writes
/// on the second call.
pub fn configure(
    desired: &DesiredApplication,
    session: &mut dyn AdministrationSession,
    root: &Path,
    fs: &dyn FileSystem,
    launcher: &dyn Launcher,
) -> Result<LiveApplication> {
    let plan = reconcile_plan(desired, session.state(), root, fs)?;
    let site = plan.site().to_string();

    if plan.is_noop() {
        info!(site = %site, app = %desired.app_path(), "already converged");
    }

    let application = apply(plan, session)?;

    if desired.browse_on_start {
        if let Some(live_site) = session.state().site(&site) {
            browse(launcher, live_site, &application.path);
        }
    }

    Ok(application)
}
