// src/reconcile/apply.rs

//! Side-effecting step: push a [`MutationPlan`] through an administration
//! session.

use tracing::info;

use crate::errors::{HostdeployError, Result};
use crate::host::{AdministrationSession, HostStateReader, LiveApplication};
use crate::reconcile::plan::{MutationPlan, PoolAction};

/// Apply `plan` to `session`.
///
/// `AlreadyConverged` performs no calls at all. `Create` stages the
/// application, the pool and the binding, and only then commits; a failure
/// in any staging step returns before `commit` is reached, leaving the host
/// untouched.
pub fn apply(plan: MutationPlan, session: &mut dyn AdministrationSession) -> Result<LiveApplication> {
    let create = match plan {
        MutationPlan::AlreadyConverged { application, .. } => return Ok(application),
        MutationPlan::Create(create) => create,
    };

    session.add_application(&create.site, &create.app_path, &create.physical_path)?;

    let pool = session.add_or_get_pool(create.pool.name())?;
    match &create.pool {
        PoolAction::Reuse(_) => info!(pool = %pool.name, "reusing existing application pool"),
        PoolAction::Create(_) => info!(pool = %pool.name, "created application pool"),
    }

    session.set_application_pool(&create.site, &create.app_path, &pool.name)?;
    session.commit()?;

    info!(
        site = %create.site,
        app = %create.app_path,
        physical_path = ?create.physical_path,
        pool = %pool.name,
        "application created"
    );

    session
        .state()
        .application(&create.site, &create.app_path)
        .cloned()
        .ok_or_else(|| HostdeployError::ApplicationNotFound {
            site: create.site.clone(),
            path: create.app_path.clone(),
        })
}
