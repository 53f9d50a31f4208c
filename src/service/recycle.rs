// src/service/recycle.rs

use tracing::info;

use crate::errors::{HostdeployError, Result};
use crate::host::{AdministrationSession, HostStateReader};
use crate::types::DesiredApplication;

/// Recycle the application pool that owns `desired`'s application.
///
/// Never creates anything: a missing site, application or pool is an error.
/// Returns the name of the recycled pool.
pub fn recycle_pool(
    desired: &DesiredApplication,
    session: &mut dyn AdministrationSession,
) -> Result<String> {
    let state = session.state();
    let app_path = desired.app_path();

    let site = state
        .site(&desired.site)
        .ok_or_else(|| HostdeployError::SiteNotFound(desired.site.clone()))?;

    let app = site
        .application(&app_path)
        .ok_or_else(|| HostdeployError::ApplicationNotFound {
            site: desired.site.clone(),
            path: app_path.clone(),
        })?;

    let pool_name = state
        .pool(&app.application_pool_name)
        .map(|pool| pool.name.clone())
        .ok_or_else(|| HostdeployError::PoolNotFound(app.application_pool_name.clone()))?;

    session.recycle_pool(&pool_name)?;

    info!(site = %desired.site, app = %app_path, pool = %pool_name, "recycled application pool");
    Ok(pool_name)
}
