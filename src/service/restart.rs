// src/service/restart.rs

//! Two-phase restart under a single deadline.
//!
//! The stop phase may use the whole budget. The start phase gets whatever is
//! left, measured from just before `stop` was issued to just before `start`
//! is issued, clamped at zero. `start` is always sent once the service has
//! stopped, even with nothing left on the clock.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{HostdeployError, Result};
use crate::service::{RestartPhase, ServiceController, ServiceStatus, WaitOutcome};

/// Timing of a completed restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartReport {
    pub initial_status: ServiceStatus,
    /// Time from issuing `stop` to issuing `start`.
    pub stop_elapsed: Duration,
    /// Wait timeout handed to the start phase.
    pub start_timeout: Duration,
}

/// Budget left for the start phase after `elapsed` was spent stopping.
pub fn remaining_budget(total: Duration, elapsed: Duration) -> Duration {
    total.saturating_sub(elapsed)
}

/// Stop then start the service behind `controller`, sharing `total_timeout`
/// between both phases.
///
/// A timeout in either phase ends the restart with
/// [`HostdeployError::ServiceTimeout`]; nothing is retried or killed.
pub async fn restart(
    controller: &mut dyn ServiceController,
    total_timeout: Duration,
) -> Result<RestartReport> {
    let service = controller.service_id().to_string();

    let initial_status = match controller.status().await {
        Ok(status) => status,
        Err(err) => {
            warn!(service = %service, error = %err, "could not read service status");
            ServiceStatus::Unknown
        }
    };
    info!(service = %service, status = ?initial_status, timeout = ?total_timeout, "restarting service");

    let t0 = Instant::now();
    controller.stop().await?;
    wait_phase(controller, RestartPhase::Stop, ServiceStatus::Stopped, total_timeout).await?;

    let t1 = Instant::now();
    let stop_elapsed = t1.duration_since(t0);
    let start_timeout = remaining_budget(total_timeout, stop_elapsed);
    debug!(service = %service, ?stop_elapsed, ?start_timeout, "service stopped");

    if start_timeout.is_zero() {
        warn!(service = %service, "stop phase used the whole budget; starting with no wait time left");
    }

    controller.start().await?;
    wait_phase(controller, RestartPhase::Start, ServiceStatus::Running, start_timeout).await?;

    info!(service = %service, elapsed = ?t0.elapsed(), "service restarted");

    Ok(RestartReport {
        initial_status,
        stop_elapsed,
        start_timeout,
    })
}

async fn wait_phase(
    controller: &mut dyn ServiceController,
    phase: RestartPhase,
    target: ServiceStatus,
    timeout: Duration,
) -> Result<()> {
    match controller.wait_for_status(target, timeout).await? {
        WaitOutcome::Reached => Ok(()),
        WaitOutcome::TimedOut => Err(HostdeployError::ServiceTimeout { phase, timeout }),
    }
}
