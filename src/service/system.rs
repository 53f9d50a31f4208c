// src/service/system.rs

//! Production service controller.
//!
//! On Windows this talks to the service control manager through `sc.exe`;
//! everywhere else it uses `systemctl`. Stop and start are issued without
//! blocking, and `wait_for_status` polls until the target status shows up.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{HostdeployError, Result};
use crate::service::{ServiceController, ServiceFuture, ServiceStatus, WaitOutcome};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct SystemServiceController {
    service_id: String,
    program: PathBuf,
    poll_interval: Duration,
}

impl SystemServiceController {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            program: PathBuf::from(if cfg!(windows) { "sc.exe" } else { "systemctl" }),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Use `program` instead of the platform's service manager binary.
    /// It must accept the same arguments.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(program = ?self.program, ?args, "running service command");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("spawning {:?} {:?}", self.program, args))?;
        Ok(output)
    }

    async fn command(&self, verb: &str) -> Result<()> {
        let args: Vec<&str> = if cfg!(windows) {
            vec![verb, self.service_id.as_str()]
        } else {
            vec![verb, "--no-block", self.service_id.as_str()]
        };

        let output = self.run(&args).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(HostdeployError::ServiceCommand(format!(
                "{} {} exited with {}: {}",
                verb,
                self.service_id,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    async fn query_status(&self) -> Result<ServiceStatus> {
        if cfg!(windows) {
            let output = self.run(&["query", self.service_id.as_str()]).await?;
            Ok(parse_sc_query(&String::from_utf8_lossy(&output.stdout)))
        } else {
            // `is-active` exits non-zero for anything but "active", so only
            // stdout matters here.
            let output = self.run(&["is-active", self.service_id.as_str()]).await?;
            Ok(parse_systemctl_state(&String::from_utf8_lossy(&output.stdout)))
        }
    }
}

impl ServiceController for SystemServiceController {
    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn status(&mut self) -> ServiceFuture<'_, ServiceStatus> {
        Box::pin(async move { self.query_status().await })
    }

    fn stop(&mut self) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.command("stop").await })
    }

    fn start(&mut self) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.command("start").await })
    }

    fn wait_for_status(
        &mut self,
        target: ServiceStatus,
        timeout: Duration,
    ) -> ServiceFuture<'_, WaitOutcome> {
        Box::pin(async move {
            // The first query runs outside the timer so that a zero budget
            // still observes the current status.
            if self.query_status().await? == target {
                return Ok(WaitOutcome::Reached);
            }
            if timeout.is_zero() {
                return Ok(WaitOutcome::TimedOut);
            }

            let poll = async {
                loop {
                    tokio::time::sleep(self.poll_interval).await;
                    if self.query_status().await? == target {
                        return Ok::<(), HostdeployError>(());
                    }
                }
            };

            match tokio::time::timeout(timeout, poll).await {
                Ok(result) => result.map(|()| WaitOutcome::Reached),
                Err(_elapsed) => Ok(WaitOutcome::TimedOut),
            }
        })
    }
}

/// Map `systemctl is-active` output onto [`ServiceStatus`].
pub fn parse_systemctl_state(output: &str) -> ServiceStatus {
    match output.trim() {
        "active" | "reloading" => ServiceStatus::Running,
        "inactive" | "failed" => ServiceStatus::Stopped,
        "activating" => ServiceStatus::StartPending,
        "deactivating" => ServiceStatus::StopPending,
        _ => ServiceStatus::Unknown,
    }
}

/// Map the `STATE` line of `sc.exe query` output onto [`ServiceStatus`].
///
/// ```text
///         STATE              : 4  RUNNING
/// ```
pub fn parse_sc_query(output: &str) -> ServiceStatus {
    let code = output
        .lines()
        .find(|line| line.trim_start().starts_with("STATE"))
        .and_then(|line| line.split_once(':'))
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .and_then(|code| code.parse::<u32>().ok());

    match code {
        Some(1) => ServiceStatus::Stopped,
        Some(2) => ServiceStatus::StartPending,
        Some(3) => ServiceStatus::StopPending,
        Some(4) => ServiceStatus::Running,
        Some(5) => ServiceStatus::ContinuePending,
        Some(6) => ServiceStatus::PausePending,
        Some(7) => ServiceStatus::Paused,
        _ => ServiceStatus::Unknown,
    }
}
