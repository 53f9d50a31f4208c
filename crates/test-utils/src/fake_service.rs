use std::time::Duration;

use hostdeploy::service::{ServiceController, ServiceFuture, ServiceStatus, WaitOutcome};

/// One call made against a [`FakeServiceController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Status,
    Stop,
    Start,
    WaitForStatus {
        target: ServiceStatus,
        timeout: Duration,
    },
}

/// How long the fake service takes to do each thing.
///
/// `*_command` delays model a slow `stop`/`start` call; `*_settle` delays are
/// how long after the command the target status shows up. All waiting uses
/// `tokio::time::sleep`, so tests should run with a paused clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceTimings {
    pub stop_command: Duration,
    pub stop_settle: Duration,
    pub start_command: Duration,
    pub start_settle: Duration,
}

/// A fake service controller that:
/// - records every call (including the timeout passed to each wait)
/// - reaches the target status after the configured settle delay, or
///   reports `TimedOut` if the timeout is shorter.
pub struct FakeServiceController {
    service_id: String,
    status: ServiceStatus,
    timings: ServiceTimings,
    calls: Vec<ServiceCall>,
}

impl FakeServiceController {
    pub fn new(initial: ServiceStatus, timings: ServiceTimings) -> Self {
        Self {
            service_id: "fake-web".to_string(),
            status: initial,
            timings,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[ServiceCall] {
        &self.calls
    }

    pub fn current_status(&self) -> ServiceStatus {
        self.status
    }

    /// Timeouts passed to `wait_for_status`, in call order.
    pub fn wait_timeouts(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ServiceCall::WaitForStatus { timeout, .. } => Some(*timeout),
                _ => None,
            })
            .collect()
    }

    pub fn start_sent(&self) -> bool {
        self.calls.contains(&ServiceCall::Start)
    }
}

impl ServiceController for FakeServiceController {
    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn status(&mut self) -> ServiceFuture<'_, ServiceStatus> {
        self.calls.push(ServiceCall::Status);
        let status = self.status;
        Box::pin(async move { Ok(status) })
    }

    fn stop(&mut self) -> ServiceFuture<'_, ()> {
        self.calls.push(ServiceCall::Stop);
        self.status = ServiceStatus::StopPending;
        let delay = self.timings.stop_command;
        Box::pin(async move {
            pause(delay).await;
            Ok(())
        })
    }

    fn start(&mut self) -> ServiceFuture<'_, ()> {
        self.calls.push(ServiceCall::Start);
        self.status = ServiceStatus::StartPending;
        let delay = self.timings.start_command;
        Box::pin(async move {
            pause(delay).await;
            Ok(())
        })
    }

    fn wait_for_status(
        &mut self,
        target: ServiceStatus,
        timeout: Duration,
    ) -> ServiceFuture<'_, WaitOutcome> {
        self.calls.push(ServiceCall::WaitForStatus { target, timeout });

        let settle = match target {
            ServiceStatus::Stopped => self.timings.stop_settle,
            _ => self.timings.start_settle,
        };

        Box::pin(async move {
            if settle <= timeout {
                pause(settle).await;
                self.status = target;
                Ok(WaitOutcome::Reached)
            } else {
                pause(timeout).await;
                Ok(WaitOutcome::TimedOut)
            }
        })
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
