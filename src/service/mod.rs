// src/service/mod.rs

//! Service lifecycle: restarting the host service and recycling pools.
//!
//! - [`restart`] drives stop -> start under one shared deadline.
//! - [`recycle`] recycles the pool that owns a configured application.
//! - [`system`] is the production [`ServiceController`] (`systemctl` or
//!   `sc.exe`).
//!
//! The controller trait returns boxed futures so that tests can swap in a
//! fake controller that never touches a real service.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::errors::Result;

pub mod recycle;
pub mod restart;
pub mod system;

pub use recycle::recycle_pool;
pub use restart::{remaining_budget, restart, RestartReport};
pub use system::SystemServiceController;

/// Boxed future returned by [`ServiceController`] methods.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Observed state of the host service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Running,
    Stopped,
    StartPending,
    StopPending,
    ContinuePending,
    PausePending,
    Paused,
    Unknown,
}

/// Result of waiting for a target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Reached,
    TimedOut,
}

/// The two halves of a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPhase {
    Stop,
    Start,
}

impl fmt::Display for RestartPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPhase::Stop => f.write_str("stop"),
            RestartPhase::Start => f.write_str("start"),
        }
    }
}

/// Commands and status queries against one named service.
pub trait ServiceController: Send {
    fn service_id(&self) -> &str;

    fn status(&mut self) -> ServiceFuture<'_, ServiceStatus>;

    /// Ask the service to stop. Does not wait for it to do so.
    fn stop(&mut self) -> ServiceFuture<'_, ()>;

    /// Ask the service to start. Does not wait for it to do so.
    fn start(&mut self) -> ServiceFuture<'_, ()>;

    /// Wait until the service reports `target`, or until `timeout` elapses.
    ///
    /// A zero timeout must still check once and then return promptly.
    fn wait_for_status(
        &mut self,
        target: ServiceStatus,
        timeout: Duration,
    ) -> ServiceFuture<'_, WaitOutcome>;
}
