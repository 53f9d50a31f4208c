// tests/restart_deadline.rs

mod common;
use crate::common::init_tracing;

use std::time::Duration;

use hostdeploy::errors::HostdeployError;
use hostdeploy::service::{restart, RestartPhase, ServiceStatus};
use hostdeploy_test_utils::fake_service::{FakeServiceController, ServiceCall, ServiceTimings};

const TOTAL: Duration = Duration::from_millis(15_000);

#[tokio::test(start_paused = true)]
async fn start_phase_gets_the_remaining_budget() {
    init_tracing();

    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_settle: Duration::from_millis(4_000),
            ..ServiceTimings::default()
        },
    );

    let report = restart(&mut controller, TOTAL).await.unwrap();

    assert_eq!(report.initial_status, ServiceStatus::Running);
    assert_eq!(report.stop_elapsed, Duration::from_millis(4_000));
    assert_eq!(report.start_timeout, Duration::from_millis(11_000));
    assert_eq!(
        controller.wait_timeouts(),
        vec![TOTAL, Duration::from_millis(11_000)]
    );
    assert_eq!(controller.current_status(), ServiceStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn slow_stop_command_counts_against_the_budget() {
    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_command: Duration::from_millis(1_500),
            stop_settle: Duration::from_millis(2_500),
            ..ServiceTimings::default()
        },
    );

    let report = restart(&mut controller, TOTAL).await.unwrap();

    assert_eq!(report.start_timeout, Duration::from_millis(11_000));
}

#[tokio::test(start_paused = true)]
async fn commands_are_issued_in_order() {
    let mut controller = FakeServiceController::new(ServiceStatus::Stopped, ServiceTimings::default());

    restart(&mut controller, TOTAL).await.unwrap();

    assert_eq!(
        controller.calls(),
        &[
            ServiceCall::Status,
            ServiceCall::Stop,
            ServiceCall::WaitForStatus {
                target: ServiceStatus::Stopped,
                timeout: TOTAL,
            },
            ServiceCall::Start,
            ServiceCall::WaitForStatus {
                target: ServiceStatus::Running,
                timeout: TOTAL,
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_still_sends_start_with_zero_timeout() {
    init_tracing();

    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_command: Duration::from_millis(16_000),
            ..ServiceTimings::default()
        },
    );

    let report = restart(&mut controller, TOTAL).await.unwrap();

    assert!(controller.start_sent());
    assert_eq!(report.start_timeout, Duration::ZERO);
    assert_eq!(controller.wait_timeouts(), vec![TOTAL, Duration::ZERO]);
}

#[tokio::test(start_paused = true)]
async fn stop_phase_may_use_the_whole_budget() {
    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_settle: TOTAL,
            ..ServiceTimings::default()
        },
    );

    let report = restart(&mut controller, TOTAL).await.unwrap();

    assert!(controller.start_sent());
    assert_eq!(report.start_timeout, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_with_slow_start_times_out_in_start_phase() {
    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_settle: TOTAL,
            start_settle: Duration::from_millis(1),
            ..ServiceTimings::default()
        },
    );

    let result = restart(&mut controller, TOTAL).await;

    match result {
        Err(HostdeployError::ServiceTimeout { phase, timeout }) => {
            assert_eq!(phase, RestartPhase::Start);
            assert_eq!(timeout, Duration::ZERO);
        }
        other => panic!("Expected ServiceTimeout, got: {:?}", other),
    }
    assert!(controller.start_sent());
}

#[tokio::test(start_paused = true)]
async fn stop_timeout_aborts_before_start() {
    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_settle: Duration::from_millis(20_000),
            ..ServiceTimings::default()
        },
    );

    let result = restart(&mut controller, TOTAL).await;

    match result {
        Err(HostdeployError::ServiceTimeout { phase, timeout }) => {
            assert_eq!(phase, RestartPhase::Stop);
            assert_eq!(timeout, TOTAL);
        }
        other => panic!("Expected ServiceTimeout, got: {:?}", other),
    }
    assert!(!controller.start_sent());
}

#[tokio::test(start_paused = true)]
async fn start_timeout_reports_start_phase() {
    let mut controller = FakeServiceController::new(
        ServiceStatus::Running,
        ServiceTimings {
            stop_settle: Duration::from_millis(5_000),
            start_settle: Duration::from_millis(12_000),
            ..ServiceTimings::default()
        },
    );

    let result = restart(&mut controller, TOTAL).await;

    match result {
        Err(HostdeployError::ServiceTimeout { phase, timeout }) => {
            assert_eq!(phase, RestartPhase::Start);
            assert_eq!(timeout, Duration::from_millis(10_000));
        }
        other => panic!("Expected ServiceTimeout, got: {:?}", other),
    }
}
