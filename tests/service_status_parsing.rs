use hostdeploy::service::system::{parse_sc_query, parse_systemctl_state};
use hostdeploy::service::ServiceStatus;

#[test]
fn systemctl_states() {
    assert_eq!(parse_systemctl_state("active\n"), ServiceStatus::Running);
    assert_eq!(parse_systemctl_state("inactive\n"), ServiceStatus::Stopped);
    assert_eq!(parse_systemctl_state("failed"), ServiceStatus::Stopped);
    assert_eq!(parse_systemctl_state("activating"), ServiceStatus::StartPending);
    assert_eq!(parse_systemctl_state("deactivating"), ServiceStatus::StopPending);
    assert_eq!(parse_systemctl_state(""), ServiceStatus::Unknown);
}

#[test]
fn sc_query_states() {
    let running = "
SERVICE_NAME: W3SVC
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 4  RUNNING
                                (STOPPABLE, PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXIT_CODE    : 0  (0x0)
";
    let stop_pending = "        STATE              : 3  STOP_PENDING\n";

    assert_eq!(parse_sc_query(running), ServiceStatus::Running);
    assert_eq!(parse_sc_query(stop_pending), ServiceStatus::StopPending);
    assert_eq!(parse_sc_query("[SC] OpenService FAILED 1060"), ServiceStatus::Unknown);
}
