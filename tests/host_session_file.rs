// tests/host_session_file.rs

mod common;
use crate::common::{fs_with_orchard_dir, init_tracing, orchard_dir, root, SITE};

use std::path::PathBuf;

use hostdeploy::errors::HostdeployError;
use hostdeploy::fs::{FileSystem, RealFileSystem};
use hostdeploy::host::{
    AdministrationSession, FileAdministrationSession, HostState, HostStateReader,
};
use hostdeploy::reconcile::configure;
use hostdeploy_test_utils::builders::DesiredApplicationBuilder;
use hostdeploy_test_utils::recording_launcher::RecordingLauncher;

const HOST_STATE: &str = r#"
[[site]]
name = "Default Web Site"
bindings = [{ protocol = "http", host = "*", port = 80 }]

[[site.application]]
path = "/"
pool = "DefaultAppPool"
virtual_directories = [{ path = "/", physical_path = "/srv/www/default" }]

[[pool]]
name = "DefaultAppPool"
"#;

fn host_state_path() -> PathBuf {
    PathBuf::from("/etc/hostdeploy/host-state.toml")
}

#[test]
fn opens_and_reads_snapshot() {
    let fs = fs_with_orchard_dir();
    fs.add_file(host_state_path(), HOST_STATE);

    let session = FileAdministrationSession::open(host_state_path(), fs).unwrap();

    let site = session.state().site(SITE).unwrap();
    assert_eq!(site.first_binding().unwrap().port, 80);
    assert_eq!(
        session.state().application(SITE, "/").unwrap().application_pool_name,
        "DefaultAppPool"
    );
    assert!(session.state().pool("DefaultAppPool").is_some());
    assert!(session.state().pool("defaultapppool").is_none());
}

#[test]
fn configure_persists_only_on_commit() {
    init_tracing();

    let fs = fs_with_orchard_dir();
    fs.add_file(host_state_path(), HOST_STATE);
    let desired = DesiredApplicationBuilder::new().build();

    {
        let mut session = FileAdministrationSession::open(host_state_path(), fs.clone()).unwrap();
        configure(&desired, &mut session, &root(), &fs, &RecordingLauncher::new()).unwrap();
        assert!(!session.has_pending_changes());
    }

    let written = fs.contents(host_state_path()).unwrap();
    let persisted: HostState = toml::from_str(&written).unwrap();
    let app = persisted.application(SITE, "/Orchard").unwrap();
    assert_eq!(app.application_pool_name, "Orchard");
    assert_eq!(app.physical_path(), Some(orchard_dir().as_path()));
    assert!(persisted.pool("Orchard").is_some());
    assert!(!fs.exists(&PathBuf::from("/etc/hostdeploy/host-state.toml.tmp")));
}

#[test]
fn dropped_session_discards_staged_changes() {
    let fs = fs_with_orchard_dir();
    fs.add_file(host_state_path(), HOST_STATE);

    {
        let mut session = FileAdministrationSession::open(host_state_path(), fs.clone()).unwrap();
        session.add_application(SITE, "/Staged", &orchard_dir()).unwrap();
        session.add_or_get_pool("Staged").unwrap();
        assert!(session.has_pending_changes());
    }

    assert_eq!(fs.contents(host_state_path()).unwrap(), HOST_STATE);
}

#[test]
fn binding_to_missing_pool_is_rejected() {
    let fs = fs_with_orchard_dir();
    fs.add_file(host_state_path(), HOST_STATE);
    let mut session = FileAdministrationSession::open(host_state_path(), fs).unwrap();
    session.add_application(SITE, "/Orchard", &orchard_dir()).unwrap();

    let result = session.set_application_pool(SITE, "/Orchard", "Nope");

    assert!(matches!(result, Err(HostdeployError::PoolNotFound(_))));
}

#[test]
fn missing_document_is_a_config_error() {
    let fs = fs_with_orchard_dir();

    let result = FileAdministrationSession::open(host_state_path(), fs);

    assert!(matches!(result, Err(HostdeployError::ConfigError(_))));
}

#[test]
fn recycle_without_command_is_an_error() {
    let fs = fs_with_orchard_dir();
    fs.add_file(host_state_path(), HOST_STATE);
    let mut session = FileAdministrationSession::open(host_state_path(), fs).unwrap();

    match session.recycle_pool("DefaultAppPool") {
        Err(HostdeployError::ServiceCommand(msg)) => {
            assert!(msg.contains("DefaultAppPool"));
            assert!(msg.contains("recycle_command"));
        }
        other => panic!("Expected ServiceCommand error, got: {:?}", other),
    }
    assert!(!session.has_pending_changes());
}

#[cfg(unix)]
#[test]
fn recycle_reports_the_command_exit_status() {
    let fs = fs_with_orchard_dir();
    fs.add_file(
        host_state_path(),
        r#"
[[site]]
name = "Default Web Site"
bindings = [{ protocol = "http", host = "*", port = 80 }]

[[pool]]
name = "Healthy"
recycle_command = "true"

[[pool]]
name = "Broken"
recycle_command = "false"
"#,
    );
    let mut session = FileAdministrationSession::open(host_state_path(), fs).unwrap();

    session.recycle_pool("Healthy").unwrap();
    assert!(matches!(
        session.recycle_pool("Broken"),
        Err(HostdeployError::ServiceCommand(_))
    ));
}

#[test]
fn commit_replaces_file_on_real_disk() {
    let dir = tempfile::tempdir().unwrap();
    let app_dir = dir.path().join("apps").join("Orchard.Web");
    std::fs::create_dir_all(&app_dir).unwrap();
    let state_path = dir.path().join("host-state.toml");
    std::fs::write(&state_path, HOST_STATE).unwrap();

    let desired = DesiredApplicationBuilder::new().path("apps/Orchard.Web").build();
    let mut session = FileAdministrationSession::open(&state_path, RealFileSystem).unwrap();
    let app = configure(
        &desired,
        &mut session,
        dir.path(),
        &RealFileSystem,
        &RecordingLauncher::new(),
    )
    .unwrap();
    drop(session);

    assert_eq!(app.physical_path(), Some(app_dir.as_path()));

    let reopened = FileAdministrationSession::open(&state_path, RealFileSystem).unwrap();
    assert!(reopened.state().application(SITE, "/Orchard").is_some());
    assert!(!dir.path().join("host-state.toml.tmp").exists());
}
