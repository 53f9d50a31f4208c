// tests/reconcile_preconditions.rs

mod common;
use crate::common::{default_site_state, fs_with_orchard_dir, orchard_dir, root, SITE};

use hostdeploy::errors::HostdeployError;
use hostdeploy::fs::mock::MockFileSystem;
use hostdeploy::reconcile::{configure, reconcile_plan, MutationPlan, PoolAction};
use hostdeploy_test_utils::builders::{DesiredApplicationBuilder, HostStateBuilder};
use hostdeploy_test_utils::recording_launcher::RecordingLauncher;
use hostdeploy_test_utils::recording_session::RecordingSession;

#[test]
fn missing_site_never_touches_filesystem_or_commits() {
    let desired = DesiredApplicationBuilder::new().site("No Such Site").build();
    let fs = fs_with_orchard_dir();
    let mut session = RecordingSession::new(default_site_state());

    let result = configure(&desired, &mut session, &root(), &fs, &RecordingLauncher::new());

    match result {
        Err(HostdeployError::SiteNotFound(site)) => assert_eq!(site, "No Such Site"),
        other => panic!("Expected SiteNotFound, got: {:?}", other),
    }
    assert!(fs.dir_queries().is_empty());
    assert!(session.calls().is_empty());
}

#[test]
fn site_lookup_is_case_sensitive() {
    let desired = DesiredApplicationBuilder::new().site("default web site").build();
    let fs = fs_with_orchard_dir();

    let result = reconcile_plan(&desired, &default_site_state(), &root(), &fs);

    assert!(matches!(result, Err(HostdeployError::SiteNotFound(_))));
}

#[test]
fn missing_directory_fails_without_commit() {
    let desired = DesiredApplicationBuilder::new().build();
    let fs = MockFileSystem::new();
    let mut session = RecordingSession::new(default_site_state());

    let result = configure(&desired, &mut session, &root(), &fs, &RecordingLauncher::new());

    match result {
        Err(HostdeployError::PhysicalPathMissing { relative, physical }) => {
            assert_eq!(relative, r"orchard\src\Orchard.Web");
            assert_eq!(physical, orchard_dir());
        }
        other => panic!("Expected PhysicalPathMissing, got: {:?}", other),
    }
    assert!(session.calls().is_empty());
    assert_eq!(fs.dir_queries(), vec![orchard_dir()]);
}

#[test]
fn plain_file_is_not_an_application_directory() {
    let desired = DesiredApplicationBuilder::new().build();
    let fs = MockFileSystem::new();
    fs.add_file(orchard_dir(), "not a directory");

    let result = reconcile_plan(&desired, &default_site_state(), &root(), &fs);

    assert!(matches!(result, Err(HostdeployError::PhysicalPathMissing { .. })));
}

#[test]
fn plan_describes_creation_with_new_pool() {
    let desired = DesiredApplicationBuilder::new().build();

    let plan = reconcile_plan(&desired, &default_site_state(), &root(), &fs_with_orchard_dir()).unwrap();

    match plan {
        MutationPlan::Create(create) => {
            assert_eq!(create.site, SITE);
            assert_eq!(create.app_path, "/Orchard");
            assert_eq!(create.physical_path, orchard_dir());
            assert_eq!(create.pool, PoolAction::Create("Orchard".to_string()));
        }
        other => panic!("Expected Create plan, got: {:?}", other),
    }
}

#[test]
fn plan_reuses_any_pool_with_the_same_name() {
    let state = HostStateBuilder::new()
        .with_site(SITE)
        .with_pool("Orchard")
        .with_application(SITE, "/Legacy", "Orchard", "/srv/legacy")
        .build();
    let desired = DesiredApplicationBuilder::new().build();

    let plan = reconcile_plan(&desired, &state, &root(), &fs_with_orchard_dir()).unwrap();

    match plan {
        MutationPlan::Create(create) => {
            assert_eq!(create.pool, PoolAction::Reuse("Orchard".to_string()))
        }
        other => panic!("Expected Create plan, got: {:?}", other),
    }
}

#[test]
fn dry_run_rendering_lists_every_step() {
    let desired = DesiredApplicationBuilder::new().build();
    let plan = reconcile_plan(&desired, &default_site_state(), &root(), &fs_with_orchard_dir()).unwrap();

    let rendered = plan.to_string();

    assert!(rendered.contains("create application"));
    assert!(rendered.contains("create application pool Orchard"));
    assert!(rendered.contains("bind /Orchard to pool Orchard"));
}

#[test]
fn forward_slash_paths_resolve_the_same_way() {
    let desired = DesiredApplicationBuilder::new()
        .path("orchard/src/Orchard.Web")
        .build();

    let plan = reconcile_plan(&desired, &default_site_state(), &root(), &fs_with_orchard_dir()).unwrap();

    assert!(!plan.is_noop());
}
