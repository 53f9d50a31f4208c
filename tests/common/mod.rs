#![allow(dead_code)]

use std::path::PathBuf;

use hostdeploy::fs::mock::MockFileSystem;
use hostdeploy::host::HostState;
use hostdeploy_test_utils::builders::HostStateBuilder;

pub use hostdeploy_test_utils::init_tracing;

pub const SITE: &str = "Default Web Site";

/// Configured root used by every reconciler test.
pub fn root() -> PathBuf {
    PathBuf::from("/srv/www")
}

/// Where the stock Orchard config (`orchard\src\Orchard.Web`) resolves.
pub fn orchard_dir() -> PathBuf {
    root().join("orchard").join("src").join("Orchard.Web")
}

/// Mock filesystem in which the Orchard directory exists.
pub fn fs_with_orchard_dir() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir(orchard_dir());
    fs
}

/// Live state with the default site and its root application only.
pub fn default_site_state() -> HostState {
    HostStateBuilder::new()
        .with_site(SITE)
        .with_pool("DefaultAppPool")
        .with_application(SITE, "/", "DefaultAppPool", "/srv/www/default")
        .build()
}
