// src/host/mod.rs

//! Host administration surface.
//!
//! - [`model`] defines the snapshot types (sites, applications, pools).
//! - [`session`] defines the [`AdministrationSession`] trait the reconciler
//!   and recycler talk to, plus the file-backed production implementation.
//!
//! [`HostStateReader`] is the read-only view. All lookups are exact,
//! case-sensitive matches against the snapshot, and a `None` is an ordinary
//! answer, not a fault.

pub mod model;
pub mod session;

pub use model::{
    ApplicationPool, Binding, HostState, LiveApplication, LiveSite, VirtualDirectory,
};
pub use session::{AdministrationSession, FileAdministrationSession};

/// Read-only queries against an administration snapshot.
pub trait HostStateReader {
    fn site(&self, name: &str) -> Option<&LiveSite>;
    fn application(&self, site: &str, path: &str) -> Option<&LiveApplication>;
    fn pool(&self, name: &str) -> Option<&ApplicationPool>;
}

impl HostStateReader for HostState {
    fn site(&self, name: &str) -> Option<&LiveSite> {
        self.sites.iter().find(|site| site.name == name)
    }

    fn application(&self, site: &str, path: &str) -> Option<&LiveApplication> {
        self.site(site).and_then(|live_site| live_site.application(path))
    }

    fn pool(&self, name: &str) -> Option<&ApplicationPool> {
        self.pools.iter().find(|pool| pool.name == name)
    }
}
