#![allow(dead_code)]

use std::path::PathBuf;

use hostdeploy::host::{
    ApplicationPool, Binding, HostState, LiveApplication, LiveSite, VirtualDirectory,
};
use hostdeploy::types::DesiredApplication;

/// Builder for `HostState` snapshots.
pub struct HostStateBuilder {
    state: HostState,
}

impl HostStateBuilder {
    pub fn new() -> Self {
        Self {
            state: HostState::default(),
        }
    }

    /// Add a site with a single `http` binding on port 80.
    pub fn with_site(self, name: &str) -> Self {
        self.with_site_bindings(name, &[("http", 80)])
    }

    pub fn with_site_bindings(mut self, name: &str, bindings: &[(&str, u16)]) -> Self {
        self.state.sites.push(LiveSite {
            name: name.to_string(),
            bindings: bindings
                .iter()
                .map(|(protocol, port)| Binding {
                    protocol: protocol.to_string(),
                    host: "*".to_string(),
                    port: *port,
                })
                .collect(),
            applications: Vec::new(),
        });
        self
    }

    /// Add an application to an already-added site.
    pub fn with_application(
        mut self,
        site: &str,
        path: &str,
        pool: &str,
        physical_path: impl Into<PathBuf>,
    ) -> Self {
        let live_site = self
            .state
            .site_mut(site)
            .expect("with_application called before with_site");
        live_site.applications.push(LiveApplication {
            path: path.to_string(),
            application_pool_name: pool.to_string(),
            virtual_directories: vec![VirtualDirectory {
                path: "/".to_string(),
                physical_path: physical_path.into(),
            }],
        });
        self
    }

    pub fn with_pool(mut self, name: &str) -> Self {
        self.state.pools.push(ApplicationPool::new(name));
        self
    }

    pub fn with_recyclable_pool(mut self, name: &str, recycle_command: &str) -> Self {
        self.state.pools.push(ApplicationPool {
            name: name.to_string(),
            recycle_command: Some(recycle_command.to_string()),
        });
        self
    }

    pub fn build(self) -> HostState {
        self.state
    }
}

impl Default for HostStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `DesiredApplication`.
pub struct DesiredApplicationBuilder {
    desired: DesiredApplication,
}

impl DesiredApplicationBuilder {
    /// Starts from the stock Orchard deployment.
    pub fn new() -> Self {
        Self {
            desired: DesiredApplication::default(),
        }
    }

    pub fn site(mut self, site: &str) -> Self {
        self.desired.site = site.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.desired.name = name.to_string();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.desired.path = path.to_string();
        self
    }

    pub fn browse_on_start(mut self, val: bool) -> Self {
        self.desired.browse_on_start = val;
        self
    }

    pub fn build(self) -> DesiredApplication {
        self.desired
    }
}

impl Default for DesiredApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
