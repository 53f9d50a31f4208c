use std::sync::Mutex;

use anyhow::anyhow;
use hostdeploy::errors::{HostdeployError, Result};
use hostdeploy::launch::Launcher;
use url::Url;

/// A launcher that records URLs instead of opening them, optionally failing
/// every request.
#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<Url>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// URLs passed to `open_url`, including failed attempts.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.to_string())
            .collect()
    }
}

impl Launcher for RecordingLauncher {
    fn open_url(&self, url: &Url) -> Result<()> {
        self.opened.lock().unwrap().push(url.clone());
        if self.fail {
            return Err(HostdeployError::Other(anyhow!("no browser available")));
        }
        Ok(())
    }
}
