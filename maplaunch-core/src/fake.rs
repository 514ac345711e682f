//! Recording launcher used by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::model::Platform;
use crate::ports::{NativeCapabilities, PlatformError, PlatformLauncher};
use crate::translate::NativeLaunch;

/// Something the fake was asked to open.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Opened {
    Url { url: String, app_identifier: String },
    Native(NativeLaunch),
}

pub(crate) struct FakeLauncher {
    platform: Platform,
    capabilities: NativeCapabilities,
    installed: HashSet<String>,
    fail_queries: bool,
    fail_launches: bool,
    queries: Mutex<Vec<String>>,
    opened: Mutex<Vec<Opened>>,
}

impl FakeLauncher {
    pub(crate) fn new(platform: Platform) -> Self {
        Self {
            platform,
            capabilities: NativeCapabilities {
                transit: true,
                default_mode: true,
            },
            installed: HashSet::new(),
            fail_queries: false,
            fail_launches: false,
            queries: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_installed<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed.extend(identifiers.into_iter().map(Into::into));
        self
    }

    pub(crate) fn with_capabilities(mut self, capabilities: NativeCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub(crate) fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub(crate) fn failing_launches(mut self) -> Self {
        self.fail_launches = true;
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|queries| queries.clone()).unwrap_or_default()
    }

    pub(crate) fn opened(&self) -> Vec<Opened> {
        self.opened.lock().map(|opened| opened.clone()).unwrap_or_default()
    }

    fn record(&self, opened: Opened) -> Result<(), PlatformError> {
        if let Ok(mut log) = self.opened.lock() {
            log.push(opened);
        }
        if self.fail_launches {
            return Err(PlatformError::Unresolved("fake".to_owned()));
        }
        Ok(())
    }
}

impl PlatformLauncher for FakeLauncher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn capabilities(&self) -> NativeCapabilities {
        self.capabilities
    }

    fn is_installed(&self, app_identifier: &str) -> Result<bool, PlatformError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(app_identifier.to_owned());
        }
        if self.fail_queries {
            return Err(PlatformError::Failed {
                program: "fake".to_owned(),
                status: "exit status: 1".to_owned(),
                stderr: "device offline".to_owned(),
            });
        }
        Ok(self.installed.contains(app_identifier))
    }

    fn open_url(&self, url: &str, app_identifier: &str) -> Result<(), PlatformError> {
        self.record(Opened::Url {
            url: url.to_owned(),
            app_identifier: app_identifier.to_owned(),
        })
    }

    fn open_native(&self, launch: &NativeLaunch) -> Result<(), PlatformError> {
        if self.platform != Platform::Ios {
            return Err(PlatformError::Unsupported(self.platform));
        }
        self.record(Opened::Native(launch.clone()))
    }
}
