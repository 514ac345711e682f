//! Traits describing host platform capabilities and shared helper types.

use std::io;

use crate::model::Platform;
use crate::translate::NativeLaunch;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the host platform.
pub enum PlatformError {
    /// A platform tool could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A platform tool exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        /// Program that failed.
        program: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// No app on the device handles the target.
    #[error("No handler for {0}")]
    Unresolved(String),
    /// The platform has no native map API.
    #[error("Native map launch is not supported on {0}")]
    Unsupported(Platform),
}

/// Optional features of the platform's native map API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeCapabilities {
    /// A transit directions mode exists.
    pub transit: bool,
    /// A "let the map app decide" directions mode exists.
    pub default_mode: bool,
}

/// Host platform access: installed-app lookup and app launching.
pub trait PlatformLauncher: Send + Sync {
    /// Platform this launcher talks to.
    fn platform(&self) -> Platform;

    /// Features of the native map API, if any.
    fn capabilities(&self) -> NativeCapabilities {
        NativeCapabilities::default()
    }

    /// Check whether the app behind `app_identifier` is installed and launchable.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] when the platform cannot be queried.
    fn is_installed(&self, app_identifier: &str) -> Result<bool, PlatformError>;

    /// Open `url` in the app behind `app_identifier`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] when the platform refuses or cannot resolve the launch.
    fn open_url(&self, url: &str, app_identifier: &str) -> Result<(), PlatformError>;

    /// Open the platform's own map app with a structured payload.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] unless the platform overrides it.
    fn open_native(&self, _launch: &NativeLaunch) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported(self.platform()))
    }
}
