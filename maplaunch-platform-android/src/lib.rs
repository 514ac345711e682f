//! Platform launcher for Android devices reached through `adb`.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::Arc;

use tracing::debug;

use maplaunch_core::{
    model::Platform,
    ports::{PlatformError, PlatformLauncher},
};

const VIEW_ACTION: &str = "android.intent.action.VIEW";
// Intent.FLAG_ACTIVITY_NEW_TASK
const NEW_TASK_FLAG: &str = "0x10000000";

/// Launcher that drives a device through the Android debug bridge.
///
/// Installed apps are looked up with the package manager and deep links are
/// opened with a `VIEW` intent pinned to the provider's package.
pub struct AdbLauncher {
    adb: PathBuf,
    serial: Option<String>,
}

impl AdbLauncher {
    /// Create a launcher using the given `adb` binary and the only attached device.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(adb: P) -> Self {
        Self {
            adb: adb.into(),
            serial: None,
        }
    }

    /// Target a specific device serial instead of the only attached one.
    #[must_use]
    pub fn with_serial<S: Into<String>>(mut self, serial: S) -> Self {
        self.serial = Some(serial.into());
        self
    }

    fn shell(&self, args: &[&str]) -> Result<String, PlatformError> {
        let program = self.adb.display().to_string();
        let mut command = Command::new(&self.adb);
        if let Some(serial) = &self.serial {
            command.arg("-s").arg(serial);
        }
        command.arg("shell").args(args);
        debug!(%program, ?args, "Running adb shell");

        let output = command.output().map_err(|source| PlatformError::Spawn {
            program: program.clone(),
            source,
        })?;
        checked_output(program, &output)
    }
}

impl PlatformLauncher for AdbLauncher {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn is_installed(&self, app_identifier: &str) -> Result<bool, PlatformError> {
        let listing = self.shell(&["pm", "list", "packages", app_identifier])?;
        Ok(lists_package(&listing, app_identifier))
    }

    fn open_url(&self, url: &str, app_identifier: &str) -> Result<(), PlatformError> {
        let quoted = shell_quote(url);
        let report = self.shell(&[
            "am",
            "start",
            "-a",
            VIEW_ACTION,
            "-d",
            quoted.as_str(),
            "-p",
            app_identifier,
            "-f",
            NEW_TASK_FLAG,
        ])?;

        if intent_unresolved(&report) {
            return Err(PlatformError::Unresolved(format!("{url} in {app_identifier}")));
        }
        Ok(())
    }
}

/// Build a shared launcher for the service.
#[must_use]
pub fn launcher<P: Into<PathBuf>>(adb: P, serial: Option<String>) -> Arc<dyn PlatformLauncher> {
    let launcher = AdbLauncher::new(adb);
    Arc::new(match serial {
        Some(serial) => launcher.with_serial(serial),
        None => launcher,
    })
}

fn checked_output(program: String, output: &Output) -> Result<String, PlatformError> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        if intent_unresolved(&stderr) {
            return Err(PlatformError::Unresolved(stderr.trim().to_owned()));
        }
        return Err(PlatformError::Failed {
            program,
            status: output.status.to_string(),
            stderr: stderr.trim().to_owned(),
        });
    }

    // `am` prints its errors to either stream depending on the Android version.
    Ok(format!("{stdout}{stderr}"))
}

/// Whether `pm list packages` output names exactly `package`.
///
/// The filter argument of `pm` matches substrings, so `com.waze` also lists
/// `com.waze.beta`.
fn lists_package(listing: &str, package: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .any(|name| name == package)
}

fn intent_unresolved(report: &str) -> bool {
    report
        .lines()
        .any(|line| line.starts_with("Error:") || line.contains("unable to resolve Intent"))
}

// adb joins shell arguments with spaces and hands them to the device shell.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_listing_requires_an_exact_match() {
        let listing = "package:com.waze.beta\npackage:com.waze\r\n";
        assert!(lists_package(listing, "com.waze"));
        assert!(!lists_package("package:com.waze.beta\n", "com.waze"));
        assert!(!lists_package("", "net.osmand"));
    }

    #[test]
    fn unresolved_intents_are_detected() {
        let report = "Starting: Intent { act=android.intent.action.VIEW pkg=com.waze }\n\
                      Error: Activity not started, unable to resolve Intent { act=android.intent.action.VIEW }\n";
        assert!(intent_unresolved(report));
        assert!(!intent_unresolved(
            "Starting: Intent { act=android.intent.action.VIEW pkg=com.waze }\n"
        ));
    }

    #[test]
    fn deep_links_survive_the_device_shell() {
        assert_eq!(
            shell_quote("waze://?ll=1,2&navigate=yes"),
            "'waze://?ll=1,2&navigate=yes'"
        );
        assert_eq!(shell_quote("geo:0,0?q=Joe's"), r"'geo:0,0?q=Joe'\''s'");
    }

    #[test]
    fn reports_android_platform() {
        assert_eq!(AdbLauncher::new("adb").platform(), Platform::Android);
    }

    #[test]
    fn missing_adb_binary_is_a_spawn_error() {
        let launcher = AdbLauncher::new("/nonexistent/maplaunch-adb").with_serial("emulator-5554");
        assert!(matches!(
            launcher.is_installed("com.waze"),
            Err(PlatformError::Spawn { .. })
        ));
    }

    #[test]
    fn native_launches_are_unsupported() {
        use maplaunch_core::translate::{Coordinate, MARKER_SPAN, MapItem, NativeLaunch};

        let launch = NativeLaunch::Marker {
            item: MapItem {
                coordinate: Coordinate {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                name: "Spot".to_owned(),
            },
            span: MARKER_SPAN,
        };
        assert!(matches!(
            AdbLauncher::new("adb").open_native(&launch),
            Err(PlatformError::Unsupported(Platform::Android))
        ));
    }
}
