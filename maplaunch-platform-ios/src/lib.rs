//! Platform launcher for iOS simulators driven by `xcrun simctl`.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use maplaunch_core::{
    model::Platform,
    ports::{NativeCapabilities, PlatformError, PlatformLauncher},
    translate::{Coordinate, NativeLaunch, NativeOrigin, TransportMode},
};
use maplaunch_deeplink::QueryBuilder;

const BOOTED_DEVICE: &str = "booted";
const APPLE_MAPS_BASE: &str = "maps://";

/// Launcher that drives a simulator through `simctl`.
///
/// An app counts as installed when one of the simulator's apps declares the
/// provider's URL scheme.
pub struct SimctlLauncher {
    xcrun: PathBuf,
    device: String,
}

impl SimctlLauncher {
    /// Create a launcher for the currently booted simulator.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(xcrun: P) -> Self {
        Self {
            xcrun: xcrun.into(),
            device: BOOTED_DEVICE.to_owned(),
        }
    }

    /// Target a simulator by UDID or name instead of the booted one.
    #[must_use]
    pub fn with_device<S: Into<String>>(mut self, device: S) -> Self {
        self.device = device.into();
        self
    }

    fn simctl(&self, args: &[&str]) -> Result<String, PlatformError> {
        let program = self.xcrun.display().to_string();
        debug!(%program, device = %self.device, ?args, "Running simctl");

        let output = Command::new(&self.xcrun)
            .arg("simctl")
            .args(args)
            .output()
            .map_err(|source| PlatformError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PlatformError::Failed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn open(&self, url: &str) -> Result<(), PlatformError> {
        self.simctl(&["openurl", self.device.as_str(), url]).map(drop)
    }
}

impl PlatformLauncher for SimctlLauncher {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn capabilities(&self) -> NativeCapabilities {
        NativeCapabilities {
            transit: true,
            default_mode: true,
        }
    }

    fn is_installed(&self, app_identifier: &str) -> Result<bool, PlatformError> {
        // Install state is never cached, so each lookup lists the simulator's apps afresh.
        let listing = self.simctl(&["listapps", self.device.as_str()])?;
        Ok(url_schemes(&listing).contains(&scheme_name(app_identifier)))
    }

    fn open_url(&self, url: &str, _app_identifier: &str) -> Result<(), PlatformError> {
        self.open(url)
    }

    fn open_native(&self, launch: &NativeLaunch) -> Result<(), PlatformError> {
        self.open(&apple_maps_url(launch))
    }
}

/// Build a shared launcher for the service.
#[must_use]
pub fn launcher<P: Into<PathBuf>>(xcrun: P, device: Option<String>) -> Arc<dyn PlatformLauncher> {
    let launcher = SimctlLauncher::new(xcrun);
    Arc::new(match device {
        Some(device) => launcher.with_device(device),
        None => launcher,
    })
}

/// Render a native launch as an Apple Maps link.
///
/// The URL form cannot label coordinates, so item names are dropped for
/// directions; a marker keeps its name as the search label.
#[must_use]
pub fn apple_maps_url(launch: &NativeLaunch) -> String {
    match launch {
        NativeLaunch::Marker { item, span } => QueryBuilder::new(APPLE_MAPS_BASE)
            .param("ll", pair(item.coordinate))
            .param("q", &item.name)
            .param("spn", format!("{},{}", span.latitude_delta, span.longitude_delta))
            .build(),
        NativeLaunch::Directions {
            origin,
            destination,
            mode,
        } => {
            let start = match origin {
                NativeOrigin::CurrentLocation => None,
                NativeOrigin::Item(item) => Some(pair(item.coordinate)),
            };
            let flag = match mode {
                TransportMode::Driving => Some("d"),
                TransportMode::Walking => Some("w"),
                TransportMode::Transit => Some("r"),
                TransportMode::Default => None,
            };
            QueryBuilder::new(APPLE_MAPS_BASE)
                .param_opt("saddr", start)
                .param("daddr", pair(destination.coordinate))
                .param_opt("dirflg", flag)
                .build()
        }
    }
}

fn pair(coordinate: Coordinate) -> String {
    format!("{},{}", coordinate.latitude, coordinate.longitude)
}

/// `waze://` and `waze` both name the `waze` scheme.
fn scheme_name(app_identifier: &str) -> String {
    app_identifier
        .trim_end_matches('/')
        .trim_end_matches(':')
        .to_ascii_lowercase()
}

/// Every URL scheme declared in `simctl listapps` output.
///
/// The listing is an old-style property list where schemes appear as
/// `CFBundleURLSchemes = ( waze, "com.example.app" );`.
fn url_schemes(listing: &str) -> HashSet<String> {
    let mut schemes = HashSet::new();
    let mut rest = listing;

    while let Some((_, after_key)) = rest.split_once("CFBundleURLSchemes") {
        let Some((_, list)) = after_key.split_once('(') else {
            break;
        };
        let Some((body, tail)) = list.split_once(')') else {
            break;
        };
        schemes.extend(
            body.split(',')
                .map(|entry| entry.trim().trim_matches('"').to_ascii_lowercase())
                .filter(|entry| !entry.is_empty()),
        );
        rest = tail;
    }

    schemes
}
