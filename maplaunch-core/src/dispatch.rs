//! Hands translated launch targets to the platform.

use tracing::{info, warn};

use crate::model::MapProvider;
use crate::ports::PlatformLauncher;
use crate::translate::LaunchTarget;

/// Open `target` for `provider`.
///
/// Availability is not checked again here. Launching another app is best
/// effort: when the platform cannot open the target the failure is logged and
/// the call still returns normally.
pub fn launch(launcher: &dyn PlatformLauncher, provider: &MapProvider, target: &LaunchTarget) {
    let outcome = match target {
        LaunchTarget::Native(native) => launcher.open_native(native),
        LaunchTarget::Url {
            url,
            app_identifier,
        } => launcher.open_url(url, app_identifier),
    };

    match outcome {
        Ok(()) => info!(provider = %provider.map_type, "Launched map app"),
        Err(err) => {
            warn!(provider = %provider.map_type, error = %err, "Map app launch had no effect");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fake::{FakeLauncher, Opened};
    use crate::model::{MapType, Platform};
    use crate::translate::{Coordinate, MARKER_SPAN, MapItem, NativeLaunch};

    #[test]
    fn url_targets_are_addressed_to_the_app() {
        let launcher = FakeLauncher::new(Platform::Android);
        let provider = MapProvider::new(MapType::Waze, "Waze").android("com.waze");
        let target = LaunchTarget::Url {
            url: "waze://?ll=1,2".to_owned(),
            app_identifier: "com.waze".to_owned(),
        };

        launch(&launcher, &provider, &target);

        assert_eq!(
            launcher.opened(),
            vec![Opened::Url {
                url: "waze://?ll=1,2".to_owned(),
                app_identifier: "com.waze".to_owned(),
            }]
        );
    }

    #[test]
    fn native_targets_use_the_native_api() {
        let launcher = FakeLauncher::new(Platform::Ios);
        let provider = MapProvider::new(MapType::Apple, "Apple Maps").ios("maps://").native();
        let native = NativeLaunch::Marker {
            item: MapItem {
                coordinate: Coordinate {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                name: "Spot".to_owned(),
            },
            span: MARKER_SPAN,
        };

        launch(&launcher, &provider, &LaunchTarget::Native(native.clone()));

        assert_eq!(launcher.opened(), vec![Opened::Native(native)]);
    }

    #[test]
    fn unresolved_launches_are_silent() {
        let launcher = FakeLauncher::new(Platform::Android).failing_launches();
        let provider = MapProvider::new(MapType::Osmand, "OsmAnd").android("net.osmand");
        let target = LaunchTarget::Url {
            url: "osmand.geo:1,2".to_owned(),
            app_identifier: "net.osmand".to_owned(),
        };

        launch(&launcher, &provider, &target);

        assert_eq!(launcher.opened().len(), 1);
    }
}
