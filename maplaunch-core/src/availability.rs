//! Installed-provider detection.

use tracing::{debug, warn};

use crate::catalogue::ProviderCatalogue;
use crate::model::{Availability, MapProvider, MapType};
use crate::ports::PlatformLauncher;

/// Intersects the catalogue with what the platform reports as installed.
///
/// Nothing is cached: every call asks the platform again.
pub struct AvailabilityChecker<'a> {
    catalogue: &'a ProviderCatalogue,
    launcher: &'a dyn PlatformLauncher,
}

impl<'a> AvailabilityChecker<'a> {
    /// Create a checker over `catalogue` using `launcher` for lookups.
    #[must_use]
    pub fn new(catalogue: &'a ProviderCatalogue, launcher: &'a dyn PlatformLauncher) -> Self {
        Self {
            catalogue,
            launcher,
        }
    }

    /// Whether `provider` can be launched on the device.
    ///
    /// Providers without an identifier on the active platform never are. Native
    /// providers are otherwise always installed and never queried. A failed
    /// platform query counts as "not installed".
    #[must_use]
    pub fn is_installed(&self, provider: &MapProvider) -> bool {
        let platform = self.launcher.platform();
        let Some(identifier) = provider.identifier(platform) else {
            return false;
        };

        if provider.has_native_api {
            return true;
        }

        match self.launcher.is_installed(identifier) {
            Ok(installed) => {
                debug!(provider = %provider.map_type, identifier, installed, "Queried platform");
                installed
            }
            Err(err) => {
                warn!(provider = %provider.map_type, identifier, error = %err, "Installed-app query failed");
                false
            }
        }
    }

    /// Installed providers in catalogue order.
    #[must_use]
    pub fn list_installed(&self) -> Vec<&'a MapProvider> {
        self.catalogue
            .for_platform(self.launcher.platform())
            .filter(|provider| self.is_installed(provider))
            .collect()
    }

    /// Whether the provider with `map_type` is installed.
    #[must_use]
    pub fn is_available(&self, map_type: MapType) -> bool {
        self.catalogue
            .get(map_type)
            .is_some_and(|provider| self.is_installed(provider))
    }

    /// Install state of every provider on the active platform.
    #[must_use]
    pub fn availability(&self) -> Vec<Availability> {
        let platform = self.launcher.platform();
        self.catalogue
            .for_platform(platform)
            .filter_map(|provider| {
                provider.info(platform).map(|info| Availability {
                    provider: info,
                    is_installed: self.is_installed(provider),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fake::FakeLauncher;
    use crate::model::Platform;

    #[test]
    fn list_installed_keeps_catalogue_order_without_duplicates() {
        let catalogue = ProviderCatalogue::standard();
        let launcher = FakeLauncher::new(Platform::Android)
            .with_installed(["net.osmand", "com.waze", "com.google.android.apps.maps", "com.waze"]);
        let checker = AvailabilityChecker::new(&catalogue, &launcher);

        let installed = checker
            .list_installed()
            .into_iter()
            .map(|provider| provider.map_type)
            .collect::<Vec<_>>();
        assert_eq!(
            installed,
            vec![MapType::Google, MapType::Waze, MapType::Osmand]
        );

        let unique = installed.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), installed.len());
    }

    #[test]
    fn is_available_agrees_with_list_installed() {
        let catalogue = ProviderCatalogue::standard();
        for platform in [Platform::Android, Platform::Ios] {
            let launcher = FakeLauncher::new(platform).with_installed([
                "com.waze",
                "ru.dublgis.dgismobile",
                "citymapper://",
                "baidumap://",
            ]);
            let checker = AvailabilityChecker::new(&catalogue, &launcher);
            let listed = checker
                .list_installed()
                .into_iter()
                .map(|provider| provider.map_type)
                .collect::<HashSet<_>>();

            for map_type in MapType::ALL {
                assert_eq!(
                    checker.is_available(map_type),
                    listed.contains(&map_type),
                    "{map_type} on {platform}"
                );
            }
        }
    }

    #[test]
    fn native_provider_is_available_without_a_query() {
        let catalogue = ProviderCatalogue::standard();
        let launcher = FakeLauncher::new(Platform::Ios).failing_queries();
        let checker = AvailabilityChecker::new(&catalogue, &launcher);

        assert!(checker.is_available(MapType::Apple));
        assert!(launcher.queries().iter().all(|identifier| identifier != "maps://"));
    }

    #[test]
    fn query_failures_count_as_not_installed() {
        let catalogue = ProviderCatalogue::standard();
        let launcher = FakeLauncher::new(Platform::Android)
            .with_installed(["com.waze"])
            .failing_queries();
        let checker = AvailabilityChecker::new(&catalogue, &launcher);

        assert!(!checker.is_available(MapType::Waze));
        assert!(checker.list_installed().is_empty());
    }

    #[test]
    fn apple_is_unavailable_on_android() {
        let catalogue = ProviderCatalogue::standard();
        let launcher = FakeLauncher::new(Platform::Android);
        let checker = AvailabilityChecker::new(&catalogue, &launcher);

        assert!(!checker.is_available(MapType::Apple));
        assert!(
            checker
                .availability()
                .iter()
                .all(|entry| entry.provider.map_type != MapType::Apple)
        );
    }

    #[test]
    fn availability_reports_every_platform_provider() {
        let catalogue = ProviderCatalogue::standard();
        let launcher = FakeLauncher::new(Platform::Ios).with_installed(["waze://"]);
        let checker = AvailabilityChecker::new(&catalogue, &launcher);

        let installed = checker
            .availability()
            .into_iter()
            .filter(|entry| entry.is_installed)
            .map(|entry| entry.provider.map_type)
            .collect::<Vec<_>>();
        assert_eq!(installed, vec![MapType::Apple, MapType::Waze]);
    }
}
