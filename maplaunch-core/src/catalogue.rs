//! Ordered catalogue of every supported map provider.

use std::collections::HashSet;

use crate::error::LaunchError;
use crate::model::{MapProvider, MapType, Platform, ProviderInfo};

/// Immutable, ordered set of providers.
///
/// Order is significant: it is the order in which installed providers are
/// reported back to callers.
#[derive(Debug, Clone)]
pub struct ProviderCatalogue {
    providers: Vec<MapProvider>,
}

impl ProviderCatalogue {
    /// Build a catalogue from the provided list, keeping its order.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::DuplicateProvider`] when a map type appears twice.
    pub fn new(providers: Vec<MapProvider>) -> Result<Self, LaunchError> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.map_type) {
                return Err(LaunchError::DuplicateProvider(provider.map_type));
            }
        }
        Ok(Self { providers })
    }

    /// The catalogue shipped with maplaunch.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            providers: vec![
                MapProvider::new(MapType::Apple, "Apple Maps")
                    .ios("maps://")
                    .native(),
                MapProvider::new(MapType::Google, "Google Maps")
                    .android("com.google.android.apps.maps")
                    .ios("comgooglemaps://"),
                MapProvider::new(MapType::Amap, "Amap")
                    .android("com.autonavi.minimap")
                    .ios("iosamap://"),
                MapProvider::new(MapType::Baidu, "Baidu Maps")
                    .android("com.baidu.BaiduMap")
                    .ios("baidumap://"),
                MapProvider::new(MapType::Waze, "Waze")
                    .android("com.waze")
                    .ios("waze://"),
                MapProvider::new(MapType::YandexNavi, "Yandex Navigator")
                    .android("ru.yandex.yandexnavi")
                    .ios("yandexnavi://"),
                MapProvider::new(MapType::YandexMaps, "Yandex Maps")
                    .android("ru.yandex.yandexmaps")
                    .ios("yandexmaps://"),
                MapProvider::new(MapType::Citymapper, "Citymapper")
                    .android("com.citymapper.app.release")
                    .ios("citymapper://"),
                MapProvider::new(MapType::Mapswithme, "MAPS.ME")
                    .android("com.mapswithme.maps.pro")
                    .ios("mapswithme://"),
                MapProvider::new(MapType::Osmand, "OsmAnd")
                    .android("net.osmand")
                    .ios("osmandmaps://"),
                MapProvider::new(MapType::DoubleGis, "2GIS")
                    .android("ru.dublgis.dgismobile")
                    .ios("dgis://"),
            ],
        }
    }

    /// All providers in catalogue order.
    #[must_use]
    pub fn providers(&self) -> &[MapProvider] {
        &self.providers
    }

    /// Providers that exist on `platform`, in catalogue order.
    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &MapProvider> {
        self.providers
            .iter()
            .filter(move |provider| provider.identifier(platform).is_some())
    }

    /// Caller-facing descriptions of the providers that exist on `platform`.
    #[must_use]
    pub fn infos(&self, platform: Platform) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .filter_map(|provider| provider.info(platform))
            .collect()
    }

    /// Look up a provider by its map type.
    #[must_use]
    pub fn get(&self, map_type: MapType) -> Option<&MapProvider> {
        self.providers
            .iter()
            .find(|provider| provider.map_type == map_type)
    }

    /// Look up a provider by its raw wire identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::UnknownProvider`] when the name is not a known map
    /// type or the map type is missing from this catalogue.
    pub fn resolve(&self, raw: &str) -> Result<&MapProvider, LaunchError> {
        let map_type = raw.parse::<MapType>()?;
        self.get(map_type)
            .ok_or_else(|| LaunchError::UnknownProvider(raw.to_owned()))
    }
}

impl Default for ProviderCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_catalogue_covers_every_map_type_once_in_order() {
        let catalogue = ProviderCatalogue::standard();
        let types = catalogue
            .providers()
            .iter()
            .map(|provider| provider.map_type)
            .collect::<Vec<_>>();
        assert_eq!(types, MapType::ALL.to_vec());
        assert!(ProviderCatalogue::new(catalogue.providers().to_vec()).is_ok());
    }

    #[test]
    fn only_apple_has_a_native_api() {
        let native = ProviderCatalogue::standard()
            .providers()
            .iter()
            .filter(|provider| provider.has_native_api)
            .map(|provider| provider.map_type)
            .collect::<Vec<_>>();
        assert_eq!(native, vec![MapType::Apple]);
    }

    #[test]
    fn android_view_skips_apple_maps() {
        let catalogue = ProviderCatalogue::standard();
        let android = catalogue
            .for_platform(Platform::Android)
            .map(|provider| provider.map_type)
            .collect::<Vec<_>>();
        assert_eq!(android.len(), 10);
        assert_eq!(android.first(), Some(&MapType::Google));
        assert_eq!(catalogue.for_platform(Platform::Ios).count(), 11);
    }

    #[test]
    fn infos_report_platform_identifiers() {
        let infos = ProviderCatalogue::standard().infos(Platform::Ios);
        let waze = infos
            .iter()
            .find(|info| info.map_type == MapType::Waze)
            .map(|info| info.platform_identifier.as_str());
        assert_eq!(waze, Some("waze://"));
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let result = ProviderCatalogue::new(vec![
            MapProvider::new(MapType::Waze, "Waze").android("com.waze"),
            MapProvider::new(MapType::Waze, "Waze again").android("com.waze.beta"),
        ]);
        assert!(matches!(
            result,
            Err(LaunchError::DuplicateProvider(MapType::Waze))
        ));
    }

    #[test]
    fn resolve_fails_for_unknown_and_missing_types() {
        let reduced = ProviderCatalogue::new(vec![
            MapProvider::new(MapType::Google, "Google Maps").android("com.google.android.apps.maps"),
        ])
        .expect("catalogue should build");

        assert!(reduced.resolve("google").is_ok());
        assert_eq!(
            reduced.resolve("waze").err(),
            Some(LaunchError::UnknownProvider("waze".to_owned()))
        );
        assert_eq!(
            reduced.resolve("here").err(),
            Some(LaunchError::UnknownProvider("here".to_owned()))
        );
    }
}
