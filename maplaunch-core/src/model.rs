//! Domain data structures for providers, platforms, and launch requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

/// Map applications known to maplaunch.
///
/// The string form of each variant is the identifier used on the wire,
/// e.g. `"yandexNavi"` or `"doubleGis"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapType {
    /// Apple Maps.
    Apple,
    /// Google Maps.
    Google,
    /// Amap (Gaode).
    Amap,
    /// Baidu Maps.
    Baidu,
    /// Waze.
    Waze,
    /// Yandex Navigator.
    YandexNavi,
    /// Yandex Maps.
    YandexMaps,
    /// Citymapper.
    Citymapper,
    /// MAPS.ME.
    Mapswithme,
    /// `OsmAnd`.
    Osmand,
    /// 2GIS.
    DoubleGis,
}

impl MapType {
    /// Every map type in catalogue order.
    pub const ALL: [MapType; 11] = [
        MapType::Apple,
        MapType::Google,
        MapType::Amap,
        MapType::Baidu,
        MapType::Waze,
        MapType::YandexNavi,
        MapType::YandexMaps,
        MapType::Citymapper,
        MapType::Mapswithme,
        MapType::Osmand,
        MapType::DoubleGis,
    ];

    /// Wire identifier of this map type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MapType::Apple => "apple",
            MapType::Google => "google",
            MapType::Amap => "amap",
            MapType::Baidu => "baidu",
            MapType::Waze => "waze",
            MapType::YandexNavi => "yandexNavi",
            MapType::YandexMaps => "yandexMaps",
            MapType::Citymapper => "citymapper",
            MapType::Mapswithme => "mapswithme",
            MapType::Osmand => "osmand",
            MapType::DoubleGis => "doubleGis",
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for MapType {
    type Err = LaunchError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        MapType::ALL
            .into_iter()
            .find(|map_type| map_type.as_str() == raw)
            .ok_or_else(|| LaunchError::UnknownProvider(raw.to_owned()))
    }
}

/// Host platform a launcher talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android: apps are addressed by package name.
    Android,
    /// iOS: apps are addressed by URL scheme.
    Ios,
}

impl fmt::Display for Platform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        };
        formatter.write_str(name)
    }
}

/// Static description of a map application across platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapProvider {
    /// Unique identifier.
    pub map_type: MapType,
    /// Human-readable name.
    pub display_name: String,
    /// Package name on Android, if the app exists there.
    pub android_package: Option<String>,
    /// URL-scheme prefix on iOS, if the app exists there.
    pub ios_url_scheme: Option<String>,
    /// Whether the platform offers a structured API for this app instead of a URL scheme.
    pub has_native_api: bool,
}

impl MapProvider {
    /// Start a provider record with no platform identifiers.
    #[must_use]
    pub fn new<S: Into<String>>(map_type: MapType, display_name: S) -> Self {
        Self {
            map_type,
            display_name: display_name.into(),
            android_package: None,
            ios_url_scheme: None,
            has_native_api: false,
        }
    }

    /// Set the Android package name.
    #[must_use]
    pub fn android<S: Into<String>>(mut self, package: S) -> Self {
        self.android_package = Some(package.into());
        self
    }

    /// Set the iOS URL-scheme prefix.
    #[must_use]
    pub fn ios<S: Into<String>>(mut self, url_scheme: S) -> Self {
        self.ios_url_scheme = Some(url_scheme.into());
        self
    }

    /// Mark the provider as launched through the platform's native map API.
    #[must_use]
    pub fn native(mut self) -> Self {
        self.has_native_api = true;
        self
    }

    /// Identifier used to detect and address the app on `platform`.
    #[must_use]
    pub fn identifier(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Android => self.android_package.as_deref(),
            Platform::Ios => self.ios_url_scheme.as_deref(),
        }
    }

    /// Caller-facing description for `platform`, if the app exists there.
    #[must_use]
    pub fn info(&self, platform: Platform) -> Option<ProviderInfo> {
        self.identifier(platform).map(|identifier| ProviderInfo {
            map_type: self.map_type,
            display_name: self.display_name.clone(),
            platform_identifier: identifier.to_owned(),
        })
    }
}

/// Provider entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider identifier.
    #[serde(rename = "type")]
    pub map_type: MapType,
    /// Human-readable name.
    pub display_name: String,
    /// Package name or URL-scheme prefix on the active platform.
    pub platform_identifier: String,
}

/// Install state of a single provider, computed per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Provider the state refers to.
    pub provider: ProviderInfo,
    /// Whether the platform reports the app as launchable.
    pub is_installed: bool,
}

/// Arguments of a `showMarker` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMarkerParams {
    /// Raw provider identifier as sent by the caller.
    #[serde(rename = "type")]
    pub map_type: String,
    /// Deep link prepared by the caller for the provider.
    pub url: String,
    /// Marker title.
    pub title: String,
    /// Decimal-degree latitude.
    pub latitude: String,
    /// Decimal-degree longitude.
    pub longitude: String,
}

impl ShowMarkerParams {
    /// Attach the resolved provider and turn the parameters into a request.
    #[must_use]
    pub fn into_request(self, provider: MapType) -> LaunchRequest {
        LaunchRequest::ShowMarker {
            provider,
            url: self.url,
            title: self.title,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Arguments of a `showDirections` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDirectionsParams {
    /// Raw provider identifier as sent by the caller.
    #[serde(rename = "type")]
    pub map_type: String,
    /// Deep link prepared by the caller for the provider.
    pub url: String,
    /// Optional destination title.
    #[serde(default)]
    pub destination_title: Option<String>,
    /// Decimal-degree destination latitude.
    pub destination_latitude: String,
    /// Decimal-degree destination longitude.
    pub destination_longitude: String,
    /// Optional origin title.
    #[serde(default)]
    pub origin_title: Option<String>,
    /// Origin latitude; absent means the current device location.
    #[serde(default)]
    pub origin_latitude: Option<String>,
    /// Origin longitude; absent means the current device location.
    #[serde(default)]
    pub origin_longitude: Option<String>,
    /// Requested transport mode, e.g. `"walking"`.
    #[serde(default)]
    pub directions_mode: Option<String>,
}

impl ShowDirectionsParams {
    /// Attach the resolved provider and turn the parameters into a request.
    #[must_use]
    pub fn into_request(self, provider: MapType) -> LaunchRequest {
        LaunchRequest::ShowDirections {
            provider,
            url: self.url,
            destination: Destination {
                title: self.destination_title,
                latitude: self.destination_latitude,
                longitude: self.destination_longitude,
            },
            origin: Origin {
                title: self.origin_title,
                latitude: self.origin_latitude,
                longitude: self.origin_longitude,
            },
            directions_mode: self.directions_mode,
        }
    }
}

/// End point of a directions request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Optional title shown for the point.
    pub title: Option<String>,
    /// Decimal-degree latitude.
    pub latitude: String,
    /// Decimal-degree longitude.
    pub longitude: String,
}

/// Start point of a directions request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    /// Optional title shown for the point.
    pub title: Option<String>,
    /// Decimal-degree latitude.
    pub latitude: Option<String>,
    /// Decimal-degree longitude.
    pub longitude: Option<String>,
}

impl Origin {
    /// Both coordinates, when the caller supplied a full origin.
    #[must_use]
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        self.latitude.as_deref().zip(self.longitude.as_deref())
    }
}

/// A single launch request, created per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Show a titled point.
    ShowMarker {
        /// Target provider.
        provider: MapType,
        /// Deep link prepared by the caller.
        url: String,
        /// Marker title.
        title: String,
        /// Decimal-degree latitude.
        latitude: String,
        /// Decimal-degree longitude.
        longitude: String,
    },
    /// Show a route between two points.
    ShowDirections {
        /// Target provider.
        provider: MapType,
        /// Deep link prepared by the caller.
        url: String,
        /// Route end point.
        destination: Destination,
        /// Route start point.
        origin: Origin,
        /// Requested transport mode.
        directions_mode: Option<String>,
    },
}

impl LaunchRequest {
    /// Provider the request targets.
    #[must_use]
    pub fn provider(&self) -> MapType {
        match self {
            LaunchRequest::ShowMarker { provider, .. }
            | LaunchRequest::ShowDirections { provider, .. } => *provider,
        }
    }

    /// Caller-supplied deep link.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            LaunchRequest::ShowMarker { url, .. } | LaunchRequest::ShowDirections { url, .. } => {
                url
            }
        }
    }
}
