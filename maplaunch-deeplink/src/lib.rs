//! Deep-link builders for every map app in the maplaunch catalogue.
//!
//! The launch service passes non-native deep links through untouched, so the
//! calling side is responsible for writing coordinates and titles into each
//! app's own URL grammar. This crate does that.

/// Query-string helpers.
pub mod query;

use std::fmt;
use std::str::FromStr;

use maplaunch_core::{MapType, Platform, ShowDirectionsParams, ShowMarkerParams};
use serde::{Deserialize, Serialize};

pub use query::{QueryBuilder, encode_component};

const SOURCE_APPLICATION: &str = "maplaunch";
const DEFAULT_ZOOM: u8 = 16;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl LatLng {
    /// Create a point.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `longitude,latitude`, the order used by Yandex and 2GIS.
    #[must_use]
    pub fn lng_lat(self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{}", self.latitude, self.longitude)
    }
}

/// Transport mode for directions links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionsMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// Public transport.
    Transit,
    /// By bike.
    Bicycling,
}

impl DirectionsMode {
    /// Every mode, in display order.
    pub const ALL: [DirectionsMode; 4] = [
        DirectionsMode::Driving,
        DirectionsMode::Walking,
        DirectionsMode::Transit,
        DirectionsMode::Bicycling,
    ];

    /// Wire name, as understood by the launch service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionsMode::Driving => "driving",
            DirectionsMode::Walking => "walking",
            DirectionsMode::Transit => "transit",
            DirectionsMode::Bicycling => "bicycling",
        }
    }
}

impl fmt::Display for DirectionsMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DirectionsMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DirectionsMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == raw)
            .ok_or_else(|| format!("unknown directions mode {raw:?}"))
    }
}

/// Everything needed to show a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLink {
    /// Point to show.
    pub coords: LatLng,
    /// Title of the point.
    pub title: String,
    /// Optional longer description, used where the app supports one.
    pub description: Option<String>,
    /// Map zoom level, where the app supports one.
    pub zoom: u8,
}

impl MarkerLink {
    /// A marker with the default zoom level.
    #[must_use]
    pub fn new<S: Into<String>>(coords: LatLng, title: S) -> Self {
        Self {
            coords,
            title: title.into(),
            description: None,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Build the `showMarker` parameters for `map_type` on `platform`.
    #[must_use]
    pub fn params(&self, map_type: MapType, platform: Platform) -> ShowMarkerParams {
        ShowMarkerParams {
            map_type: map_type.to_string(),
            url: marker_url(map_type, platform, self),
            title: self.title.clone(),
            latitude: self.coords.latitude.to_string(),
            longitude: self.coords.longitude.to_string(),
        }
    }
}

/// Everything needed to show a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsLink {
    /// Route end.
    pub destination: LatLng,
    /// Optional title of the route end.
    pub destination_title: Option<String>,
    /// Route start; `None` means the device's current location.
    pub origin: Option<LatLng>,
    /// Optional title of the route start.
    pub origin_title: Option<String>,
    /// Transport mode.
    pub mode: DirectionsMode,
}

impl DirectionsLink {
    /// Driving directions from the current location to `destination`.
    #[must_use]
    pub fn to(destination: LatLng) -> Self {
        Self {
            destination,
            destination_title: None,
            origin: None,
            origin_title: None,
            mode: DirectionsMode::default(),
        }
    }

    /// Build the `showDirections` parameters for `map_type` on `platform`.
    #[must_use]
    pub fn params(&self, map_type: MapType, platform: Platform) -> ShowDirectionsParams {
        ShowDirectionsParams {
            map_type: map_type.to_string(),
            url: directions_url(map_type, platform, self),
            destination_title: self.destination_title.clone(),
            destination_latitude: self.destination.latitude.to_string(),
            destination_longitude: self.destination.longitude.to_string(),
            origin_title: self.origin_title.clone(),
            origin_latitude: self.origin.map(|origin| origin.latitude.to_string()),
            origin_longitude: self.origin.map(|origin| origin.longitude.to_string()),
            directions_mode: Some(self.mode.as_str().to_owned()),
        }
    }
}

/// Deep link that shows `link` as a marker in `map_type`.
#[must_use]
pub fn marker_url(map_type: MapType, platform: Platform, link: &MarkerLink) -> String {
    let coords = link.coords;
    match map_type {
        MapType::Apple => QueryBuilder::new("https://maps.apple.com/")
            .param("ll", coords)
            .param("q", &link.title)
            .param("z", link.zoom)
            .build(),
        MapType::Google => {
            let query = format!("{coords}({})", link.title);
            match platform {
                Platform::Android => QueryBuilder::new("geo:0,0").param("q", query).build(),
                Platform::Ios => QueryBuilder::new("comgooglemaps://")
                    .param("q", query)
                    .param("zoom", link.zoom)
                    .build(),
            }
        }
        MapType::Amap => QueryBuilder::new(format!("{}amap://viewMap", amap_prefix(platform)))
            .param("sourceApplication", SOURCE_APPLICATION)
            .param("poiname", &link.title)
            .param("lat", coords.latitude)
            .param("lon", coords.longitude)
            .param("zoom", link.zoom)
            .param("dev", 0)
            .build(),
        MapType::Baidu => QueryBuilder::new("baidumap://map/marker")
            .param("location", coords)
            .param("title", &link.title)
            .param_opt("content", link.description.as_deref())
            .param("traffic", "on")
            .param("src", SOURCE_APPLICATION)
            .param("coord_type", "gcj02")
            .param("zoom", link.zoom)
            .build(),
        MapType::Waze => QueryBuilder::new("waze://")
            .param("ll", coords)
            .param("z", link.zoom)
            .build(),
        MapType::YandexNavi => QueryBuilder::new("yandexnavi://show_point_on_map")
            .param("lat", coords.latitude)
            .param("lon", coords.longitude)
            .param("zoom", link.zoom)
            .param("no-balloon", 0)
            .param("desc", &link.title)
            .build(),
        MapType::YandexMaps => QueryBuilder::new("yandexmaps://maps.yandex.ru/")
            .param("pt", coords.lng_lat())
            .param("z", link.zoom)
            .param("l", "map")
            .build(),
        MapType::Citymapper => QueryBuilder::new("citymapper://directions")
            .param("endcoord", coords)
            .param("endname", &link.title)
            .build(),
        MapType::Mapswithme => QueryBuilder::new("mapswithme://map")
            .param("ll", coords)
            .param("n", &link.title)
            .build(),
        MapType::Osmand => QueryBuilder::new(osmand_base(platform))
            .param("lat", coords.latitude)
            .param("lon", coords.longitude)
            .param("z", link.zoom)
            .param("title", &link.title)
            .build(),
        MapType::DoubleGis => {
            QueryBuilder::new(format!("dgis://2gis.ru/geo/{}", coords.lng_lat())).build()
        }
    }
}

/// Deep link that shows the route in `link` in `map_type`.
#[must_use]
pub fn directions_url(map_type: MapType, platform: Platform, link: &DirectionsLink) -> String {
    let destination = link.destination;
    let origin = link.origin;
    let mode = link.mode;
    match map_type {
        MapType::Apple => QueryBuilder::new("https://maps.apple.com/")
            .param_opt("saddr", origin)
            .param("daddr", destination)
            .param(
                "dirflg",
                match mode {
                    DirectionsMode::Walking => "w",
                    DirectionsMode::Transit => "r",
                    DirectionsMode::Driving | DirectionsMode::Bicycling => "d",
                },
            )
            .build(),
        MapType::Google => match platform {
            Platform::Android => QueryBuilder::new("https://www.google.com/maps/dir/")
                .param("api", 1)
                .param_opt("origin", origin)
                .param("destination", destination)
                .param("travelmode", mode)
                .build(),
            Platform::Ios => QueryBuilder::new("comgooglemaps://")
                .param_opt("saddr", origin)
                .param("daddr", destination)
                .param("directionsmode", mode)
                .build(),
        },
        MapType::Amap => {
            let base = match platform {
                Platform::Android => "amapuri://route/plan/",
                Platform::Ios => "iosamap://path",
            };
            QueryBuilder::new(base)
                .param("sourceApplication", SOURCE_APPLICATION)
                .param_opt("slat", origin.map(|point| point.latitude))
                .param_opt("slon", origin.map(|point| point.longitude))
                .param_opt("sname", link.origin_title.as_deref())
                .param("dlat", destination.latitude)
                .param("dlon", destination.longitude)
                .param_opt("dname", link.destination_title.as_deref())
                .param("dev", 0)
                .param(
                    "t",
                    match mode {
                        DirectionsMode::Driving => 0,
                        DirectionsMode::Transit => 1,
                        DirectionsMode::Walking => 2,
                        DirectionsMode::Bicycling => 3,
                    },
                )
                .build()
        }
        MapType::Baidu => QueryBuilder::new("baidumap://map/direction")
            .param(
                "destination",
                baidu_place(destination, link.destination_title.as_deref()),
            )
            .param_opt(
                "origin",
                origin.map(|point| baidu_place(point, link.origin_title.as_deref())),
            )
            .param("coord_type", "gcj02")
            .param(
                "mode",
                match mode {
                    DirectionsMode::Driving => "driving",
                    DirectionsMode::Walking => "walking",
                    DirectionsMode::Transit => "transit",
                    DirectionsMode::Bicycling => "riding",
                },
            )
            .param("src", SOURCE_APPLICATION)
            .build(),
        MapType::Waze => QueryBuilder::new("waze://")
            .param("ll", destination)
            .param("z", DEFAULT_ZOOM)
            .param("navigate", "yes")
            .build(),
        MapType::YandexNavi => QueryBuilder::new("yandexnavi://build_route_on_map")
            .param("lat_to", destination.latitude)
            .param("lon_to", destination.longitude)
            .param_opt("lat_from", origin.map(|point| point.latitude))
            .param_opt("lon_from", origin.map(|point| point.longitude))
            .build(),
        MapType::YandexMaps => {
            let start = origin.map(|point| point.to_string()).unwrap_or_default();
            QueryBuilder::new("yandexmaps://maps.yandex.ru/")
                .param("rtext", format!("{start}~{destination}"))
                .param(
                    "rtt",
                    match mode {
                        DirectionsMode::Driving => "auto",
                        DirectionsMode::Walking => "pd",
                        DirectionsMode::Transit => "mt",
                        DirectionsMode::Bicycling => "bc",
                    },
                )
                .build()
        }
        MapType::Citymapper => QueryBuilder::new("citymapper://directions")
            .param("endcoord", destination)
            .param_opt("endname", link.destination_title.as_deref())
            .param_opt("startcoord", origin)
            .param_opt("startname", link.origin_title.as_deref())
            .build(),
        MapType::Mapswithme => QueryBuilder::new("mapswithme://route")
            .param_opt("sll", origin)
            .param_opt("saddr", link.origin_title.as_deref())
            .param("dll", destination)
            .param_opt("daddr", link.destination_title.as_deref())
            .param(
                "type",
                match mode {
                    DirectionsMode::Driving => "vehicle",
                    DirectionsMode::Walking => "pedestrian",
                    DirectionsMode::Transit => "public transport",
                    DirectionsMode::Bicycling => "bicycle",
                },
            )
            .build(),
        MapType::Osmand => {
            let base = match platform {
                Platform::Android => "osmand.navigation:",
                Platform::Ios => "osmandmaps://navigate",
            };
            QueryBuilder::new(base)
                .param_opt("start", origin)
                .param("dest", destination)
                .param(
                    "profile",
                    match mode {
                        DirectionsMode::Driving => "car",
                        DirectionsMode::Walking => "pedestrian",
                        DirectionsMode::Transit => "public_transport",
                        DirectionsMode::Bicycling => "bicycle",
                    },
                )
                .build()
        }
        MapType::DoubleGis => {
            let route_type = match mode {
                DirectionsMode::Driving => "car",
                DirectionsMode::Walking => "pedestrian",
                DirectionsMode::Transit => "bus",
                DirectionsMode::Bicycling => "bicycle",
            };
            let from = origin
                .map(|point| format!("/from/{}", point.lng_lat()))
                .unwrap_or_default();
            format!(
                "dgis://2gis.ru/routeSearch/rsType/{route_type}{from}/to/{}",
                destination.lng_lat()
            )
        }
    }
}

fn amap_prefix(platform: Platform) -> &'static str {
    match platform {
        Platform::Android => "android",
        Platform::Ios => "ios",
    }
}

fn osmand_base(platform: Platform) -> &'static str {
    match platform {
        Platform::Android => "osmand.geo://",
        Platform::Ios => "osmandmaps://",
    }
}

fn baidu_place(point: LatLng, title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("name:{title}|latlng:{point}"),
        _ => format!("latlng:{point}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ferry_building() -> MarkerLink {
        MarkerLink::new(LatLng::new(37.7955, -122.3937), "Ferry Building")
    }

    fn to_city_hall(mode: DirectionsMode) -> DirectionsLink {
        DirectionsLink {
            mode,
            destination_title: Some("City Hall".to_owned()),
            ..DirectionsLink::to(LatLng::new(37.7793, -122.4193))
        }
    }

    #[test]
    fn waze_marker_and_navigation() {
        assert_eq!(
            marker_url(MapType::Waze, Platform::Android, &ferry_building()),
            "waze://?ll=37.7955,-122.3937&z=16"
        );
        assert_eq!(
            directions_url(MapType::Waze, Platform::Ios, &to_city_hall(DirectionsMode::Walking)),
            "waze://?ll=37.7793,-122.4193&z=16&navigate=yes"
        );
    }

    #[test]
    fn google_differs_per_platform() {
        assert_eq!(
            marker_url(MapType::Google, Platform::Android, &ferry_building()),
            "geo:0,0?q=37.7955,-122.3937%28Ferry%20Building%29"
        );
        assert_eq!(
            marker_url(MapType::Google, Platform::Ios, &ferry_building()),
            "comgooglemaps://?q=37.7955,-122.3937%28Ferry%20Building%29&zoom=16"
        );
        assert_eq!(
            directions_url(
                MapType::Google,
                Platform::Ios,
                &to_city_hall(DirectionsMode::Transit)
            ),
            "comgooglemaps://?daddr=37.7793,-122.4193&directionsmode=transit"
        );
    }

    #[test]
    fn yandex_and_2gis_put_longitude_first() {
        assert_eq!(
            marker_url(MapType::YandexMaps, Platform::Android, &ferry_building()),
            "yandexmaps://maps.yandex.ru/?pt=-122.3937,37.7955&z=16&l=map"
        );
        assert_eq!(
            marker_url(MapType::DoubleGis, Platform::Ios, &ferry_building()),
            "dgis://2gis.ru/geo/-122.3937,37.7955"
        );
    }

    #[test]
    fn yandex_route_without_origin_starts_with_tilde() {
        assert_eq!(
            directions_url(
                MapType::YandexMaps,
                Platform::Android,
                &to_city_hall(DirectionsMode::Walking)
            ),
            "yandexmaps://maps.yandex.ru/?rtext=~37.7793,-122.4193&rtt=pd"
        );
    }

    #[test]
    fn double_gis_route_includes_origin_when_given() {
        let link = DirectionsLink {
            origin: Some(LatLng::new(37.8044, -122.2712)),
            ..to_city_hall(DirectionsMode::Transit)
        };
        assert_eq!(
            directions_url(MapType::DoubleGis, Platform::Android, &link),
            "dgis://2gis.ru/routeSearch/rsType/bus/from/-122.2712,37.8044/to/-122.4193,37.7793"
        );
    }

    #[test]
    fn baidu_destination_carries_the_title() {
        assert_eq!(
            directions_url(
                MapType::Baidu,
                Platform::Android,
                &to_city_hall(DirectionsMode::Bicycling)
            ),
            "baidumap://map/direction?destination=name:City%20Hall%7Clatlng:37.7793,-122.4193\
             &coord_type=gcj02&mode=riding&src=maplaunch"
        );
    }

    #[test]
    fn apple_directions_omit_origin_for_current_location() {
        assert_eq!(
            directions_url(
                MapType::Apple,
                Platform::Ios,
                &to_city_hall(DirectionsMode::Walking)
            ),
            "https://maps.apple.com/?daddr=37.7793,-122.4193&dirflg=w"
        );
    }

    #[test]
    fn marker_params_carry_the_link_and_coordinates() {
        let params = ferry_building().params(MapType::Waze, Platform::Android);
        assert_eq!(
            params,
            ShowMarkerParams {
                map_type: "waze".to_owned(),
                url: "waze://?ll=37.7955,-122.3937&z=16".to_owned(),
                title: "Ferry Building".to_owned(),
                latitude: "37.7955".to_owned(),
                longitude: "-122.3937".to_owned(),
            }
        );
    }

    #[test]
    fn directions_params_leave_origin_empty_for_current_location() {
        let params = to_city_hall(DirectionsMode::Walking).params(MapType::Apple, Platform::Ios);
        assert_eq!(params.origin_latitude, None);
        assert_eq!(params.origin_longitude, None);
        assert_eq!(params.directions_mode.as_deref(), Some("walking"));
        assert_eq!(params.destination_title.as_deref(), Some("City Hall"));
    }

    #[test]
    fn directions_mode_parses_wire_names() {
        assert_eq!("transit".parse::<DirectionsMode>(), Ok(DirectionsMode::Transit));
        assert!("teleport".parse::<DirectionsMode>().is_err());
    }
}
