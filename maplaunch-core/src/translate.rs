//! Turns launch requests into something the platform can open.

use crate::error::LaunchError;
use crate::model::{LaunchRequest, MapProvider};
use crate::ports::NativeCapabilities;

/// Title given to a native directions destination without one.
pub const DEFAULT_DESTINATION_TITLE: &str = "Destination";
/// Title given to an explicit native directions origin without one.
pub const DEFAULT_ORIGIN_TITLE: &str = "Origin";
/// Visible region around a native marker.
pub const MARKER_SPAN: MapSpan = MapSpan {
    latitude_delta: 0.01,
    longitude_delta: 0.02,
};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Parse a pair of decimal-degree strings.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::InvalidCoordinate`] naming the first field that is
    /// not a finite floating-point number.
    pub fn parse(
        latitude: (&'static str, &str),
        longitude: (&'static str, &str),
    ) -> Result<Self, LaunchError> {
        Ok(Self {
            latitude: parse_degrees(latitude.0, latitude.1)?,
            longitude: parse_degrees(longitude.0, longitude.1)?,
        })
    }
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, LaunchError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| LaunchError::InvalidCoordinate {
            field,
            value: raw.to_owned(),
        })
}

/// Extent of a map region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSpan {
    /// North-south extent.
    pub latitude_delta: f64,
    /// East-west extent.
    pub longitude_delta: f64,
}

/// A named point handed to the native map API.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    /// Location of the point.
    pub coordinate: Coordinate,
    /// Label shown in the map app.
    pub name: String,
}

/// Where native directions start.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeOrigin {
    /// The device's current location.
    CurrentLocation,
    /// An explicit point.
    Item(MapItem),
}

/// Transport modes of the native map API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// By car.
    Driving,
    /// On foot.
    Walking,
    /// Public transport.
    Transit,
    /// Left to the map app.
    Default,
}

/// Structured payload for the platform's own map app.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeLaunch {
    /// Show a single point centered in a region.
    Marker {
        /// The point to show.
        item: MapItem,
        /// Size of the visible region around the point.
        span: MapSpan,
    },
    /// Show a route.
    Directions {
        /// Route start.
        origin: NativeOrigin,
        /// Route end.
        destination: MapItem,
        /// Transport mode.
        mode: TransportMode,
    },
}

/// Result of translating a request for a specific provider.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchTarget {
    /// Open a deep link in an explicitly addressed app.
    Url {
        /// Deep link, passed through from the caller.
        url: String,
        /// Package name or URL-scheme prefix of the app.
        app_identifier: String,
    },
    /// Call the platform's native map API.
    Native(NativeLaunch),
}

/// Map a requested directions mode onto the native transport modes.
///
/// Unknown or missing modes fall back to the platform default, or driving when
/// the platform has no default mode.
#[must_use]
pub fn transport_mode(requested: Option<&str>, capabilities: NativeCapabilities) -> TransportMode {
    match requested {
        Some("driving") => TransportMode::Driving,
        Some("walking") => TransportMode::Walking,
        Some("transit") if capabilities.transit => TransportMode::Transit,
        Some("transit") => TransportMode::Driving,
        _ if capabilities.default_mode => TransportMode::Default,
        _ => TransportMode::Driving,
    }
}

/// Build the launch target for `request` on `provider`.
///
/// `app_identifier` is the provider's identifier on the active platform.
///
/// # Errors
///
/// Returns [`LaunchError::InvalidCoordinate`] when the provider uses the
/// native API and a coordinate cannot be parsed.
pub fn translate(
    provider: &MapProvider,
    app_identifier: &str,
    request: &LaunchRequest,
    capabilities: NativeCapabilities,
) -> Result<LaunchTarget, LaunchError> {
    if !provider.has_native_api {
        return Ok(LaunchTarget::Url {
            url: request.url().to_owned(),
            app_identifier: app_identifier.to_owned(),
        });
    }

    let launch = match request {
        LaunchRequest::ShowMarker {
            title,
            latitude,
            longitude,
            ..
        } => NativeLaunch::Marker {
            item: MapItem {
                coordinate: Coordinate::parse(("latitude", latitude), ("longitude", longitude))?,
                name: title.clone(),
            },
            span: MARKER_SPAN,
        },
        LaunchRequest::ShowDirections {
            destination,
            origin,
            directions_mode,
            ..
        } => {
            let destination = MapItem {
                coordinate: Coordinate::parse(
                    ("destinationLatitude", &destination.latitude),
                    ("destinationLongitude", &destination.longitude),
                )?,
                name: destination
                    .title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DESTINATION_TITLE.to_owned()),
            };
            let origin = match origin.coordinates() {
                Some((latitude, longitude)) => NativeOrigin::Item(MapItem {
                    coordinate: Coordinate::parse(
                        ("originLatitude", latitude),
                        ("originLongitude", longitude),
                    )?,
                    name: origin
                        .title
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ORIGIN_TITLE.to_owned()),
                }),
                None => NativeOrigin::CurrentLocation,
            };
            NativeLaunch::Directions {
                origin,
                destination,
                mode: transport_mode(directions_mode.as_deref(), capabilities),
            }
        }
    };

    Ok(LaunchTarget::Native(launch))
}
