use std::sync::Arc;

use chrono::{DateTime, Local};
use maplaunch_core::{
    model::{Availability, ProviderInfo, ShowDirectionsParams, ShowMarkerParams},
    service::MapLauncherService,
};
use maplaunch_deeplink::{DirectionsLink, DirectionsMode, LatLng, MarkerLink};

use crate::config::RequestDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    ProviderSelect,
    RequestForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Title,
    Description,
    Latitude,
    Longitude,
    OriginLatitude,
    OriginLongitude,
    Mode,
}

impl Field {
    pub(crate) const ALL: [Field; 7] = [
        Field::Title,
        Field::Description,
        Field::Latitude,
        Field::Longitude,
        Field::OriginLatitude,
        Field::OriginLongitude,
        Field::Mode,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
            Field::OriginLatitude => "Origin latitude",
            Field::OriginLongitude => "Origin longitude",
            Field::Mode => "Directions mode",
        }
    }

    fn position(self) -> usize {
        Field::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    pub(crate) fn next(self) -> Self {
        Field::ALL
            .get((self.position() + 1) % Field::ALL.len())
            .copied()
            .unwrap_or(self)
    }

    pub(crate) fn previous(self) -> Self {
        Field::ALL
            .get((self.position() + Field::ALL.len() - 1) % Field::ALL.len())
            .copied()
            .unwrap_or(self)
    }
}

/// A launch that reached the platform.
#[derive(Debug, Clone)]
pub(crate) struct LaunchRecord {
    pub at: DateTime<Local>,
    pub provider: String,
    pub action: &'static str,
}

pub(crate) struct App {
    pub service: Arc<MapLauncherService>,

    pub screen: Screen,
    pub providers: Vec<Availability>,
    pub provider_index: usize,
    pub selected: Option<ProviderInfo>,

    pub title: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub origin_latitude: String,
    pub origin_longitude: String,
    pub mode: DirectionsMode,
    pub zoom: u8,
    pub focus: Field,

    pub history: Vec<LaunchRecord>,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<MapLauncherService>, defaults: &RequestDefaults) -> Self {
        let providers = service.availability();
        Self {
            service,
            screen: Screen::ProviderSelect,
            providers,
            provider_index: 0,
            selected: None,
            title: defaults.title.clone(),
            description: String::new(),
            latitude: defaults.latitude.clone(),
            longitude: defaults.longitude.clone(),
            origin_latitude: String::new(),
            origin_longitude: String::new(),
            mode: defaults.mode,
            zoom: defaults.zoom,
            focus: Field::Title,
            history: Vec::new(),
            error_message: None,
        }
    }

    pub(crate) fn refresh_providers(&mut self) {
        self.providers = self.service.availability();
        if self.provider_index >= self.providers.len() {
            self.provider_index = self.providers.len().saturating_sub(1);
        }
    }

    pub(crate) fn select_current_provider(&mut self) {
        if let Some(entry) = self.providers.get(self.provider_index) {
            self.selected = Some(entry.provider.clone());
            self.screen = Screen::RequestForm;
            self.focus = Field::Title;
        }
    }

    pub(crate) fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Latitude => &self.latitude,
            Field::Longitude => &self.longitude,
            Field::OriginLatitude => &self.origin_latitude,
            Field::OriginLongitude => &self.origin_longitude,
            Field::Mode => self.mode.as_str(),
        }
    }

    /// Text buffer behind the focused field; the mode field is not free text.
    pub(crate) fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Latitude => Some(&mut self.latitude),
            Field::Longitude => Some(&mut self.longitude),
            Field::OriginLatitude => Some(&mut self.origin_latitude),
            Field::OriginLongitude => Some(&mut self.origin_longitude),
            Field::Mode => None,
        }
    }

    pub(crate) fn cycle_mode(&mut self, forward: bool) {
        let modes = DirectionsMode::ALL;
        let current = modes
            .iter()
            .position(|mode| *mode == self.mode)
            .unwrap_or_default();
        let next = if forward {
            (current + 1) % modes.len()
        } else {
            (current + modes.len() - 1) % modes.len()
        };
        if let Some(mode) = modes.get(next) {
            self.mode = *mode;
        }
    }

    pub(crate) fn marker_params(&self, provider: &ProviderInfo) -> Result<ShowMarkerParams, String> {
        let coords = LatLng::new(
            parse_degrees("Latitude", &self.latitude)?,
            parse_degrees("Longitude", &self.longitude)?,
        );
        let description = self.description.trim();
        let link = MarkerLink {
            description: (!description.is_empty()).then(|| description.to_owned()),
            zoom: self.zoom,
            ..MarkerLink::new(coords, self.title.trim())
        };
        Ok(link.params(provider.map_type, self.service.platform()))
    }

    pub(crate) fn directions_params(
        &self,
        provider: &ProviderInfo,
    ) -> Result<ShowDirectionsParams, String> {
        let destination = LatLng::new(
            parse_degrees("Latitude", &self.latitude)?,
            parse_degrees("Longitude", &self.longitude)?,
        );
        let origin = match (self.origin_latitude.trim(), self.origin_longitude.trim()) {
            ("", "") => None,
            (latitude, longitude) if !latitude.is_empty() && !longitude.is_empty() => {
                Some(LatLng::new(
                    parse_degrees("Origin latitude", latitude)?,
                    parse_degrees("Origin longitude", longitude)?,
                ))
            }
            _ => return Err("Enter both origin coordinates or leave both empty".to_owned()),
        };

        let title = self.title.trim();
        let link = DirectionsLink {
            destination_title: (!title.is_empty()).then(|| title.to_owned()),
            origin,
            mode: self.mode,
            ..DirectionsLink::to(destination)
        };
        Ok(link.params(provider.map_type, self.service.platform()))
    }

    pub(crate) fn record_launch(&mut self, provider: &ProviderInfo, action: &'static str) {
        self.history.push(LaunchRecord {
            at: Local::now(),
            provider: provider.display_name.clone(),
            action,
        });
    }
}

fn parse_degrees(label: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| format!("{label} must be a decimal number, got {raw:?}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use maplaunch_core::{
        catalogue::ProviderCatalogue,
        model::{MapType, Platform},
        ports::{PlatformError, PlatformLauncher},
    };

    use super::*;

    struct StubLauncher {
        installed: Vec<&'static str>,
    }

    impl PlatformLauncher for StubLauncher {
        fn platform(&self) -> Platform {
            Platform::Android
        }

        fn is_installed(&self, app_identifier: &str) -> Result<bool, PlatformError> {
            Ok(self.installed.contains(&app_identifier))
        }

        fn open_url(&self, _url: &str, _app_identifier: &str) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    pub(crate) fn android_app(installed: Vec<&'static str>) -> App {
        let service = MapLauncherService::new(
            Arc::new(ProviderCatalogue::standard()),
            Arc::new(StubLauncher { installed }),
        );
        App::new(Arc::new(service), &RequestDefaults::default())
    }

    fn waze(app: &App) -> ProviderInfo {
        app.providers
            .iter()
            .map(|entry| entry.provider.clone())
            .find(|provider| provider.map_type == MapType::Waze)
            .expect("waze is in the Android catalogue")
    }

    #[test]
    fn field_focus_wraps_around() {
        assert_eq!(Field::Mode.next(), Field::Title);
        assert_eq!(Field::Title.previous(), Field::Mode);
        assert_eq!(Field::Latitude.next(), Field::Longitude);
    }

    #[test]
    fn degrees_must_be_finite_numbers() {
        assert_eq!(parse_degrees("Latitude", " 37.5 "), Ok(37.5));
        assert!(parse_degrees("Latitude", "north").is_err());
        assert!(parse_degrees("Longitude", "NaN").is_err());
    }

    #[test]
    fn starts_with_the_availability_of_every_android_provider() {
        let app = android_app(vec!["com.waze"]);
        assert_eq!(app.screen, Screen::ProviderSelect);
        assert!(!app.providers.is_empty());
        assert!(
            app.providers
                .iter()
                .any(|entry| entry.is_installed && entry.provider.map_type == MapType::Waze)
        );
        assert!(
            app.providers
                .iter()
                .all(|entry| entry.provider.map_type != MapType::Apple)
        );
    }

    #[test]
    fn marker_params_carry_the_form_values() {
        let app = android_app(vec!["com.waze"]);
        let params = app.marker_params(&waze(&app)).expect("default form is valid");
        assert_eq!(params.map_type, "waze");
        assert_eq!(params.title, "Ferry Building");
        assert_eq!(params.latitude, "37.7955");
        assert!(params.url.starts_with("waze://"));
    }

    #[test]
    fn marker_description_reaches_apps_that_show_one() {
        let mut app = android_app(vec!["com.baidu.BaiduMap"]);
        let baidu = app
            .providers
            .iter()
            .map(|entry| entry.provider.clone())
            .find(|provider| provider.map_type == MapType::Baidu)
            .expect("baidu is in the Android catalogue");

        let without = app.marker_params(&baidu).expect("default form is valid");
        assert!(!without.url.contains("content="));

        app.description = "Ferry terminal".to_owned();
        let with = app.marker_params(&baidu).expect("default form is valid");
        assert!(with.url.contains("content=Ferry%20terminal"));
    }

    #[test]
    fn directions_need_both_origin_coordinates() {
        let mut app = android_app(vec!["com.waze"]);
        let provider = waze(&app);
        app.origin_latitude = "37.8044".to_owned();
        assert!(app.directions_params(&provider).is_err());

        app.origin_longitude = "-122.2712".to_owned();
        let params = app
            .directions_params(&provider)
            .expect("both origin coordinates are set");
        assert_eq!(params.origin_latitude.as_deref(), Some("37.8044"));
        assert_eq!(params.destination_title.as_deref(), Some("Ferry Building"));
    }

    #[test]
    fn mode_cycles_in_both_directions() {
        let mut app = android_app(Vec::new());
        app.cycle_mode(true);
        assert_eq!(app.mode, DirectionsMode::Walking);
        app.cycle_mode(false);
        app.cycle_mode(false);
        assert_eq!(app.mode, DirectionsMode::Bicycling);
    }
}
