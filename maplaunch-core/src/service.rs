//! High-level service facade exposing the caller-facing operations.

use std::sync::Arc;

use tracing::debug;

use crate::availability::AvailabilityChecker;
use crate::catalogue::ProviderCatalogue;
use crate::dispatch;
use crate::error::LaunchError;
use crate::model::{
    Availability, LaunchRequest, MapType, Platform, ProviderInfo, ShowDirectionsParams,
    ShowMarkerParams,
};
use crate::ports::PlatformLauncher;
use crate::translate;

/// Public entry point for listing and launching map apps.
pub struct MapLauncherService {
    catalogue: Arc<ProviderCatalogue>,
    launcher: Arc<dyn PlatformLauncher>,
}

impl MapLauncherService {
    /// Create a new service bound to the provided catalogue and platform.
    #[must_use]
    pub fn new(catalogue: Arc<ProviderCatalogue>, launcher: Arc<dyn PlatformLauncher>) -> Self {
        Self {
            catalogue,
            launcher,
        }
    }

    /// Platform the service launches on.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.launcher.platform()
    }

    /// Every provider that exists on the platform, installed or not.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderInfo> {
        self.catalogue.infos(self.platform())
    }

    /// Install state of every provider on the platform.
    #[must_use]
    pub fn availability(&self) -> Vec<Availability> {
        self.checker().availability()
    }

    /// Installed providers in catalogue order (`getInstalledMaps`).
    #[must_use]
    pub fn installed_maps(&self) -> Vec<ProviderInfo> {
        let platform = self.platform();
        self.checker()
            .list_installed()
            .into_iter()
            .filter_map(|provider| provider.info(platform))
            .collect()
    }

    /// Whether the provider named `map_type` is installed (`isMapAvailable`).
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::UnknownProvider`] if the name is not in the catalogue.
    pub fn is_map_available(&self, map_type: &str) -> Result<bool, LaunchError> {
        let provider = self.catalogue.resolve(map_type)?;
        Ok(self.checker().is_installed(provider))
    }

    /// Show a titled point in the requested app (`showMarker`).
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::UnknownProvider`] for unknown names,
    /// [`LaunchError::MapNotAvailable`] if the app is not installed, and
    /// [`LaunchError::InvalidCoordinate`] if a native launch gets bad coordinates.
    pub fn show_marker(&self, params: ShowMarkerParams) -> Result<(), LaunchError> {
        let map_type = params.map_type.clone();
        self.launch(&map_type, |provider| params.into_request(provider))
    }

    /// Show directions in the requested app (`showDirections`).
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::UnknownProvider`] for unknown names,
    /// [`LaunchError::MapNotAvailable`] if the app is not installed, and
    /// [`LaunchError::InvalidCoordinate`] if a native launch gets bad coordinates.
    pub fn show_directions(&self, params: ShowDirectionsParams) -> Result<(), LaunchError> {
        let map_type = params.map_type.clone();
        self.launch(&map_type, |provider| params.into_request(provider))
    }

    fn launch<F>(&self, raw_type: &str, build: F) -> Result<(), LaunchError>
    where
        F: FnOnce(MapType) -> LaunchRequest,
    {
        let provider = self.catalogue.resolve(raw_type)?;
        if !self.checker().is_installed(provider) {
            return Err(LaunchError::MapNotAvailable(provider.map_type));
        }
        let identifier = provider
            .identifier(self.platform())
            .ok_or(LaunchError::MapNotAvailable(provider.map_type))?;

        let request = build(provider.map_type);
        let target =
            translate::translate(provider, identifier, &request, self.launcher.capabilities())?;
        debug!(provider = %provider.map_type, ?target, "Translated launch request");

        dispatch::launch(self.launcher.as_ref(), provider, &target);
        Ok(())
    }

    fn checker(&self) -> AvailabilityChecker<'_> {
        AvailabilityChecker::new(&self.catalogue, self.launcher.as_ref())
    }
}
