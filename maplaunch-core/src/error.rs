//! Errors surfaced to callers of the launch service.

use crate::model::MapType;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can occur while resolving or launching a provider.
pub enum LaunchError {
    /// The provider identifier is not part of the catalogue.
    #[error("Unknown map type: {0}")]
    UnknownProvider(String),
    /// The provider is known but not installed on the device.
    #[error("Map is not installed on a device")]
    MapNotAvailable(MapType),
    /// A coordinate could not be read as a decimal degree.
    #[error("Invalid {field}: {value:?}")]
    InvalidCoordinate {
        /// Name of the offending request field.
        field: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },
    /// A catalogue was built with the same provider twice.
    #[error("Duplicate provider in catalogue: {0}")]
    DuplicateProvider(MapType),
}

impl LaunchError {
    /// Stable machine-readable code for channel layers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LaunchError::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            LaunchError::MapNotAvailable(_) => "MAP_NOT_AVAILABLE",
            LaunchError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            LaunchError::DuplicateProvider(_) => "DUPLICATE_PROVIDER",
        }
    }

    /// Human-readable message matching [`LaunchError::code`].
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
