//! Configuration loading for the terminal UI.
//!
//! The configuration is stored in TOML format and defines:
//! - which platform backend to talk to and how to reach it
//! - the values the request form starts with
//! - where log output goes

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use maplaunch_deeplink::DirectionsMode;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit configuration file.
pub(crate) const CONFIG_ENV: &str = "MAPLAUNCH_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "maplaunch.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Backend used to query and launch apps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PlatformKind {
    /// A device or emulator reached over adb.
    #[default]
    Android,
    /// A simulator reached over `xcrun simctl`.
    IosSimulator,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct PlatformConfig {
    pub kind: PlatformKind,
    /// Path to the `adb` binary.
    pub adb: PathBuf,
    /// Device serial; the only attached device when unset.
    pub serial: Option<String>,
    /// Path to the `xcrun` binary.
    pub xcrun: PathBuf,
    /// Simulator UDID or name; the booted simulator when unset.
    pub device: Option<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            kind: PlatformKind::default(),
            adb: PathBuf::from("adb"),
            serial: None,
            xcrun: PathBuf::from("xcrun"),
            device: None,
        }
    }
}

/// Initial contents of the request form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct RequestDefaults {
    pub title: String,
    pub latitude: String,
    pub longitude: String,
    pub zoom: u8,
    pub mode: DirectionsMode,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            title: "Ferry Building".to_owned(),
            latitude: "37.7955".to_owned(),
            longitude: "-122.3937".to_owned(),
            zoom: 16,
            mode: DirectionsMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// Log file; the terminal itself is taken by the UI.
    pub file: PathBuf,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("maplaunch.log"),
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub platform: PlatformConfig,
    pub request: RequestDefaults,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `maplaunch.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub(crate) fn parse(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=21).contains(&self.request.zoom) {
            return Err(ConfigError::Validation(format!(
                "request.zoom must be between 1 and 21, got {}",
                self.request.zoom
            )));
        }
        if self.logging.file.file_name().is_none() {
            return Err(ConfigError::Validation(format!(
                "logging.file must name a file, got {}",
                self.logging.file.display()
            )));
        }
        Ok(())
    }
}
