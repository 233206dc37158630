//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::domain::entities::Coordinates;
use crate::infrastructure::api::DEFAULT_BASE_URL;
use crate::infrastructure::geocoding::DEFAULT_GEOCODER_URL;

const APP_NAME: &str = "careconnect";
const APP_QUALIFIER: &str = "id";
const APP_ORGANIZATION: &str = "careconnect";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` merged with CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Bearer token supplied on the command line or environment.
    #[serde(skip)]
    pub token: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Geocoding service.
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Location picker map.
    #[serde(default)]
    pub map: MapConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Geocoding service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim origin.
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// Contact address sent with each lookup.
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            contact_email: None,
        }
    }
}

/// Location picker map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude the picker opens on when the location has none.
    #[serde(default = "default_lat")]
    pub default_lat: f64,

    /// Longitude the picker opens on when the location has none.
    #[serde(default = "default_lng")]
    pub default_lng: f64,

    /// Zoom level the picker opens at.
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl MapConfig {
    /// Returns the default center.
    #[must_use]
    pub const fn default_center(&self) -> Coordinates {
        Coordinates::new(self.default_lat, self.default_lng)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lng: default_lng(),
            zoom: default_zoom(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Characters of description shown per activity on the home screen.
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

impl UiConfig {
    /// Returns the toast duration.
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_duration)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}

const fn default_lat() -> f64 {
    Coordinates::JAKARTA.lat
}

const fn default_lng() -> f64 {
    Coordinates::JAKARTA.lng
}

const fn default_zoom() -> u8 {
    10
}

const fn default_true() -> bool {
    true
}

const fn default_notification_duration() -> u64 {
    3
}

const fn default_excerpt_length() -> usize {
    120
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = args.base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(token) = args.token {
            self.token = Some(token);
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(geocoder_url) = args.geocoder_url {
            self.geocoder.base_url = geocoder_url;
        }
        if let Some(email) = args.contact_email {
            self.geocoder.contact_email = Some(email);
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("careconnect.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            token: None,
            log_level: LogLevel::Info,
            base_url: default_base_url(),
            mouse: true,
            geocoder: GeocoderConfig::default(),
            map: MapConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            base_url = "http://localhost:3000"

            [geocoder]
            contact_email = "ops@careconnect.id"

            [map]
            zoom = 7
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.geocoder.base_url, DEFAULT_GEOCODER_URL);
        assert_eq!(
            config.geocoder.contact_email.as_deref(),
            Some("ops@careconnect.id")
        );
        assert_eq!(config.map.zoom, 7);
        assert_eq!(config.map.default_center(), Coordinates::JAKARTA);
        assert!(config.mouse);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.base_url, "https://careconnect.unikloh.icu");
        assert_eq!(config.ui.excerpt_length, 120);
        assert_eq!(config.ui.notification_duration(), Duration::from_secs(3));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str(r#"base_url = "http://file""#).unwrap();
        let args = CliArgs::try_parse_from([
            "careconnect",
            "--base-url",
            "http://cli",
            "--mouse",
            "false",
            "--log-level",
            "debug",
        ])
        .unwrap();

        config.merge_with_args(args);

        assert_eq!(config.base_url, "http://cli");
        assert!(!config.mouse);
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
