//! Infrastructure layer with external service adapters.

/// CareConnect REST client.
pub mod api;
/// Application configuration.
pub mod config;
/// Geocoding adapters.
pub mod geocoding;
/// Session storage adapters.
pub mod storage;

pub use api::CareConnectClient;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use geocoding::NominatimClient;
pub use storage::KeyringSessionStorage;
