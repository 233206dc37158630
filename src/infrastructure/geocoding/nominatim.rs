//! Nominatim (OpenStreetMap) geocoding adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::Coordinates;
use crate::domain::errors::GeocodeError;
use crate::domain::ports::{GeocodeMatch, GeocodingPort};

/// Public Nominatim instance.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!(
    "careconnect/",
    env!("CARGO_PKG_VERSION"),
    " (+https://careconnect.unikloh.icu)"
);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocoder backed by a Nominatim server.
pub struct NominatimClient {
    client: Client,
    base_url: String,
    contact_email: Option<String>,
}

impl NominatimClient {
    /// Creates a client for `base_url`. The contact email is sent with every
    /// request as the usage policy asks.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        contact_email: Option<String>,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeocodeError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            contact_email: contact_email.filter(|e| !e.trim().is_empty()),
        })
    }

    /// Query string for a forward lookup.
    #[must_use]
    pub fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", query.to_string()),
            ("limit", "1".to_string()),
        ];
        self.push_email(&mut params);
        params
    }

    /// Query string for a reverse lookup.
    #[must_use]
    pub fn reverse_params(&self, coordinates: Coordinates) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("lat", coordinates.lat.to_string()),
            ("lon", coordinates.lng.to_string()),
        ];
        self.push_email(&mut params);
        params
    }

    fn push_email(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(email) = &self.contact_email {
            params.push(("email", email.clone()));
        }
    }

    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> Result<String, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/{path}", self.base_url))
            .query(params)
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))
    }
}

/// Parses a `/search` body into its first hit.
///
/// # Errors
/// Returns a decode error for malformed JSON or coordinates.
pub fn parse_search(body: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let lat = hit
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Decode(format!("lat: {e}")))?;
    let lng = hit
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Decode(format!("lon: {e}")))?;

    let coordinates = Coordinates::new(lat, lng);
    if !coordinates.is_valid() {
        return Err(GeocodeError::Decode(format!("coordinates out of range: {lat}, {lng}")));
    }

    Ok(Some(GeocodeMatch {
        label: hit.display_name,
        coordinates,
    }))
}

/// Parses a `/reverse` body into its label. Nominatim answers unknown spots
/// with `{"error": ...}`, which yields `None`.
///
/// # Errors
/// Returns a decode error for malformed JSON.
pub fn parse_reverse(body: &str) -> Result<Option<String>, GeocodeError> {
    let hit: ReverseHit =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
    Ok(hit.display_name.filter(|name| !name.trim().is_empty()))
}

#[async_trait]
impl GeocodingPort for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
        debug!(query, "Forward geocoding");
        let body = self.get("search", &self.search_params(query)).await?;
        parse_search(&body)
    }

    async fn reverse(&self, coordinates: Coordinates) -> Result<Option<String>, GeocodeError> {
        debug!(coordinates = %coordinates, "Reverse geocoding");
        let body = self.get("reverse", &self.reverse_params(coordinates)).await?;
        parse_reverse(&body)
    }
}
