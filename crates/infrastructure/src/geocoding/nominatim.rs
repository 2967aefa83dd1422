use async_trait::async_trait;
use domain::{Coordinates, DomainError, Geocoder};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("blood-connect/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One entry of a Nominatim `/search?format=json` response. Coordinates
/// arrive as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Resolves place names through a Nominatim-compatible search endpoint,
/// e.g. `https://nominatim.openstreetmap.org/search`.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn first_match(places: &[Place]) -> Option<Coordinates> {
    let place = places.first()?;
    let latitude = place.lat.trim().parse::<f64>().ok()?;
    let longitude = place.lon.trim().parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude)
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, place: &str) -> Result<Option<Coordinates>, DomainError> {
        debug!("Geocoding '{}'", place);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| DomainError::NetworkError(format!("Geocoder request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::NetworkError(format!(
                "Geocoder HTTP error: {}",
                response.status()
            )));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| DomainError::NetworkError(format!("Invalid geocoder response: {}", e)))?;

        Ok(first_match(&places))
    }
}
