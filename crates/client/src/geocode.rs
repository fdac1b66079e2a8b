use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use studyconnect_core::{
    errors::{StudyError, StudyResult},
    models::user::Coordinate,
    store::Geocoder,
};

#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: String,
    lon: String,
}

/// Parses a Nominatim-style search response, taking the first place.
pub fn parse_search_response(body: &str) -> StudyResult<Coordinate> {
    let places: Vec<SearchPlace> = serde_json::from_str(body)
        .map_err(|e| StudyError::Geocode(format!("Unexpected geocoder response: {}", e)))?;
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| StudyError::Geocode("No match".to_string()))?;

    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| StudyError::Geocode(format!("Invalid coordinate value: {}", raw)))
    };
    Coordinate::new(parse(&place.lat)?, parse(&place.lon)?)
        .map_err(|e| StudyError::Geocode(e.to_string()))
}

/// Geocoder backed by a Nominatim-compatible HTTP search endpoint.
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeocoder {
    pub fn new(base_url: &str, timeout: Duration) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("studyconnect/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, location: &str) -> StudyResult<Coordinate> {
        tracing::debug!("Geocoding {:?}", location);

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StudyError::Geocode(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StudyError::Geocode(format!(
                "Geocoder returned {} for {:?}",
                response.status(),
                location
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StudyError::Geocode(e.to_string()))?;
        parse_search_response(&body)
    }
}

/// Used when no geocoder is configured: every text location fails, so only
/// users with stored coordinates get pins.
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, _location: &str) -> StudyResult<Coordinate> {
        Err(StudyError::Geocode("Geocoding is not configured".to_string()))
    }
}
