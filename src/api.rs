//! Weather and place API clients
//!
//! This module provides HTTP client functionality for the OpenWeatherMap
//! forecast and geocoding endpoints and the Nominatim place search, behind
//! narrow traits so the service layer can be tested without the network.
//!
//! There is deliberately no retry or backoff: a failed call surfaces as an
//! error and the caller renders an empty result set for it.

use crate::VoyagerError;
use crate::config::VoyagerConfig;
use crate::models::{ForecastSample, PlaceCandidate, ResolvedPlace, ViewBox};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Resolves a free-text location name to coordinates.
///
/// `Ok(None)` means the name could not be resolved; that is an expected
/// outcome, not an error.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, name: &str) -> Result<Option<ResolvedPlace>>;
}

/// Fetches raw three-hourly forecast samples for a coordinate pair,
/// chronologically ordered, covering roughly five days.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastSample>>;
}

/// Free-text place search returning ranked candidates.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str, bias: Option<ViewBox>) -> Result<Vec<PlaceCandidate>>;
}

/// Client for the OpenWeatherMap forecast and direct-geocoding endpoints
#[derive(Debug)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &VoyagerConfig) -> Result<Self> {
        let api_key = config.weather.api_key.clone().ok_or_else(|| {
            VoyagerError::config(
                "OpenWeatherMap API key is required. Set weather.api_key in the config file \
                 or the VOYAGER_WEATHER__API_KEY environment variable.",
            )
        })?;

        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("Voyager/{}", crate::VERSION))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ForecastSource for WeatherApiClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastSample>> {
        info!(
            "Fetching 5-day forecast for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );

        let url = format!(
            "{}/data/2.5/forecast?lat={latitude}&lon={longitude}&units=metric&appid={}",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Forecast request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast request returned HTTP {}", status);
            return Err(VoyagerError::api(format!(
                "Forecast request failed with status: {status}"
            ))
            .into());
        }

        let payload: owm::ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap forecast response")?;

        let samples = payload.into_samples();
        info!("Retrieved {} forecast samples", samples.len());
        Ok(samples)
    }
}

#[async_trait]
impl Geocoder for WeatherApiClient {
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Option<ResolvedPlace>> {
        info!("Geocoding location: '{}'", name);

        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(name),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Geocoding request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding request returned HTTP {}", status);
            return Err(VoyagerError::api(format!(
                "Geocoding request failed with status: {status}"
            ))
            .into());
        }

        let results: Vec<owm::GeoEntry> = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap geocoding response")?;

        if results.is_empty() {
            debug!("No geocoding results for '{}'", name);
        }
        Ok(results.into_iter().next().map(ResolvedPlace::from))
    }
}

/// Client for the Nominatim free-text place search
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new place search client.
    ///
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub fn new(config: &VoyagerConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("Voyager/{}", crate::VERSION))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.search.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, bias: Option<ViewBox>) -> Result<Vec<PlaceCandidate>> {
        info!("Searching places for: '{}'", query);

        let mut url = format!(
            "{}/search?q={}&format=json&limit=10",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(vb) = bias {
            url.push_str(&format!(
                "&viewbox={},{},{},{}",
                vb.min_longitude, vb.min_latitude, vb.max_longitude, vb.max_latitude
            ));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Place search request failed")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Place search returned HTTP {}", status);
            return Err(VoyagerError::api(format!(
                "Place search failed with status: {status}"
            ))
            .into());
        }

        let places: Vec<nominatim::Place> = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim search response")?;

        let candidates: Vec<PlaceCandidate> = places
            .into_iter()
            .filter_map(nominatim::Place::into_candidate)
            .collect();

        info!("Found {} place candidates for '{}'", candidates.len(), query);
        Ok(candidates)
    }
}

/// OpenWeatherMap API response structures and conversion utilities
mod owm {
    use super::{ForecastSample, ResolvedPlace};
    use chrono::{TimeZone, Utc};
    use serde::Deserialize;

    /// 5-day/3-hour forecast response from OpenWeatherMap
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        /// Unix timestamp of the sample
        pub dt: i64,
        pub main: MainData,
        #[serde(default)]
        pub weather: Vec<ConditionData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionData {
        pub main: String,
        pub description: String,
        pub icon: String,
    }

    impl ForecastResponse {
        /// Convert to internal samples. Entries with an unrepresentable
        /// timestamp are skipped rather than failing the whole response.
        #[must_use]
        pub fn into_samples(self) -> Vec<ForecastSample> {
            self.list
                .into_iter()
                .filter_map(|entry| {
                    let instant = Utc.timestamp_opt(entry.dt, 0).single()?;
                    let condition = entry.weather.into_iter().next();
                    let (main, description, icon) = match condition {
                        Some(c) => (c.main, c.description, c.icon),
                        None => ("Unknown".to_string(), String::new(), String::new()),
                    };
                    Some(ForecastSample {
                        instant,
                        temp_celsius: entry.main.temp,
                        condition: main,
                        description,
                        icon,
                    })
                })
                .collect()
        }
    }

    /// Direct-geocoding entry from OpenWeatherMap
    #[derive(Debug, Deserialize)]
    pub struct GeoEntry {
        pub name: String,
        pub lat: f64,
        pub lon: f64,
        pub country: Option<String>,
        pub state: Option<String>,
    }

    impl From<GeoEntry> for ResolvedPlace {
        fn from(entry: GeoEntry) -> Self {
            let name = match &entry.state {
                Some(state) => format!("{}, {}", entry.name, state),
                None => entry.name,
            };
            ResolvedPlace {
                name,
                latitude: entry.lat,
                longitude: entry.lon,
                country: entry.country,
            }
        }
    }
}

/// Nominatim response structures
mod nominatim {
    use super::PlaceCandidate;
    use serde::Deserialize;

    /// One search hit. Nominatim serializes coordinates as strings.
    #[derive(Debug, Deserialize)]
    pub struct Place {
        pub display_name: String,
        pub lat: String,
        pub lon: String,
    }

    impl Place {
        /// Parse coordinates; hits with malformed coordinates are dropped.
        #[must_use]
        pub fn into_candidate(self) -> Option<PlaceCandidate> {
            let latitude = self.lat.parse::<f64>().ok()?;
            let longitude = self.lon.parse::<f64>().ok()?;
            Some(PlaceCandidate {
                display_name: self.display_name,
                latitude,
                longitude,
            })
        }
    }
}
