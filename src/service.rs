//! Trip forecast service
//!
//! Wires geocoding, forecast fetching, and daily aggregation into the one
//! call trip screens need: a location name and a date range in, one optional
//! forecast per trip day out.

use crate::api::{ForecastSource, Geocoder, WeatherApiClient};
use crate::cache;
use crate::config::VoyagerConfig;
use crate::forecast::aggregate_daily;
use crate::models::{ResolvedPlace, TripWeather};
use crate::trip::build_date_range;
use crate::VoyagerError;
use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Combines a geocoder and a forecast source into trip weather lookups
pub struct TripForecastService<G, F> {
    geocoder: G,
    forecast_source: F,
    timezone: Tz,
    geocode_ttl: Duration,
}

impl TripForecastService<WeatherApiClient, WeatherApiClient> {
    /// Build a service backed by OpenWeatherMap for both geocoding and
    /// forecasts, configured from `config`.
    pub fn from_config(config: &VoyagerConfig) -> Result<Self> {
        let timezone = config.timezone()?;
        let geocode_ttl = Duration::from_secs(u64::from(config.cache.ttl_hours) * 3600);
        Ok(Self {
            geocoder: WeatherApiClient::new(config)?,
            forecast_source: WeatherApiClient::new(config)?,
            timezone,
            geocode_ttl,
        })
    }
}

impl<G: Geocoder, F: ForecastSource> TripForecastService<G, F> {
    /// Build a service from explicit collaborators
    pub fn new(geocoder: G, forecast_source: F, timezone: Tz, geocode_ttl: Duration) -> Self {
        Self {
            geocoder,
            forecast_source,
            timezone,
            geocode_ttl,
        }
    }

    /// Weather for a trip: resolve the location, fetch samples, aggregate.
    ///
    /// Failure modes map to data, not errors:
    /// - unresolvable location → `place: None`, full day list, empty `daily`;
    /// - forecast fetch failure → empty sample list, so `daily` comes back
    ///   empty through the normal aggregation path;
    /// - individual days without usable samples are simply absent from
    ///   `daily`.
    #[instrument(skip(self))]
    pub async fn trip_weather(
        &self,
        location_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TripWeather> {
        if location_name.trim().is_empty() {
            return Err(VoyagerError::validation("Location cannot be empty").into());
        }

        let days = build_date_range(start, end);

        let Some(place) = self.resolve_place(location_name).await else {
            info!("'{}' did not resolve, returning placeholder days", location_name);
            return Ok(TripWeather::unresolved(days));
        };

        // No retries: a failed fetch yields an empty sample list and the
        // aggregation runs through normally.
        let samples = match self
            .forecast_source
            .fetch_forecast(place.latitude, place.longitude)
            .await
        {
            Ok(samples) => samples,
            Err(e) => {
                warn!("Forecast fetch failed, continuing without samples: {e:#}");
                Vec::new()
            }
        };

        let daily = aggregate_daily(&samples, &days, self.timezone);
        info!(
            "Trip weather for '{}': {} of {} days have forecasts",
            place.name,
            daily.len(),
            days.len()
        );

        Ok(TripWeather {
            place: Some(place),
            days,
            daily,
        })
    }

    /// Resolve a location name, consulting the geocode cache first. Geocoder
    /// failures are treated like "not found" so the trip view can still
    /// render.
    async fn resolve_place(&self, name: &str) -> Option<ResolvedPlace> {
        match cache::lookup(name).await {
            Ok(Some(cached)) => return Some(cached),
            Ok(None) => {}
            Err(e) => warn!("Geocode cache lookup failed: {e:#}"),
        }

        match self.geocoder.geocode(name).await {
            Ok(Some(place)) => {
                if let Err(e) = cache::store(name, &place, self.geocode_ttl).await {
                    warn!("Failed to cache geocoding result: {e:#}");
                }
                Some(place)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Geocoding failed, treating location as unresolved: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastSample;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use chrono_tz::UTC;

    struct FixedGeocoder(Option<ResolvedPlace>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, _name: &str) -> Result<Option<ResolvedPlace>> {
            Ok(self.0.clone())
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn geocode(&self, _name: &str) -> Result<Option<ResolvedPlace>> {
            Err(anyhow!("network down"))
        }
    }

    struct FixedSource(Vec<ForecastSample>);

    #[async_trait]
    impl ForecastSource for FixedSource {
        async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> Result<Vec<ForecastSample>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ForecastSource for FailingSource {
        async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> Result<Vec<ForecastSample>> {
            Err(anyhow!("connection reset"))
        }
    }

    fn place() -> ResolvedPlace {
        ResolvedPlace {
            name: "Lisbon".to_string(),
            latitude: 38.7223,
            longitude: -9.1393,
            country: Some("PT".to_string()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(d: u32, h: u32) -> ForecastSample {
        ForecastSample {
            instant: Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap(),
            temp_celsius: 22.0,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn ttl() -> Duration {
        Duration::from_secs(3600)
    }

    #[tokio::test]
    async fn test_happy_path_aggregates_per_day() {
        let service = TripForecastService::new(
            FixedGeocoder(Some(place())),
            FixedSource(vec![sample(1, 9), sample(1, 12), sample(2, 20)]),
            UTC,
            ttl(),
        );

        let weather = service
            .trip_weather("Lisbon", date(2024, 6, 1), date(2024, 6, 2))
            .await
            .unwrap();

        assert_eq!(weather.place.as_ref().unwrap().name, "Lisbon");
        assert_eq!(weather.days.len(), 2);
        assert_eq!(weather.daily.len(), 2);
        // Noon sample preferred on the first day
        assert_eq!(
            weather.for_day(date(2024, 6, 1)).unwrap().sampled_at,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unresolvable_location_keeps_days() {
        let service = TripForecastService::new(
            FixedGeocoder(None),
            FixedSource(vec![sample(1, 12)]),
            UTC,
            ttl(),
        );

        let weather = service
            .trip_weather("Nowhereville", date(2024, 6, 1), date(2024, 6, 3))
            .await
            .unwrap();

        assert!(weather.place.is_none());
        assert_eq!(weather.days.len(), 3);
        assert!(weather.daily.is_empty());
    }

    #[tokio::test]
    async fn test_geocoder_failure_treated_as_unresolved() {
        let service =
            TripForecastService::new(FailingGeocoder, FixedSource(Vec::new()), UTC, ttl());

        let weather = service
            .trip_weather("Lisbon", date(2024, 6, 1), date(2024, 6, 1))
            .await
            .unwrap();

        assert!(weather.place.is_none());
        assert_eq!(weather.days.len(), 1);
    }

    #[tokio::test]
    async fn test_forecast_failure_yields_empty_daily() {
        let service =
            TripForecastService::new(FixedGeocoder(Some(place())), FailingSource, UTC, ttl());

        let weather = service
            .trip_weather("Lisbon", date(2024, 6, 1), date(2024, 6, 2))
            .await
            .unwrap();

        assert!(weather.place.is_some());
        assert_eq!(weather.days.len(), 2);
        assert!(weather.daily.is_empty());
    }

    #[tokio::test]
    async fn test_reversed_range_yields_empty_trip() {
        let service = TripForecastService::new(
            FixedGeocoder(Some(place())),
            FixedSource(vec![sample(1, 12)]),
            UTC,
            ttl(),
        );

        let weather = service
            .trip_weather("Lisbon", date(2024, 6, 3), date(2024, 6, 1))
            .await
            .unwrap();

        assert!(weather.days.is_empty());
        assert!(weather.daily.is_empty());
    }

    #[tokio::test]
    async fn test_empty_location_is_validation_error() {
        let service =
            TripForecastService::new(FixedGeocoder(None), FixedSource(Vec::new()), UTC, ttl());

        let result = service
            .trip_weather("   ", date(2024, 6, 1), date(2024, 6, 2))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid input"));
    }
}
