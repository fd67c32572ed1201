//! Integration tests driving the trip forecast pipeline end to end through
//! the public API, with in-memory collaborators standing in for the network.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::UTC;
use std::time::Duration;
use voyager::api::{ForecastSource, Geocoder};
use voyager::models::{ForecastSample, ResolvedPlace};
use voyager::service::TripForecastService;

struct StaticGeocoder;

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<ResolvedPlace>> {
        if name == "Lisbon" {
            Ok(Some(ResolvedPlace {
                name: "Lisbon".to_string(),
                latitude: 38.7223,
                longitude: -9.1393,
                country: Some("PT".to_string()),
            }))
        } else {
            Ok(None)
        }
    }
}

struct StaticSource(Vec<ForecastSample>);

#[async_trait]
impl ForecastSource for StaticSource {
    async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> Result<Vec<ForecastSample>> {
        Ok(self.0.clone())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample(m: u32, d: u32, h: u32, temp: f32) -> ForecastSample {
    ForecastSample {
        instant: Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap(),
        temp_celsius: temp,
        condition: "Clear".to_string(),
        description: format!("sample {d:02}-{h:02}"),
        icon: "01d".to_string(),
    }
}

fn service(samples: Vec<ForecastSample>) -> TripForecastService<StaticGeocoder, StaticSource> {
    TripForecastService::new(
        StaticGeocoder,
        StaticSource(samples),
        UTC,
        Duration::from_secs(3600),
    )
}

/// The three-day scenario: noon preference on day one, lone-sample install
/// on day two, gap fill on day three.
#[tokio::test]
async fn three_day_trip_covers_noon_preference_and_gap_fill() {
    let samples = vec![
        sample(6, 1, 9, 17.0),
        sample(6, 1, 13, 21.0),
        sample(6, 2, 20, 15.0),
    ];

    let weather = service(samples)
        .trip_weather("Lisbon", date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();

    assert_eq!(weather.days.len(), 3);
    assert_eq!(weather.daily.len(), 3);

    // Day 1: the 13:00 sample wins over the 09:00 one
    let day1 = weather.for_day(date(2024, 6, 1)).unwrap();
    assert_eq!(day1.temp_celsius, 21.0);

    // Day 2: only one sample, installed in pass 1 despite being off-noon
    let day2 = weather.for_day(date(2024, 6, 2)).unwrap();
    assert_eq!(day2.temp_celsius, 15.0);

    // Day 3: no direct sample; 06-02 20:00 is 16h from 06-03 noon, so it
    // gap-fills
    let day3 = weather.for_day(date(2024, 6, 3)).unwrap();
    assert_eq!(day3.sampled_at, Utc.with_ymd_and_hms(2024, 6, 2, 20, 0, 0).unwrap());
    assert_eq!(day3.date, date(2024, 6, 3));
}

/// A trip day far beyond the forecast horizon stays absent; the caller
/// renders a placeholder instead of crashing on a missing lookup.
#[tokio::test]
async fn days_beyond_forecast_horizon_are_absent() {
    let samples = vec![sample(6, 1, 12, 20.0)];

    let weather = service(samples)
        .trip_weather("Lisbon", date(2024, 6, 1), date(2024, 6, 6))
        .await
        .unwrap();

    assert_eq!(weather.days.len(), 6);
    // 06-01 direct, 06-02 gap-filled (24h from noon); the rest are absent
    assert!(weather.for_day(date(2024, 6, 1)).is_some());
    assert!(weather.for_day(date(2024, 6, 2)).is_some());
    for day in 3..=6 {
        assert!(weather.for_day(date(2024, 6, day)).is_none());
    }
}

/// An unknown location still yields the trip's day list so the UI can show
/// "no weather available" per day.
#[tokio::test]
async fn unknown_location_yields_placeholder_days() {
    let weather = service(vec![sample(6, 1, 12, 20.0)])
        .trip_weather("Atlantis", date(2024, 6, 1), date(2024, 6, 3))
        .await
        .unwrap();

    assert!(weather.place.is_none());
    assert_eq!(weather.days.len(), 3);
    assert!(weather.daily.is_empty());
}

/// Reversed date ranges are "nothing to plan", not errors.
#[tokio::test]
async fn reversed_range_is_empty_not_an_error() {
    let weather = service(vec![])
        .trip_weather("Lisbon", date(2024, 6, 5), date(2024, 6, 1))
        .await
        .unwrap();

    assert!(weather.days.is_empty());
    assert!(weather.daily.is_empty());
}
