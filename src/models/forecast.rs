//! Forecast sample and daily forecast models

use super::ResolvedPlace;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw weather observation at a fixed ~3-hour cadence
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSample {
    /// Instant this sample applies to
    pub instant: DateTime<Utc>,
    /// Temperature in Celsius
    pub temp_celsius: f32,
    /// Condition category (e.g. "Clear", "Rain")
    pub condition: String,
    /// Free-text description of the conditions
    pub description: String,
    /// Weather icon code from the API
    pub icon: String,
}

/// The single representative sample chosen for a calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Calendar day this forecast represents
    pub date: NaiveDate,
    /// Instant of the chosen sample
    pub sampled_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temp_celsius: f32,
    /// Condition category (e.g. "Clear", "Rain")
    pub condition: String,
    /// Free-text description of the conditions
    pub description: String,
    /// Weather icon code from the API
    pub icon: String,
}

impl DailyForecast {
    /// Build a daily forecast from the sample chosen for `date`
    #[must_use]
    pub fn from_sample(date: NaiveDate, sample: &ForecastSample) -> Self {
        Self {
            date,
            sampled_at: sample.instant,
            temp_celsius: sample.temp_celsius,
            condition: sample.condition.clone(),
            description: sample.description.clone(),
            icon: sample.icon.clone(),
        }
    }

    /// Temperature rounded to the nearest whole degree for display
    #[must_use]
    pub fn display_temperature(&self) -> String {
        format!("{}°C", self.temp_celsius.round() as i32)
    }
}

/// Weather for a whole trip: one optional forecast per requested day
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripWeather {
    /// Resolved trip location, or `None` when geocoding found nothing
    pub place: Option<ResolvedPlace>,
    /// Every calendar day of the trip, in ascending order
    pub days: Vec<NaiveDate>,
    /// Representative forecast per day; a missing key means no usable data
    pub daily: BTreeMap<NaiveDate, DailyForecast>,
}

impl TripWeather {
    /// Trip weather for an unresolvable location: the day list is kept so the
    /// caller can still render placeholders, but no forecasts exist.
    #[must_use]
    pub fn unresolved(days: Vec<NaiveDate>) -> Self {
        Self {
            place: None,
            days,
            daily: BTreeMap::new(),
        }
    }

    /// Forecast for one day, if any survived aggregation
    #[must_use]
    pub fn for_day(&self, date: NaiveDate) -> Option<&DailyForecast> {
        self.daily.get(&date)
    }
}
