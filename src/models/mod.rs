//! Core data models for the `Voyager` library

pub mod forecast;
pub mod location;
pub mod pin;

pub use forecast::{DailyForecast, ForecastSample, TripWeather};
pub use location::{PlaceCandidate, ResolvedPlace, ViewBox};
pub use pin::{ItineraryDay, Pin};
