//! `Voyager` - Trip weather planning core for the Voyager travel companion
//!
//! This library provides the core functionality for trip date planning,
//! weather forecast aggregation, and place lookup around pinned locations.

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod forecast;
pub mod itinerary;
pub mod models;
pub mod pins;
pub mod service;
pub mod trip;
pub mod web;

// Re-export core types for public API
pub use api::{ForecastSource, Geocoder, NominatimClient, PlaceSearch, WeatherApiClient};
pub use config::VoyagerConfig;
pub use debounce::Debouncer;
pub use error::VoyagerError;
pub use forecast::aggregate_daily;
pub use models::{DailyForecast, ForecastSample, Pin, ResolvedPlace, TripWeather};
pub use service::TripForecastService;
pub use trip::build_date_range;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
