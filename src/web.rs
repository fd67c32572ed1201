//! HTTP surface for trip weather and place search

use crate::api::{NominatimClient, PlaceSearch, WeatherApiClient};
use crate::config::VoyagerConfig;
use crate::debounce::Debouncer;
use crate::models::{PlaceCandidate, TripWeather};
use crate::service::TripForecastService;
use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

/// Shared handler state
pub struct AppState {
    service: TripForecastService<WeatherApiClient, WeatherApiClient>,
    places: NominatimClient,
    search_debounce: Debouncer,
}

/// Debouncer for outbound place searches, with the configured quiet period
fn debouncer_from_config(config: &VoyagerConfig) -> Debouncer {
    Debouncer::new(Duration::from_millis(config.search.debounce_ms))
}

#[derive(Debug, Deserialize)]
struct TripForecastQuery {
    location: String,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct PlaceSearchQuery {
    q: String,
}

async fn get_trip_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TripForecastQuery>,
) -> Result<Json<TripWeather>, StatusCode> {
    state
        .service
        .trip_weather(&query.location, query.start, query.end)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Trip forecast request failed: {e:#}");
            StatusCode::BAD_REQUEST
        })
}

async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlaceSearchQuery>,
) -> Json<Vec<PlaceCandidate>> {
    // Collapse rapid-fire queries: only the latest one reaches the upstream
    if !state.search_debounce.acquire().await {
        debug!("Place search '{}' superseded by a newer query", query.q);
        return Json(Vec::new());
    }

    // A failed upstream search renders as an empty candidate list
    match state.places.search(&query.q, None).await {
        Ok(candidates) => Json(candidates),
        Err(e) => {
            warn!("Place search failed: {e:#}");
            Json(Vec::new())
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trip-forecast", get(get_trip_forecast))
        .route("/api/places", get(search_places))
        .layer(cors)
        .with_state(state)
}

/// Run the web server until shutdown
pub async fn run(config: &VoyagerConfig) -> Result<()> {
    let state = Arc::new(AppState {
        service: TripForecastService::from_config(config)?,
        places: NominatimClient::new(config)?,
        search_debounce: debouncer_from_config(config),
    });

    let addr = format!("0.0.0.0:{}", config.defaults.web_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Web server running at http://localhost:{}",
        config.defaults.web_port
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
