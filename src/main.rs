use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voyager::config::VoyagerConfig;
use voyager::service::TripForecastService;
use voyager::{VoyagerError, cache, web};

#[tokio::main]
async fn main() -> Result<()> {
    let result = run().await;
    if let Err(e) = &result {
        // Library errors carry a friendlier wording than the debug chain
        if let Some(voyager_err) = e.downcast_ref::<VoyagerError>() {
            eprintln!("{}", voyager_err.user_message());
        }
    }
    result
}

async fn run() -> Result<()> {
    let config = VoyagerConfig::load()?;
    init_tracing(&config);

    if let Err(e) = cache::init(expand_home(&config.cache.location)) {
        tracing::warn!("Failed to open geocode cache, continuing without it: {e:#}");
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [cmd] if cmd == "serve" => web::run(&config).await,
        [location, start, end] => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            run_trip_weather(&config, location, start, end).await
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

async fn run_trip_weather(
    config: &VoyagerConfig,
    location: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let service = TripForecastService::from_config(config)?;
    let weather = service.trip_weather(location, start, end).await?;

    match &weather.place {
        Some(place) => println!(
            "Weather for {} ({:.4}, {:.4})",
            place.name, place.latitude, place.longitude
        ),
        None => println!("Location '{location}' could not be resolved - no weather available"),
    }

    for day in &weather.days {
        match weather.for_day(*day) {
            Some(forecast) => println!(
                "  {}  {:>5}  {} ({})",
                day,
                forecast.display_temperature(),
                forecast.condition,
                forecast.description
            ),
            None => println!("  {day}  no forecast available"),
        }
    }

    Ok(())
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{input}', expected YYYY-MM-DD"))
}

fn init_tracing(config: &VoyagerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

fn print_usage() {
    println!("Voyager - trip weather planning (no setup required beyond an OpenWeatherMap key)");
    println!();
    println!("Usage:");
    println!("  voyager <location> <start> <end>   Trip weather, dates as YYYY-MM-DD");
    println!("  voyager serve                      Run the web API");
}
