// src/main.rs
// DOCUMENTATION: Places fetcher entry point
// PURPOSE: Run a paginated nearby search and save formatted results to JSON

use anyhow::Context;
use dotenv::dotenv;
use nearby_places::config::Config;
use nearby_places::models::{FormattedPlace, SENTINEL_UNKNOWN};
use nearby_places::services::{display_value, GooglePlacesClient, NearbyQuery};
use std::fs;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    // 4. Validate configuration
    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }
    if config.google_places_api_key.is_empty() {
        log::error!("GOOGLE_PLACES_API_KEY is required for the places fetcher");
        std::process::exit(1);
    }

    // 5. Run the paginated search
    let client = GooglePlacesClient::with_settings(
        config.google_places_api_key.clone(),
        Duration::from_secs(config.http_timeout_secs),
        Duration::from_secs(config.page_token_delay_secs),
    )?;

    let query = NearbyQuery {
        latitude: config.latitude,
        longitude: config.longitude,
        radius_m: config.radius_m,
        place_type: config.place_type.clone(),
        keyword: config.keyword.clone(),
        min_price: config.min_price,
        max_price: config.max_price,
        open_now: config.open_now,
    };

    println!(
        "Searching within {}m of ({}, {})",
        config.radius_m, config.latitude, config.longitude
    );
    println!("{}", "-".repeat(60));

    let outcome = client.nearby_search(&query).await;

    if !outcome.stats.errors.is_empty() {
        log::warn!(
            "Search ended early, keeping partial results: {}",
            outcome.stats.errors.join("; ")
        );
    }

    println!();
    println!("Found {} total places!", outcome.places.len());
    println!("{}", "-".repeat(60));

    // 6. Show the first few results
    for (i, place) in outcome.places.iter().take(10).enumerate() {
        let formatted = FormattedPlace::from_place(place);

        println!("{}. {}", i + 1, formatted.name);
        println!(
            "   Rating: {} ({} reviews)",
            display_value(&formatted.rating),
            formatted.user_ratings_total
        );
        println!("   Address: {}", formatted.vicinity);

        let types: Vec<&str> = formatted.types.iter().take(3).map(String::as_str).collect();
        println!("   Types: {}", types.join(", "));
        println!(
            "   Coordinates: {}, {}",
            display_value(&formatted.geometry.lat),
            display_value(&formatted.geometry.lng)
        );

        let open_now = display_value(&formatted.open_now);
        if open_now != SENTINEL_UNKNOWN {
            println!("   Open now: {}", open_now);
        }
        println!();
    }

    // 7. Save all formatted results
    let formatted: Vec<FormattedPlace> = outcome
        .places
        .iter()
        .map(FormattedPlace::from_place)
        .collect();

    let json = serde_json::to_string_pretty(&formatted)
        .context("Failed to serialize formatted places")?;
    fs::write(&config.output_path, json)
        .with_context(|| format!("Failed to write {}", config.output_path))?;

    println!(
        "All {} results saved to '{}'",
        formatted.len(),
        config.output_path
    );
    log::info!(
        "Search completed: {} requests, {} page waits, {}s",
        outcome.stats.api_requests,
        outcome.stats.token_waits,
        outcome.stats.duration_seconds
    );

    Ok(())
}
