// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::errors::PlacesError;
use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Places API Key
    pub google_places_api_key: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Latitude of the search center point
    pub latitude: f64,

    /// Longitude of the search center point
    pub longitude: f64,

    /// Search radius in meters (provider caps at 50 000)
    pub radius_m: f64,

    /// Optional place type filter (e.g., "restaurant", "store")
    pub place_type: Option<String>,

    /// Optional keyword filter (e.g., "pizza", "coffee")
    pub keyword: Option<String>,

    /// Minimum price level (0-4)
    pub min_price: Option<u8>,

    /// Maximum price level (0-4)
    pub max_price: Option<u8>,

    /// Only return places that are open now
    pub open_now: bool,

    /// Output path for the fetched places JSON array
    pub output_path: String,

    /// Delay before a continuation token becomes valid, in seconds
    pub page_token_delay_secs: u64,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Directory scanned by the merger for input files
    pub merge_input_dir: String,

    /// Glob pattern applied within the input directory
    pub merge_pattern: String,

    /// Output path for the merged workbook
    pub merge_output: String,

    /// Write the styled workbook variant instead of the plain dump
    pub merge_styled: bool,

    /// Add the source_file provenance column to merged rows
    pub merge_source_column: bool,

    /// Number of merged rows shown in the console preview
    pub merge_preview_rows: usize,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .unwrap_or_else(|_| String::new()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            latitude: env::var("PLACES_LATITUDE")
                .unwrap_or_else(|_| "47.685141048898465".to_string())
                .parse()
                .unwrap_or(47.685141048898465),

            longitude: env::var("PLACES_LONGITUDE")
                .unwrap_or_else(|_| "-122.35545207468901".to_string())
                .parse()
                .unwrap_or(-122.35545207468901),

            radius_m: env::var("PLACES_RADIUS_M")
                .unwrap_or_else(|_| "807.72".to_string())
                .parse()
                .unwrap_or(807.72),

            place_type: env::var("PLACES_TYPE").ok().filter(|v| !v.is_empty()),

            keyword: env::var("PLACES_KEYWORD").ok().filter(|v| !v.is_empty()),

            min_price: env::var("PLACES_MIN_PRICE")
                .ok()
                .and_then(|v| v.parse().ok()),

            max_price: env::var("PLACES_MAX_PRICE")
                .ok()
                .and_then(|v| v.parse().ok()),

            open_now: env::var("PLACES_OPEN_NOW")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),

            output_path: env::var("PLACES_OUTPUT")
                .unwrap_or_else(|_| "nearby_places.json".to_string()),

            page_token_delay_secs: env::var("PAGE_TOKEN_DELAY_SECS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            merge_input_dir: env::var("MERGE_INPUT_DIR").unwrap_or_else(|_| ".".to_string()),

            merge_pattern: env::var("MERGE_PATTERN").unwrap_or_else(|_| "*.json".to_string()),

            merge_output: env::var("MERGE_OUTPUT")
                .unwrap_or_else(|_| "combined_data.xlsx".to_string()),

            merge_styled: env::var("MERGE_STYLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),

            merge_source_column: env::var("MERGE_SOURCE_COLUMN")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),

            merge_preview_rows: env::var("MERGE_PREVIEW_ROWS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures a run can start safely
    pub fn validate(&self) -> Result<(), PlacesError> {
        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - the places fetcher will not work");
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PlacesError::InvalidConfig(format!(
                "PLACES_LATITUDE {} is outside [-90, 90]",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PlacesError::InvalidConfig(format!(
                "PLACES_LONGITUDE {} is outside [-180, 180]",
                self.longitude
            )));
        }

        if self.radius_m <= 0.0 {
            return Err(PlacesError::InvalidConfig(format!(
                "PLACES_RADIUS_M must be positive, got {}",
                self.radius_m
            )));
        }

        if self.radius_m > 50_000.0 {
            log::warn!(
                "PLACES_RADIUS_M {} exceeds the provider cap of 50000 m and will be clamped",
                self.radius_m
            );
        }

        match (self.min_price, self.max_price) {
            (Some(min), _) if min > 4 => {
                return Err(PlacesError::InvalidConfig(format!(
                    "PLACES_MIN_PRICE must be 0-4, got {}",
                    min
                )));
            }
            (_, Some(max)) if max > 4 => {
                return Err(PlacesError::InvalidConfig(format!(
                    "PLACES_MAX_PRICE must be 0-4, got {}",
                    max
                )));
            }
            (Some(min), Some(max)) if min > max => {
                return Err(PlacesError::InvalidConfig(format!(
                    "PLACES_MIN_PRICE {} is greater than PLACES_MAX_PRICE {}",
                    min, max
                )));
            }
            _ => {}
        }

        if self.merge_pattern.is_empty() {
            log::warn!("MERGE_PATTERN is empty - the merger will match no files");
        }

        Ok(())
    }
}
