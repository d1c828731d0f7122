// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Handle paginated communication with Google Places Nearby Search

use crate::errors::PlacesError;
use crate::models::Place;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Provider-side cap on the search radius, in meters
const MAX_RADIUS_M: f64 = 50_000.0;

/// Google Places API client
/// DOCUMENTATION: Handles authentication and paginated API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
    /// Wait before reusing a freshly issued page token
    page_token_delay: Duration,
}

/// Search parameters for a nearby search
/// DOCUMENTATION: Center point, radius and optional filters
/// Filters left unset are omitted from the request entirely
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    /// Center point latitude
    pub latitude: f64,
    /// Center point longitude
    pub longitude: f64,
    /// Search radius in meters (provider caps at 50000)
    pub radius_m: f64,
    /// Optional type filter (e.g., "restaurant", "store", "gas_station")
    pub place_type: Option<String>,
    /// Optional keyword filter (e.g., "pizza", "coffee")
    pub keyword: Option<String>,
    /// Minimum price level (0-4)
    pub min_price: Option<u8>,
    /// Maximum price level (0-4)
    pub max_price: Option<u8>,
    /// Only return places that are open now
    pub open_now: bool,
}

/// Response from Google Places Nearby Search
/// DOCUMENTATION: Parsed response from Google Places API
/// Error responses omit the results array, hence the default
#[derive(Debug, Deserialize, Serialize)]
pub struct NearbySearchResponse {
    /// Results array from API
    #[serde(default)]
    pub results: Vec<Place>,
    /// Status of the API call
    pub status: String,
    /// Next page token (if more results available)
    pub next_page_token: Option<String>,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

/// Search statistics
/// DOCUMENTATION: Tracks results of a paginated search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total number of API requests made
    pub api_requests: u32,
    /// Number of page-token delays observed
    pub token_waits: u32,
    /// Total places retrieved across all pages
    pub places_retrieved: u32,
    /// Error messages encountered
    pub errors: Vec<String>,
    /// Total search duration in seconds
    pub duration_seconds: u64,
    /// Timestamp when the search started
    pub started_at: String,
    /// Timestamp when the search completed
    pub completed_at: Option<String>,
}

impl SearchStats {
    /// Create new search statistics tracker
    pub fn new() -> Self {
        Self {
            api_requests: 0,
            token_waits: 0,
            places_retrieved: 0,
            errors: Vec::new(),
            duration_seconds: 0,
            started_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Mark search as completed
    pub fn complete(&mut self, duration: u64) {
        self.duration_seconds = duration;
        self.completed_at = Some(Utc::now().to_rfc3339());
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a full paginated search
/// DOCUMENTATION: Accumulated places plus the stats for the run
/// A failed run still carries everything accumulated before the failure
#[derive(Debug)]
pub struct SearchOutcome {
    /// All places retrieved across pages
    pub places: Vec<Place>,
    /// Statistics for the run, including any errors
    pub stats: SearchStats,
}

impl GooglePlacesClient {
    /// Create new Google Places API client with default settings
    /// DOCUMENTATION: Initializes client with API key, 2s page-token delay
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            page_token_delay: Duration::from_secs(2),
        }
    }

    /// Create a client with an explicit request timeout and page-token delay
    /// DOCUMENTATION: Used by the binaries, which take both from configuration
    pub fn with_settings(
        api_key: String,
        timeout: Duration,
        page_token_delay: Duration,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            log::error!("Failed to build HTTP client: {}", e);
            PlacesError::InvalidConfig(format!("HTTP client init failed: {}", e))
        })?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            page_token_delay,
        })
    }

    /// Build the query parameter list for one request
    /// DOCUMENTATION: Emits parameters in a fixed order
    /// Optional filters appear only when set; opennow only when true;
    /// pagetoken only on follow-up requests
    fn build_query_params(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "location",
                format!("{},{}", query.latitude, query.longitude),
            ),
            ("radius", query.radius_m.to_string()),
            ("key", self.api_key.clone()),
        ];

        if let Some(ref place_type) = query.place_type {
            params.push(("type", place_type.clone()));
        }

        if let Some(ref keyword) = query.keyword {
            params.push(("keyword", keyword.clone()));
        }

        if let Some(min_price) = query.min_price {
            params.push(("minprice", min_price.to_string()));
        }

        if let Some(max_price) = query.max_price {
            params.push(("maxprice", max_price.to_string()));
        }

        if query.open_now {
            params.push(("opennow", "true".to_string()));
        }

        if let Some(token) = page_token {
            params.push(("pagetoken", token.to_string()));
        }

        params
    }

    /// Fetch a single page of nearby search results
    /// DOCUMENTATION: One HTTP round trip, no pagination
    async fn fetch_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<String>,
    ) -> Result<NearbySearchResponse, PlacesError> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let params = self.build_query_params(query, page_token.as_deref());

        log::debug!(
            "Nearby search request: lat={}, lng={}, radius={}, token={}",
            query.latitude,
            query.longitude,
            query.radius_m,
            page_token.is_some()
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Nearby search request failed: {}", e);
                PlacesError::RequestFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Nearby search HTTP error {}: {}", status, body);
            return Err(PlacesError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse nearby search response: {}", e);
            PlacesError::MalformedResponse(e.to_string())
        })
    }

    /// Perform a full nearby search, following continuation tokens
    /// DOCUMENTATION: Main entry point for the fetcher
    ///
    /// Pages are fetched strictly sequentially because each depends on the
    /// previous response's token. Any failure stops pagination and the
    /// places accumulated so far are returned together with the error
    /// recorded in the stats.
    ///
    /// # Arguments
    /// * `query` - Center point, radius and optional filters
    ///
    /// # Returns
    /// SearchOutcome with all retrieved places and run statistics
    pub async fn nearby_search(&self, query: &NearbyQuery) -> SearchOutcome {
        let mut query = query.clone();
        if query.radius_m > MAX_RADIUS_M {
            log::warn!(
                "Radius {}m exceeds the provider cap, clamping to {}m",
                query.radius_m,
                MAX_RADIUS_M
            );
            query.radius_m = MAX_RADIUS_M;
        }

        let (places, stats) = Self::collect_pages(
            |token| self.fetch_page(&query, token),
            self.page_token_delay,
        )
        .await;

        SearchOutcome { places, stats }
    }

    /// Drive the pagination loop over a page-fetching function
    /// DOCUMENTATION: Accumulates results until no continuation token remains
    ///
    /// The provider requires a short delay before a freshly issued token
    /// becomes valid, so every follow-up request is preceded by one wait.
    /// A transport failure, an unparseable body, or a status other than
    /// OK/ZERO_RESULTS stops the loop; partial results are kept.
    async fn collect_pages<F, Fut>(mut fetch: F, page_delay: Duration) -> (Vec<Place>, SearchStats)
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<NearbySearchResponse, PlacesError>>,
    {
        let start_time = Instant::now();
        let mut stats = SearchStats::new();
        let mut all_places = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if page_token.is_some() {
                tokio::time::sleep(page_delay).await;
                stats.token_waits += 1;
            }

            stats.api_requests += 1;
            let response = match fetch(page_token.take()).await {
                Ok(response) => response,
                Err(e) => {
                    log::error!("Pagination aborted: {}", e);
                    stats.errors.push(e.to_string());
                    break;
                }
            };

            match response.status.as_str() {
                "OK" | "ZERO_RESULTS" => {
                    log::info!("Found {} places in this batch", response.results.len());
                    stats.places_retrieved += response.results.len() as u32;
                    all_places.extend(response.results);
                }
                other => {
                    let error = PlacesError::ApiStatus {
                        status: other.to_string(),
                        message: response
                            .error_message
                            .unwrap_or_else(|| "no error message".to_string()),
                    };
                    log::error!("{}", error);
                    stats.errors.push(error.to_string());
                    break;
                }
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        stats.complete(start_time.elapsed().as_secs());
        (all_places, stats)
    }
}
