// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines all serialization/deserialization models for API results and JSON output

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel substituted for absent string and numeric fields
pub const SENTINEL_NA: &str = "N/A";

/// Sentinel substituted for an unknown open-now state
pub const SENTINEL_UNKNOWN: &str = "Unknown";

/// Raw place record from a Nearby Search response
/// DOCUMENTATION: Mirrors the provider's result object one-to-one
/// Every field may be absent in a response, so everything optional here
/// is backfilled with a sentinel by the formatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Google's unique place identifier
    pub place_id: Option<String>,

    /// Place name
    pub name: Option<String>,

    /// Rating (0-5)
    pub rating: Option<f64>,

    /// Number of user ratings
    pub user_ratings_total: Option<i64>,

    /// Price level (0-4: free to very expensive)
    pub price_level: Option<i64>,

    /// Place types array (e.g., ["restaurant", "food", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,

    /// Vicinity (short address, from Nearby Search)
    pub vicinity: Option<String>,

    /// Geographic location
    pub geometry: Option<Geometry>,

    /// Opening hours indicator
    pub opening_hours: Option<OpeningHours>,

    /// Photos attached to the result
    pub photos: Option<Vec<Photo>>,
}

/// Geographic location wrapper from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    /// Location coordinates
    pub location: Option<Location>,
}

/// Coordinates from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lng: Option<f64>,
}

/// Opening hours metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Whether place is currently open
    pub open_now: Option<bool>,
}

/// Photo from the provider
/// DOCUMENTATION: Only presence is reported downstream, the reference
/// itself is kept for completeness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Photo reference (used to fetch the actual photo)
    pub photo_reference: Option<String>,
    /// Photo width in pixels
    pub width: Option<i32>,
    /// Photo height in pixels
    pub height: Option<i32>,
    /// HTML attributions (required by Google)
    pub html_attributions: Option<Vec<String>>,
}

/// Formatted place record written to the output JSON
/// DOCUMENTATION: Fixed output shape for every place
/// Fields that can be either a real value or a sentinel string are kept
/// as JSON values so the serialized output carries both forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedPlace {
    /// Place name or "N/A"
    pub name: String,

    /// Place identifier or "N/A"
    pub place_id: String,

    /// Numeric rating or "N/A"
    pub rating: Value,

    /// Review count, 0 when absent
    pub user_ratings_total: i64,

    /// Numeric price level or "N/A"
    pub price_level: Value,

    /// Place types, empty when absent
    pub types: Vec<String>,

    /// Short address or "N/A"
    pub vicinity: String,

    /// Coordinate pair, each side a number or "N/A"
    pub geometry: FormattedCoordinates,

    /// true/false when reported, "Unknown" otherwise
    pub open_now: Value,

    /// Whether the place has any photos
    pub photos: bool,
}

/// Coordinate pair inside a formatted place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedCoordinates {
    pub lat: Value,
    pub lng: Value,
}

impl FormattedPlace {
    /// Project a raw place onto the fixed output shape
    /// DOCUMENTATION: Pure mapping, never fails on a missing field
    /// Absent values become sentinels: "N/A" for strings and numbers,
    /// 0 for the review count, [] for types, "Unknown" for open_now
    pub fn from_place(place: &Place) -> Self {
        let location = place.geometry.as_ref().and_then(|g| g.location.as_ref());

        Self {
            name: place
                .name
                .clone()
                .unwrap_or_else(|| SENTINEL_NA.to_string()),
            place_id: place
                .place_id
                .clone()
                .unwrap_or_else(|| SENTINEL_NA.to_string()),
            rating: match place.rating {
                Some(rating) => Value::from(rating),
                None => Value::from(SENTINEL_NA),
            },
            user_ratings_total: place.user_ratings_total.unwrap_or(0),
            price_level: match place.price_level {
                Some(level) => Value::from(level),
                None => Value::from(SENTINEL_NA),
            },
            types: place.types.clone(),
            vicinity: place
                .vicinity
                .clone()
                .unwrap_or_else(|| SENTINEL_NA.to_string()),
            geometry: FormattedCoordinates {
                lat: match location.and_then(|l| l.lat) {
                    Some(lat) => Value::from(lat),
                    None => Value::from(SENTINEL_NA),
                },
                lng: match location.and_then(|l| l.lng) {
                    Some(lng) => Value::from(lng),
                    None => Value::from(SENTINEL_NA),
                },
            },
            open_now: match place.opening_hours.as_ref().and_then(|h| h.open_now) {
                Some(open) => Value::from(open),
                None => Value::from(SENTINEL_UNKNOWN),
            },
            photos: place.photos.as_ref().map_or(false, |p| !p.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_place() -> Place {
        Place {
            place_id: None,
            name: None,
            rating: None,
            user_ratings_total: None,
            price_level: None,
            types: Vec::new(),
            vicinity: None,
            geometry: None,
            opening_hours: None,
            photos: None,
        }
    }

    #[test]
    fn test_format_empty_place_uses_sentinels() {
        let formatted = FormattedPlace::from_place(&empty_place());

        assert_eq!(formatted.name, "N/A");
        assert_eq!(formatted.place_id, "N/A");
        assert_eq!(formatted.rating, json!("N/A"));
        assert_eq!(formatted.user_ratings_total, 0);
        assert_eq!(formatted.price_level, json!("N/A"));
        assert!(formatted.types.is_empty());
        assert_eq!(formatted.vicinity, "N/A");
        assert_eq!(formatted.geometry.lat, json!("N/A"));
        assert_eq!(formatted.geometry.lng, json!("N/A"));
        assert_eq!(formatted.open_now, json!("Unknown"));
        assert!(!formatted.photos);
    }

    #[test]
    fn test_format_full_place_passes_values_through() {
        let place = Place {
            place_id: Some("ChIJ123".to_string()),
            name: Some("Test Cafe".to_string()),
            rating: Some(4.5),
            user_ratings_total: Some(120),
            price_level: Some(2),
            types: vec!["cafe".to_string(), "food".to_string()],
            vicinity: Some("123 Main St, Seattle".to_string()),
            geometry: Some(Geometry {
                location: Some(Location {
                    lat: Some(47.6851),
                    lng: Some(-122.3554),
                }),
            }),
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
            }),
            photos: Some(vec![Photo {
                photo_reference: Some("ref123".to_string()),
                width: Some(800),
                height: Some(600),
                html_attributions: None,
            }]),
        };

        let formatted = FormattedPlace::from_place(&place);

        assert_eq!(formatted.name, "Test Cafe");
        assert_eq!(formatted.place_id, "ChIJ123");
        assert_eq!(formatted.rating, json!(4.5));
        assert_eq!(formatted.user_ratings_total, 120);
        assert_eq!(formatted.price_level, json!(2));
        assert_eq!(formatted.types, vec!["cafe", "food"]);
        assert_eq!(formatted.vicinity, "123 Main St, Seattle");
        assert_eq!(formatted.geometry.lat, json!(47.6851));
        assert_eq!(formatted.geometry.lng, json!(-122.3554));
        assert_eq!(formatted.open_now, json!(true));
        assert!(formatted.photos);
    }

    #[test]
    fn test_format_partial_geometry() {
        let mut place = empty_place();
        place.geometry = Some(Geometry { location: None });

        let formatted = FormattedPlace::from_place(&place);
        assert_eq!(formatted.geometry.lat, json!("N/A"));
        assert_eq!(formatted.geometry.lng, json!("N/A"));
    }

    #[test]
    fn test_format_empty_photo_array_reports_false() {
        let mut place = empty_place();
        place.photos = Some(Vec::new());

        let formatted = FormattedPlace::from_place(&place);
        assert!(!formatted.photos);
    }

    #[test]
    fn test_formatted_place_serializes_every_key() {
        let serialized =
            serde_json::to_value(FormattedPlace::from_place(&empty_place())).unwrap();
        let object = serialized.as_object().unwrap();

        for key in [
            "name",
            "place_id",
            "rating",
            "user_ratings_total",
            "price_level",
            "types",
            "vicinity",
            "geometry",
            "open_now",
            "photos",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }

        let geometry = object["geometry"].as_object().unwrap();
        assert!(geometry.contains_key("lat"));
        assert!(geometry.contains_key("lng"));
    }

    #[test]
    fn test_raw_place_deserializes_from_sparse_response() {
        let place: Place = serde_json::from_value(json!({
            "name": "Corner Bakery",
            "place_id": "ChIJ456",
            "geometry": { "location": { "lat": 47.69, "lng": -122.35 } }
        }))
        .unwrap();

        assert_eq!(place.name.as_deref(), Some("Corner Bakery"));
        assert!(place.rating.is_none());
        assert!(place.types.is_empty());

        let formatted = FormattedPlace::from_place(&place);
        assert_eq!(formatted.rating, json!("N/A"));
        assert_eq!(formatted.geometry.lat, json!(47.69));
    }
}
