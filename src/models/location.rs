//! Location models for geocoding and place lookup results

use serde::{Deserialize, Serialize};

/// Result of geocoding a free-text location name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedPlace {
    /// Resolved place name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country code (ISO 3166-1 alpha-2), when the geocoder reports one
    pub country: Option<String>,
}

impl ResolvedPlace {
    /// Cache key for geocoding lookups, normalized so that "Paris " and
    /// "paris" hit the same entry.
    #[must_use]
    pub fn cache_key(query: &str) -> String {
        format!("geocode:{}", query.trim().to_lowercase())
    }
}

/// One ranked candidate from free-text place search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceCandidate {
    /// Human-readable display name
    pub display_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Rectangular region used to bias place search results
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_longitude: f64,
    pub min_latitude: f64,
    pub max_longitude: f64,
    pub max_latitude: f64,
}

impl ViewBox {
    /// A viewbox centered on a point, spanning `half_span` degrees on each axis
    #[must_use]
    pub fn around(latitude: f64, longitude: f64, half_span: f64) -> Self {
        Self {
            min_longitude: longitude - half_span,
            min_latitude: latitude - half_span,
            max_longitude: longitude + half_span,
            max_latitude: latitude + half_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_cache_key_normalization() {
        assert_eq!(ResolvedPlace::cache_key(" Paris "), "geocode:paris");
        assert_eq!(ResolvedPlace::cache_key("PARIS"), "geocode:paris");
    }

    #[test]
    fn test_viewbox_around() {
        let vb = ViewBox::around(48.0, 2.0, 0.5);
        assert_eq!(vb.min_latitude, 47.5);
        assert_eq!(vb.max_latitude, 48.5);
        assert_eq!(vb.min_longitude, 1.5);
        assert_eq!(vb.max_longitude, 2.5);
    }
}
