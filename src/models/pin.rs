//! Pinned location and itinerary models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A location pinned by a user, with tags and an annotation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Pin {
    /// Pin identifier
    pub id: u64,
    /// Identifier of the user who created the pin
    pub owner_id: u64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Pin title
    pub title: String,
    /// Tags attached to this pin
    pub tags: Vec<String>,
}

impl Pin {
    /// Whether this pin carries every tag in `tags`
    #[must_use]
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.tags.iter().any(|own| own == t))
    }
}

/// One day of a trip itinerary, with the pins planned for it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryDay {
    /// Calendar day this entry belongs to
    pub date: NaiveDate,
    /// Position of the day within the trip (0-based)
    pub order: u32,
    /// Pin ids planned for this day, in visit order
    pub pin_ids: Vec<u64>,
}
