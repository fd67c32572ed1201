//! Map pin predicates
//!
//! The map screen needs two cheap checks before allowing a new pin: is there
//! already a pin at (roughly) this spot, and does the current user own one of
//! them. Both are linear scans with an absolute per-axis threshold rather
//! than a geodesic distance. At city scale 0.001° of latitude is about 100 m,
//! which is accurate enough for "don't stack pins"; the approximation is
//! poor near the poles and across the antimeridian.

use crate::models::Pin;

/// Per-axis coordinate delta treated as "the same spot" (~100 m at
/// mid-latitudes)
pub const NEARBY_DELTA_DEG: f64 = 0.001;

/// All pins within the per-axis delta of a point
#[must_use]
pub fn find_nearby(pins: &[Pin], latitude: f64, longitude: f64) -> Vec<&Pin> {
    pins.iter()
        .filter(|pin| {
            (pin.latitude - latitude).abs() <= NEARBY_DELTA_DEG
                && (pin.longitude - longitude).abs() <= NEARBY_DELTA_DEG
        })
        .collect()
}

/// Whether any existing pin lies within the per-axis delta of a point
#[must_use]
pub fn has_nearby_pin(pins: &[Pin], latitude: f64, longitude: f64) -> bool {
    !find_nearby(pins, latitude, longitude).is_empty()
}

/// Whether `user_id` owns one of the pins near a point
#[must_use]
pub fn owns_nearby_pin(pins: &[Pin], latitude: f64, longitude: f64, user_id: u64) -> bool {
    find_nearby(pins, latitude, longitude)
        .iter()
        .any(|pin| pin.owner_id == user_id)
}

/// Pins carrying every requested tag. An empty tag list matches all pins.
#[must_use]
pub fn filter_by_tags<'a>(pins: &'a [Pin], tags: &[String]) -> Vec<&'a Pin> {
    pins.iter().filter(|pin| pin.has_all_tags(tags)).collect()
}
