//! Trip itinerary day ordering
//!
//! Itinerary days come back from storage in arbitrary row order; trip
//! screens render them sorted by their order column and aligned to the trip
//! date range.

use crate::models::ItineraryDay;
use crate::trip::build_date_range;
use chrono::NaiveDate;

/// Sort itinerary days by their order column
#[must_use]
pub fn sort_days(mut days: Vec<ItineraryDay>) -> Vec<ItineraryDay> {
    days.sort_by_key(|day| day.order);
    days
}

/// Align stored itinerary days to the trip's date range: one entry per
/// calendar day, existing entries matched by date, missing days filled with
/// empty entries. Stored days outside the range are dropped.
#[must_use]
pub fn align_to_range(days: &[ItineraryDay], start: NaiveDate, end: NaiveDate) -> Vec<ItineraryDay> {
    build_date_range(start, end)
        .into_iter()
        .enumerate()
        .map(|(order, date)| {
            days.iter()
                .find(|day| day.date == date)
                .cloned()
                .map(|mut day| {
                    day.order = order as u32;
                    day
                })
                .unwrap_or(ItineraryDay {
                    date,
                    order: order as u32,
                    pin_ids: Vec::new(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, order: u32, pins: &[u64]) -> ItineraryDay {
        ItineraryDay {
            date,
            order,
            pin_ids: pins.to_vec(),
        }
    }

    #[test]
    fn test_sort_days_by_order() {
        let days = vec![
            day(date(2024, 6, 3), 2, &[]),
            day(date(2024, 6, 1), 0, &[]),
            day(date(2024, 6, 2), 1, &[]),
        ];
        let sorted = sort_days(days);
        assert_eq!(
            sorted.iter().map(|d| d.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_align_fills_missing_days() {
        let stored = vec![day(date(2024, 6, 2), 5, &[11, 12])];
        let aligned = align_to_range(&stored, date(2024, 6, 1), date(2024, 6, 3));

        assert_eq!(aligned.len(), 3);
        assert!(aligned[0].pin_ids.is_empty());
        assert_eq!(aligned[1].pin_ids, vec![11, 12]);
        assert!(aligned[2].pin_ids.is_empty());
        // Orders are renumbered to match the range
        assert_eq!(
            aligned.iter().map(|d| d.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_align_drops_days_outside_range() {
        let stored = vec![day(date(2024, 5, 20), 0, &[99])];
        let aligned = align_to_range(&stored, date(2024, 6, 1), date(2024, 6, 2));
        assert_eq!(aligned.len(), 2);
        assert!(aligned.iter().all(|d| d.pin_ids.is_empty()));
    }

    #[test]
    fn test_align_reversed_range_is_empty() {
        let aligned = align_to_range(&[], date(2024, 6, 3), date(2024, 6, 1));
        assert!(aligned.is_empty());
    }
}
