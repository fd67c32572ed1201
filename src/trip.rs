//! Trip date range construction
//!
//! Trip screens re-derive the day list every time the user edits either end
//! of the range, so this stays a pure function over calendar dates. All
//! arithmetic happens on `NaiveDate` (whole-day increments), never on raw
//! timestamps, so daylight-saving transitions cannot shift or drop a day.

use chrono::NaiveDate;

/// Build the ordered, inclusive list of calendar days from `start` to `end`.
///
/// A reversed range (`end < start`) yields an empty list. Callers treat an
/// empty range as "nothing to plan", not as an error.
#[must_use]
pub fn build_date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }

    let mut dates = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break, // end of representable dates
        }
    }
    dates
}
