//! Daily forecast aggregation
//!
//! The upstream forecast API returns ~3-hourly samples covering roughly five
//! days. Trip screens want one representative forecast per calendar day, so
//! this module buckets samples into local-wall-clock days, prefers samples
//! taken near noon, and back-fills days without a direct match from the
//! temporally closest sample within a bounded window.

use crate::models::{DailyForecast, ForecastSample};
use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// First local hour considered "near noon" (inclusive)
pub const NOON_WINDOW_START_HOUR: u32 = 10;
/// Last local hour considered "near noon" (inclusive)
pub const NOON_WINDOW_END_HOUR: u32 = 14;
/// Gap-fill refuses samples further than this from the missing day's noon
pub const FALLBACK_WINDOW_HOURS: i64 = 36;

/// Select one representative forecast per requested calendar day.
///
/// Bucketing uses local wall-clock dates in `tz`, not UTC dates, so a sample
/// taken late in the local evening lands on the local day the user sees.
///
/// Selection policy per day:
/// - the first sample of a day is always installed, so any day with data
///   gets a result;
/// - a sample whose local hour falls in `[10, 14]` replaces the current
///   candidate; among several near-noon samples the last one in input order
///   wins;
/// - a non-noon sample never displaces an existing candidate.
///
/// Days with no direct sample are back-filled from the sample closest in
/// time to that day's local noon, capped at [`FALLBACK_WINDOW_HOURS`]. Days
/// beyond the cap stay absent from the result; absence means "no forecast
/// available", never an error.
#[must_use]
pub fn aggregate_daily(
    samples: &[ForecastSample],
    target_dates: &[NaiveDate],
    tz: Tz,
) -> BTreeMap<NaiveDate, DailyForecast> {
    let targets: HashSet<NaiveDate> = target_dates.iter().copied().collect();
    let mut daily: BTreeMap<NaiveDate, DailyForecast> = BTreeMap::new();

    // Pass 1: bucket samples into local days, preferring near-noon samples.
    for sample in samples {
        let local = sample.instant.with_timezone(&tz);
        let date = local.date_naive();
        if !targets.contains(&date) {
            continue;
        }

        match daily.entry(date) {
            Entry::Vacant(entry) => {
                entry.insert(DailyForecast::from_sample(date, sample));
            }
            Entry::Occupied(mut entry) => {
                let hour = local.hour();
                if (NOON_WINDOW_START_HOUR..=NOON_WINDOW_END_HOUR).contains(&hour) {
                    entry.insert(DailyForecast::from_sample(date, sample));
                }
            }
        }
    }

    // Pass 2: back-fill days without a direct sample from the nearest sample
    // within the window, measured against that day's local noon.
    for &date in target_dates {
        if daily.contains_key(&date) {
            continue;
        }
        if let Some(sample) = nearest_to_noon(samples, date, tz) {
            debug!(%date, sampled_at = %sample.instant, "gap-filled day from nearest sample");
            daily.insert(date, DailyForecast::from_sample(date, sample));
        } else {
            debug!(%date, "no sample within fallback window, day left absent");
        }
    }

    daily
}

/// The sample temporally closest to `date`'s local noon, within the fallback
/// window. Equidistant samples resolve to the first one in input order.
fn nearest_to_noon(samples: &[ForecastSample], date: NaiveDate, tz: Tz) -> Option<&ForecastSample> {
    let noon = local_noon(date, tz)?;
    let cap = FALLBACK_WINDOW_HOURS * 3600;

    let mut best: Option<(&ForecastSample, i64)> = None;
    for sample in samples {
        let diff = (sample.instant - noon).num_seconds().abs();
        if diff > cap {
            continue;
        }
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((sample, diff));
        }
    }
    best.map(|(sample, _)| sample)
}

/// UTC instant of `date`'s local noon in `tz`.
///
/// An ambiguous local noon (fall-back transition) resolves to the earlier
/// instant. A nonexistent local noon (spring-forward transition, which no
/// real zone applies at midday) shifts forward one hour.
fn local_noon(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(12, 0, 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}
