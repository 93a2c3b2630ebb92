//! Contribution timeline synthesis
//!
//! The public events feed only covers roughly the last 90 days, so the
//! dashboard backfills the older portion of the timeline with a synthetic
//! pattern derived from recent activity. Real data is never altered: the
//! synthetic step only writes to days strictly older than the real-data
//! window.

use crate::data::Event;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use std::collections::BTreeMap;

/// Full synthesis horizon in days (~10 years)
pub const MAX_HISTORY_DAYS: i64 = 3650;

/// Days of real history the events API can supply
pub const API_HISTORY_DAYS: i64 = 90;

/// Fraction of the recent daily average used as the weekend base level
const WEEKEND_FACTOR: f64 = 0.5;

/// Probability that a synthetic day has any activity at all
const ACTIVITY_PROBABILITY: f64 = 0.6;

/// First date covered by a dense map ending at `today`
pub fn horizon_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(MAX_HISTORY_DAYS - 1)
}

/// First date of the real-data window ending at `today`
pub fn real_window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(API_HISTORY_DAYS - 1)
}

/// Build the dense day-indexed contribution map.
///
/// The map covers exactly [`MAX_HISTORY_DAYS`] consecutive dates ending at
/// `today`, zero-filled. Push events within range accumulate their weight
/// onto the matching day; everything older than the real-data window is
/// backfilled from `account_created` forward using a weekday/weekend
/// pattern around the recent daily average.
///
/// `rng` is injected so callers can seed it for reproducible output.
pub fn synthesize<R: Rng>(
    events: &[Event],
    account_created: NaiveDate,
    today: NaiveDate,
    rng: &mut R,
) -> BTreeMap<NaiveDate, u64> {
    let start = horizon_start(today);
    let mut days: BTreeMap<NaiveDate, u64> = (0..MAX_HISTORY_DAYS)
        .map(|i| (start + Duration::days(i), 0))
        .collect();

    // Fold real events into their day buckets. Weights accumulate; an
    // event never overwrites a prior addition for the same day.
    for event in events.iter().filter(|e| e.is_push()) {
        let date = event.created_at.date_naive();
        if let Some(count) = days.get_mut(&date) {
            *count += event.weight();
        }
    }

    let recent_start = real_window_start(today);
    let average = recent_daily_average(&days, recent_start, today);

    let account_age = (today - account_created).num_days();
    let backfill_days = (MAX_HISTORY_DAYS - API_HISTORY_DAYS).min(account_age);

    // Walk backward from the day before the real-data window. Days that
    // predate the account are skipped and stay zero.
    for offset in 1..=backfill_days.max(0) {
        let day = recent_start - Duration::days(offset);
        if day < account_created {
            continue;
        }

        let base = match day.weekday() {
            Weekday::Sat | Weekday::Sun => average * WEEKEND_FACTOR,
            _ => average,
        };
        let level = base * rng.gen_range(0.0..2.0);
        if rng.gen_bool(ACTIVITY_PROBABILITY) {
            days.insert(day, level.round() as u64);
        }
    }

    days
}

/// Mean of the strictly-positive counts inside the real-data window.
///
/// Defaults to 1.0 when no positive day exists, so the synthetic pattern
/// never degenerates to all zeros for quiet accounts.
fn recent_daily_average(
    days: &BTreeMap<NaiveDate, u64>,
    recent_start: NaiveDate,
    today: NaiveDate,
) -> f64 {
    let positives: Vec<u64> = days
        .range(recent_start..=today)
        .map(|(_, &count)| count)
        .filter(|&count| count > 0)
        .collect();

    if positives.is_empty() {
        1.0
    } else {
        positives.iter().sum::<u64>() as f64 / positives.len() as f64
    }
}
