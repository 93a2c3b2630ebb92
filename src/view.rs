//! Windowed aggregation and view derivation
//!
//! Pure functions from {dense day map, period, commits, page} to the
//! structures the dashboard renders: a re-bucketed series, summary
//! statistics, and a paginated commit list. Nothing here mutates its
//! inputs; every call produces fresh output.

use crate::data::{AggregatedPoint, Commit, TimePeriod};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Fixed page size of the commit table
pub const COMMIT_PAGE_SIZE: usize = 10;

/// Maximum number of page buttons shown by a pager widget
pub const PAGER_WINDOW: usize = 5;

/// Sentinel label when the series has no buckets
pub const NO_ACTIVITY_LABEL: &str = "None";

/// Summary statistics over the aggregated series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stats {
    /// Sum of all bucket values
    pub total: u64,
    /// Total divided by the period's day count, or by days/7 for periods
    /// rendered with week/month buckets; rounded to one decimal.
    pub avg_per_day: f64,
    /// Label of the highest-value bucket, ties broken by first occurrence
    pub most_active_label: String,
    /// Value of the highest-value bucket
    pub most_active_value: u64,
}

/// Everything the chart and commit table need for one period selection
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub period: TimePeriod,
    pub series: Vec<AggregatedPoint>,
    pub stats: Stats,
    /// The requested page of the filtered commit list, most recent first
    pub commits: Vec<Commit>,
    pub page: usize,
    pub total_pages: usize,
}

/// Derive the full view for one period selection.
pub fn build_view(
    days: &BTreeMap<NaiveDate, u64>,
    period: TimePeriod,
    commits: &[Commit],
    page: usize,
    now: DateTime<Utc>,
) -> ViewModel {
    let slice = slice_window(days, period, now.date_naive());
    let series = aggregate(&slice, period);
    let stats = summarize(&series, period);

    let filtered = filter_commits(commits, period, now);
    let (page_slice, total_pages) = paginate(&filtered, page, COMMIT_PAGE_SIZE);

    ViewModel {
        period,
        series,
        stats,
        commits: page_slice,
        page,
        total_pages,
    }
}

/// The most recent `period.days()` entries of the dense map, in
/// chronological order.
pub fn slice_window(
    days: &BTreeMap<NaiveDate, u64>,
    period: TimePeriod,
    today: NaiveDate,
) -> Vec<(NaiveDate, u64)> {
    let from = today - Duration::days(period.days() - 1);
    days.range(from..=today).map(|(d, &c)| (*d, c)).collect()
}

/// Re-bucket a daily slice for the given period.
///
/// Up to 90 days the series stays daily; up to 180 days it groups by
/// week-of-month; beyond that by calendar month (with a 2-digit year in
/// the label once the window exceeds a year). Grouping is
/// order-preserving: the first day seen for a key fixes the bucket's
/// position, later days fold into its running sum.
pub fn aggregate(slice: &[(NaiveDate, u64)], period: TimePeriod) -> Vec<AggregatedPoint> {
    let mut series: Vec<AggregatedPoint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &(day, count) in slice {
        let (key, label) = bucket(day, period);
        match index.get(&key) {
            Some(&i) => series[i].value += count,
            None => {
                index.insert(key.clone(), series.len());
                series.push(AggregatedPoint { key, label, value: count });
            }
        }
    }

    series
}

/// Bucket key and axis label for one day under the given period
fn bucket(day: NaiveDate, period: TimePeriod) -> (String, String) {
    let days = period.days();
    if days <= 90 {
        (day.format("%Y-%m-%d").to_string(), day.format("%b %-d").to_string())
    } else if days <= 180 {
        // Week-of-month: day-of-month divided by 7, floored.
        let week = day.day() / 7;
        let label = format!("{} W{}", day.format("%b"), week + 1);
        (label.clone(), label)
    } else if days <= 365 {
        let label = day.format("%b").to_string();
        (label.clone(), label)
    } else {
        let label = day.format("%b %y").to_string();
        (label.clone(), label)
    }
}

/// Summary statistics over an aggregated series.
pub fn summarize(series: &[AggregatedPoint], period: TimePeriod) -> Stats {
    let total: u64 = series.iter().map(|p| p.value).sum();

    // Periods rendered with week/month buckets divide by days/7 rather
    // than days. Documented behavior of the view, kept as-is.
    let bucket_divisor = if period.days() <= 90 { 1.0 } else { 7.0 };
    let avg = total as f64 / (period.days() as f64 / bucket_divisor);
    let avg_per_day = (avg * 10.0).round() / 10.0;

    let mut most_active_label = NO_ACTIVITY_LABEL.to_string();
    let mut most_active_value = 0;
    for point in series {
        if most_active_label == NO_ACTIVITY_LABEL || point.value > most_active_value {
            most_active_label = point.label.clone();
            most_active_value = point.value;
        }
    }

    Stats {
        total,
        avg_per_day,
        most_active_label,
        most_active_value,
    }
}

/// Commits whose timestamp falls inside the selected window, most recent
/// first.
pub fn filter_commits(commits: &[Commit], period: TimePeriod, now: DateTime<Utc>) -> Vec<Commit> {
    let cutoff = now - Duration::days(period.days());
    let mut filtered: Vec<Commit> = commits
        .iter()
        .filter(|c| c.timestamp >= cutoff)
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    filtered
}

/// Slice one page out of a collection.
///
/// Returns the visible slice and the total page count
/// (`ceil(len / page_size)`, 0 for an empty collection). An out-of-range
/// page yields an empty slice.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, usize) {
    let total_pages = items.len().div_ceil(page_size);
    let start = page.saturating_mul(page_size);
    let end = (start + page_size).min(items.len());
    let slice = if start < items.len() {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    (slice, total_pages)
}

/// Sliding window of up to [`PAGER_WINDOW`] visible page numbers around
/// the current page.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(width / 2);
    if start + width > total_pages {
        start = total_pages.saturating_sub(width);
    }
    (start..total_pages.min(start + width)).collect()
}

/// Interactive state of the chart/commit-table view.
///
/// Period selection, commit page, and table visibility are independent;
/// the only coupling is the reset rules on the commit page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub period: TimePeriod,
    pub commit_page: usize,
    pub commits_expanded: bool,
    last_commit_count: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            period: TimePeriod::Quarter,
            commit_page: 0,
            commits_expanded: false,
            last_commit_count: 0,
        }
    }
}

impl ViewState {
    /// Select the active period, resetting the commit page.
    pub fn select_period(&mut self, period: TimePeriod) {
        self.period = period;
        self.commit_page = 0;
    }

    /// Reset the commit page when the filtered commit set changes size.
    pub fn sync_commit_count(&mut self, count: usize) {
        if count != self.last_commit_count {
            self.commit_page = 0;
            self.last_commit_count = count;
        }
    }

    /// Move to a page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.commit_page = page.min(total_pages.saturating_sub(1));
    }

    /// Toggle commit-table visibility. Affects neither period nor page.
    pub fn toggle_commits(&mut self) {
        self.commits_expanded = !self.commits_expanded;
    }
}
