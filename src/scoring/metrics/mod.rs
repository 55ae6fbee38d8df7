//! Metric scorers
//!
//! Each scorer is a synchronous function over a [`RepoDetails`] snapshot
//! and, where it needs one, the cloned tree. The executor moves them onto
//! the blocking pool.
//!
//! [`RepoDetails`]: crate::scoring::types::RepoDetails

pub mod bus_factor;
pub mod correctness;
pub mod license;
pub mod ramp_up;
pub mod responsiveness;

pub use bus_factor::calculate_bus_factor;
pub use correctness::calculate_correctness;
pub use license::{calculate_license, license_from_text, license_score};
pub use ramp_up::calculate_ramp_up;
pub use responsiveness::calculate_responsiveness;

use crate::scoring::types::IssueInfo;
use chrono::{DateTime, Months, Utc};

const MILLIS_PER_WEEK: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 7.0;

/// Start of a trailing observation window.
///
/// The later of `now - months` and the earliest observed event, so young
/// repositories are judged over the time they have actually existed.
pub(crate) fn window_start(
    now: DateTime<Utc>,
    months: u32,
    earliest: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    let lookback = now.checked_sub_months(Months::new(months)).unwrap_or(now);
    match earliest {
        Some(earliest) if earliest > lookback => earliest,
        _ => lookback,
    }
}

/// Weeks between `start` and `now`, never less than one.
pub(crate) fn weeks_since(now: DateTime<Utc>, start: DateTime<Utc>) -> f64 {
    let weeks = (now - start).num_milliseconds() as f64 / MILLIS_PER_WEEK;
    weeks.max(1.0)
}

pub(crate) fn weeks_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_WEEK
}

/// Issues created inside the trailing window, plus the window start.
pub(crate) fn issues_in_window(
    issues: &[IssueInfo],
    now: DateTime<Utc>,
    months: u32,
) -> (DateTime<Utc>, Vec<&IssueInfo>) {
    let earliest = issues.iter().map(|issue| issue.created_at).min();
    let start = window_start(now, months, earliest);
    let opened = issues
        .iter()
        .filter(|issue| issue.created_at >= start)
        .collect();
    (start, opened)
}

/// Closed-to-opened ratio over issues created inside the trailing window.
///
/// Returns 0 when no issue falls inside the window.
pub fn issue_resolution_ratio(issues: &[IssueInfo], now: DateTime<Utc>, months: u32) -> f64 {
    let (_, opened) = issues_in_window(issues, now, months);
    if opened.is_empty() {
        return 0.0;
    }
    let closed = opened.iter().filter(|issue| issue.is_closed()).count();
    closed as f64 / opened.len() as f64
}
