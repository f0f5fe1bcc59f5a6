// Time and formatting helpers shared across the engine and its clients.

use chrono::{DateTime, Utc};

/// Converts an epoch-milliseconds wire timestamp into a `DateTime<Utc>`.
/// Returns `None` for values outside chrono's representable range.
pub fn datetime_from_millis(ts_millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts_millis)
}

pub fn millis_from_datetime(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Win rate as a fraction in [0, 1]; 0 when there are no closed trades.
pub fn win_rate(winners: usize, closed: usize) -> f64 {
    if closed == 0 {
        0.0
    } else {
        winners as f64 / closed as f64
    }
}

/// Formats a signed PnL amount with a leading sign, e.g. "+125.50" / "-3.20".
pub fn format_pnl(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{:.2}", amount)
    } else {
        format!("{:.2}", amount)
    }
}
