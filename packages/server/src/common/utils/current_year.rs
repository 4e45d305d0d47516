use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Start of the calendar year containing `now`, as epoch milliseconds.
///
/// Payment dates are stored as epoch millis. A payment belongs to the "current
/// year" when `payment_date >= current_year_start_millis(now)`; there is no
/// upper bound, so future-dated payments count too.
pub fn current_year_start_millis(now: DateTime<Utc>) -> i64 {
    Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis())
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
