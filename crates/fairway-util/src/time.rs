//! Time utilities for fairway
//!
//! Provides wall-clock time (for post timestamps), the calendar day used
//! by the daily usage counter, and relative "time ago" rendering.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `FAIRWAY_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for exercising the daily
//! analysis limit rollover without waiting for midnight.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! FAIRWAY_MOCK_TIME="2025-12-25 23:59:30" fairway usage
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "FAIRWAY_MOCK_TIME";

/// Format accepted by `FAIRWAY_MOCK_TIME`
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between mock time and real time, computed once at first use.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, MOCK_TIME_FORMAT) {
                    Ok(naive_dt) => {
                        if let Some(mock_dt) = Local.from_local_datetime(&naive_dt).single() {
                            let offset = mock_dt.signed_duration_since(chrono::Local::now());
                            tracing::info!(
                                mock_time = %mock_time_str,
                                offset_secs = offset.num_seconds(),
                                "Mock time enabled"
                            );
                            return Some(offset);
                        }
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            "Failed to convert mock time to local timezone"
                        );
                    }
                    Err(_) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// The calendar day the usage counter is keyed by.
///
/// Days are UTC days so the counter rolls over at the same instant no
/// matter which timezone the machine is configured for.
pub fn today() -> NaiveDate {
    day_of(&now())
}

/// The usage-counter calendar day containing `dt`
pub fn day_of<Tz: TimeZone>(dt: &DateTime<Tz>) -> NaiveDate {
    dt.with_timezone(&Utc).date_naive()
}

/// Milliseconds since the Unix epoch, as stored in post and reply timestamps
pub fn epoch_millis<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.timestamp_millis()
}

const SECS_PER_YEAR: f64 = 31_536_000.0;
const SECS_PER_MONTH: f64 = 2_592_000.0;
const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Render how long ago `timestamp_ms` was, relative to `now_ms`.
///
/// A unit is only used once more than one whole unit has elapsed, so
/// exactly 60 seconds still reads "60 seconds ago".
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    let seconds = (now_ms - timestamp_ms).div_euclid(1000);
    if seconds < 5 {
        return "Just now".to_string();
    }

    let secs = seconds as f64;
    let units = [
        (SECS_PER_YEAR, "years"),
        (SECS_PER_MONTH, "months"),
        (SECS_PER_DAY, "days"),
        (SECS_PER_HOUR, "hours"),
        (SECS_PER_MINUTE, "minutes"),
    ];

    for (unit_secs, label) in units {
        let interval = secs / unit_secs;
        if interval > 1.0 {
            return format!("{} {} ago", interval.floor() as i64, label);
        }
    }

    format!("{} seconds ago", seconds)
}
