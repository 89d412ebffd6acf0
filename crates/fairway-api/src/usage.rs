//! Daily AI analysis usage counter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of analyses consumed on a given calendar day.
///
/// Stored as `{"date": "YYYY-MM-DD", "count": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter {
    pub date: NaiveDate,
    pub count: u32,
}

impl UsageCounter {
    /// A zeroed counter for `day`
    pub fn fresh(day: NaiveDate) -> Self {
        Self {
            date: day,
            count: 0,
        }
    }

    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}
