//! Query time windows.

use chrono::{Days, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Half-open-ended time window over battle event timestamps.
///
/// Either bound may be absent. Both bounds are inclusive, matching the
/// original `BETWEEN` queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimeWindow {
    /// Window covering everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Explicit window from optional bounds.
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Resolve a time-range keyword relative to `now`.
    ///
    /// Keywords follow the original filter set: `today`, `yesterday`,
    /// `week`, `month`, `three_months`, `all`. Unknown keywords resolve to
    /// `None` so callers can reject them with a proper error.
    pub fn from_keyword(keyword: &str, now: NaiveDateTime) -> Option<Self> {
        let today = now.date();
        let day_start = |d: chrono::NaiveDate| d.and_hms_opt(0, 0, 0).unwrap();
        let day_end = |d: chrono::NaiveDate| d.and_hms_opt(23, 59, 59).unwrap();

        let window = match keyword {
            "today" => Self::new(Some(day_start(today)), Some(day_end(today))),
            "yesterday" => {
                let y = today.checked_sub_days(Days::new(1))?;
                Self::new(Some(day_start(y)), Some(day_end(y)))
            }
            "week" => Self::new(
                Some(day_start(today.checked_sub_days(Days::new(7))?)),
                None,
            ),
            "month" => Self::new(
                Some(day_start(today.checked_sub_days(Days::new(30))?)),
                None,
            ),
            "three_months" => Self::new(
                Some(day_start(today.checked_sub_days(Days::new(90))?)),
                None,
            ),
            "all" => Self::all(),
            _ => return None,
        };
        Some(window)
    }

    /// Whether a timestamp falls inside the window.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

/// Parse the `YYYY-MM-DDTHH:MM` datetime format the clients send.
pub fn parse_client_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M").ok()
}
