//! Due-date urgency classification.
//!
//! Pure: "now" is threaded in from a single call site per render pass so
//! tests can pin timestamps. A task may change tier between renders without
//! user action; that is expected, not a bug.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{Error, Result};

/// How close a task's due date is to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// No due date set.
    None,
    /// Due date is strictly in the past.
    Overdue,
    /// Due within the next 24 hours (inclusive of now, exclusive of now+24h).
    Urgent,
    /// Due 24 hours or more from now.
    Normal,
}

impl Urgency {
    /// Stable lowercase label for reports and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::None => "none",
            Urgency::Overdue => "overdue",
            Urgency::Urgent => "urgent",
            Urgency::Normal => "normal",
        }
    }
}

/// Maps a due timestamp against `now`.
///
/// Boundary policy: `due == now` is the start of the urgent window, not
/// overdue; `due == now + 24h` is already normal.
pub fn classify(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Urgency {
    let Some(due) = due_date else {
        return Urgency::None;
    };

    if due < now {
        Urgency::Overdue
    } else if due < now + Duration::hours(24) {
        Urgency::Urgent
    } else {
        Urgency::Normal
    }
}

/// Parses user-entered due dates: an RFC 3339 timestamp or a bare date
/// (midnight UTC).
pub fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(Error::InvalidArgument(format!(
        "invalid due date: {} (expected RFC 3339 or YYYY-MM-DD)",
        value
    )))
}
