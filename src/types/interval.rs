//! Time-log ("bitácora") sub-intervals covering one activity's real duration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Largest accepted gap between a supplied duration and its start/end span (one minute).
pub const SPAN_TOLERANCE_HOURS: f64 = 1.0 / 60.0;

/// One row of a user-entered time log.
///
/// On input `real_hours` may be omitted when both `start` and `end` are
/// given; it is then derived from the span.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "RawIntervalEntry")]
pub struct IntervalEntry {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub real_hours: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error("interval needs real_hours or both start and end")]
    MissingDuration,

    #[error("real_hours {supplied_hours} h disagrees with the {span_hours:.4} h between start and end")]
    SpanMismatch { supplied_hours: f64, span_hours: f64 },
}

/// Time-log row as it arrives from the caller.
#[derive(Deserialize)]
struct RawIntervalEntry {
    #[serde(default)]
    start: Option<NaiveTime>,
    #[serde(default)]
    end: Option<NaiveTime>,
    #[serde(default)]
    real_hours: Option<f64>,
    #[serde(default)]
    comment: String,
}

impl TryFrom<RawIntervalEntry> for IntervalEntry {
    type Error = IntervalError;

    fn try_from(raw: RawIntervalEntry) -> Result<Self, Self::Error> {
        let span = match (raw.start, raw.end) {
            (Some(start), Some(end)) => Some(span_hours(start, end)),
            _ => None,
        };
        let real_hours = match (raw.real_hours, span) {
            (Some(supplied), Some(span)) if (supplied - span).abs() > SPAN_TOLERANCE_HOURS => {
                return Err(IntervalError::SpanMismatch {
                    supplied_hours: supplied,
                    span_hours: span,
                });
            }
            (Some(supplied), _) => supplied,
            (None, Some(span)) => span,
            (None, None) => return Err(IntervalError::MissingDuration),
        };
        Ok(Self {
            start: raw.start,
            end: raw.end,
            real_hours,
            comment: raw.comment,
        })
    }
}

impl IntervalEntry {
    /// Build an interval from wall-clock times.
    ///
    /// An `end` earlier than `start` wraps past midnight (adds 24h).
    /// `end == start` is an empty interval.
    pub fn from_times(start: NaiveTime, end: NaiveTime, comment: impl Into<String>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            real_hours: span_hours(start, end),
            comment: comment.into(),
        }
    }

    /// Build an interval from a directly supplied duration.
    pub fn from_hours(real_hours: f64, comment: impl Into<String>) -> Self {
        Self {
            start: None,
            end: None,
            real_hours,
            comment: comment.into(),
        }
    }
}

/// Hours between two wall-clock times, wrapping past midnight.
pub fn span_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let secs = (end - start).num_seconds() as f64;
    let hours = secs / SECONDS_PER_HOUR;
    if hours < 0.0 {
        hours + HOURS_PER_DAY
    } else {
        hours
    }
}

/// Start/end pair copied onto ledger rows produced from an interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntervalSpan {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl From<&IntervalEntry> for IntervalSpan {
    fn from(entry: &IntervalEntry) -> Self {
        Self {
            start: entry.start,
            end: entry.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_span_same_day() {
        let entry = IntervalEntry::from_times(t(6, 0), t(8, 30), "");
        assert!((entry.real_hours - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_span_wraps_past_midnight() {
        let entry = IntervalEntry::from_times(t(22, 0), t(1, 0), "night shift");
        assert!((entry.real_hours - 3.0).abs() < 1e-9);
        assert_eq!(entry.comment, "night shift");
    }

    #[test]
    fn test_span_equal_times_is_empty() {
        assert_eq!(span_hours(t(5, 0), t(5, 0)), 0.0);
    }

    #[test]
    fn test_json_span_derives_hours_past_midnight() {
        let entry: IntervalEntry =
            serde_json::from_str(r#"{"start":"22:00:00","end":"01:00:00"}"#).unwrap();
        assert!((entry.real_hours - 3.0).abs() < 1e-9);
        assert_eq!(entry.start, Some(t(22, 0)));
    }

    #[test]
    fn test_json_hours_only() {
        let entry: IntervalEntry =
            serde_json::from_str(r#"{"real_hours":1.25,"comment":"standby"}"#).unwrap();
        assert_eq!(entry.real_hours, 1.25);
        assert_eq!(entry.start, None);
    }

    #[test]
    fn test_json_contradicting_hours_rejected() {
        let err = serde_json::from_str::<IntervalEntry>(
            r#"{"start":"22:00:00","end":"01:00:00","real_hours":7.5}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("disagrees"));
    }

    #[test]
    fn test_json_without_duration_rejected() {
        assert!(serde_json::from_str::<IntervalEntry>(r#"{"start":"22:00:00"}"#).is_err());
    }

    #[test]
    fn test_serialized_entry_reads_back() {
        let entry = IntervalEntry::from_times(t(23, 30), t(0, 15), "wrap");
        let json = serde_json::to_string(&entry).unwrap();
        let back: IntervalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
