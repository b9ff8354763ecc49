//! Reconciliation Core
//!
//! Pure standard-vs-actual time math. Nothing here logs, allocates state
//! between calls or performs I/O; the same inputs always give bit-identical
//! outputs.
//!
//! - `efficiency()` - standard/real as a clamped percentage
//! - `classify()` - productive vs excess split for one activity
//! - `allocate()` - attribute an excess to one or many causes
//! - `distribute()` - spread a classification across logged intervals
//! - `rescale_to_target()` - shared "scale a collection to sum to X" step

pub mod allocation;
pub mod efficiency;
pub mod excess;
pub mod intervals;
pub mod rescale;

pub use allocation::{allocate, allocate_single, attach, rescale_breakdown, validate_breakdown};
pub use efficiency::{efficiency, EfficiencySeverity, SeverityThresholds};
pub use excess::classify;
pub use intervals::{distribute, total_real_hours, IntervalAllocation};
pub use rescale::rescale_to_target;

use thiserror::Error;

/// Tolerance for "sums to" checks on hours.
pub const SUM_TOLERANCE: f64 = crate::config::defaults::SUM_TOLERANCE_HOURS;

/// Rejections that must reach the operator. Nothing is committed when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    #[error(
        "Cause breakdown sums to {actual_hours:.4} h but the excess is {expected_hours:.4} h \
         (mismatch {mismatch_hours:.4} h)"
    )]
    BreakdownMismatch {
        expected_hours: f64,
        actual_hours: f64,
        mismatch_hours: f64,
    },

    #[error("Cause breakdown is empty but {excess_hours:.4} h of excess must be attributed")]
    EmptyBreakdownWithExcess { excess_hours: f64 },
}

impl ReconcileError {
    /// Hours the operator has to add or remove to make the draft valid.
    pub fn mismatch_hours(&self) -> f64 {
        match self {
            ReconcileError::BreakdownMismatch { mismatch_hours, .. } => *mismatch_hours,
            ReconcileError::EmptyBreakdownWithExcess { excess_hours } => *excess_hours,
        }
    }
}

/// Coerce a captured duration to a usable value: NaN, infinities and
/// negatives become 0.
pub fn sanitize_duration(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Whether `value` would be changed by `sanitize_duration`.
pub fn is_invalid_duration(value: f64) -> bool {
    !value.is_finite() || value < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_duration() {
        assert_eq!(sanitize_duration(2.5), 2.5);
        assert_eq!(sanitize_duration(-1.0), 0.0);
        assert_eq!(sanitize_duration(f64::NAN), 0.0);
        assert_eq!(sanitize_duration(f64::INFINITY), 0.0);
        assert!(is_invalid_duration(-0.5));
        assert!(!is_invalid_duration(0.0));
    }

    #[test]
    fn test_mismatch_reported() {
        let err = ReconcileError::BreakdownMismatch {
            expected_hours: 2.0,
            actual_hours: 1.0,
            mismatch_hours: 1.0,
        };
        assert_eq!(err.mismatch_hours(), 1.0);
        assert!(err.to_string().contains("mismatch 1.0000 h"));
    }
}
