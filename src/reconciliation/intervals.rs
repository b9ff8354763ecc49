//! Interval distribution: spread a whole-activity classification across the
//! sub-intervals of its time log.
//!
//! Every interval receives the same share of standard, productive time and
//! of every cause row as its share of the total real time. Causes are not
//! pinned to intervals; a cause recorded for the activity is assumed to run
//! across the whole logged span.

use serde::{Deserialize, Serialize};

use super::{rescale_breakdown, sanitize_duration};
use crate::types::{IntervalEntry, TimeClass, TimeClassification};

/// The part of a whole-activity classification attributed to one interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalAllocation {
    pub interval: IntervalEntry,
    /// `interval.real_hours / total_real_hours`
    pub factor: f64,
    pub classification: TimeClassification,
}

/// Distribute `whole` across `intervals`.
///
/// `kind` is the capture's tag: for TNPI / TNP captures every interval is
/// entirely excess.
pub fn distribute(
    total_real_hours: f64,
    intervals: &[IntervalEntry],
    whole: &TimeClassification,
    kind: TimeClass,
) -> Vec<IntervalAllocation> {
    let total_real_hours = sanitize_duration(total_real_hours);

    intervals
        .iter()
        .map(|interval| {
            let real_hours = sanitize_duration(interval.real_hours);
            let factor = if total_real_hours > 0.0 {
                real_hours / total_real_hours
            } else {
                0.0
            };

            let productive_hours = if kind == TimeClass::Tp {
                whole.productive_hours * factor
            } else {
                0.0
            };
            let excess_hours = (real_hours - productive_hours).max(0.0);
            let breakdown = rescale_breakdown(whole.breakdown.clone(), excess_hours);

            IntervalAllocation {
                interval: IntervalEntry {
                    real_hours,
                    ..interval.clone()
                },
                factor,
                classification: TimeClassification {
                    standard_hours: whole.standard_hours * factor,
                    real_hours,
                    productive_hours,
                    excess_hours,
                    excess_class: if excess_hours > 0.0 {
                        whole.excess_class
                    } else {
                        None
                    },
                    breakdown,
                },
            }
        })
        .collect()
}

/// Total real hours of a time log.
pub fn total_real_hours(intervals: &[IntervalEntry]) -> f64 {
    intervals.iter().map(|i| sanitize_duration(i.real_hours)).sum()
}
