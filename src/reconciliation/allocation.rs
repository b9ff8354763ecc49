//! Cause allocation: attribute an excess duration to (category, detail) pairs

use super::{rescale_to_target, sanitize_duration, ReconcileError};
use crate::types::{CauseBreakdownEntry, CauseRef, CauseSelection, TimeClassification};

/// One cause takes the whole excess. No rows when there is no excess.
pub fn allocate_single(excess_hours: f64, cause: &CauseRef) -> Vec<CauseBreakdownEntry> {
    let excess_hours = sanitize_duration(excess_hours);
    if excess_hours <= 0.0 {
        return Vec::new();
    }
    vec![CauseBreakdownEntry {
        category: cause.category.clone(),
        detail: cause.detail.clone(),
        hours: excess_hours,
        comment: cause.comment.clone(),
    }]
}

/// Check a draft breakdown against the excess it must cover.
///
/// Never rescales: a draft that does not sum to `excess_hours` within
/// `tolerance` is rejected with the mismatch amount.
pub fn validate_breakdown(
    draft: &[CauseBreakdownEntry],
    excess_hours: f64,
    tolerance: f64,
) -> Result<(), ReconcileError> {
    let excess_hours = sanitize_duration(excess_hours);
    if draft.is_empty() {
        if excess_hours > tolerance {
            return Err(ReconcileError::EmptyBreakdownWithExcess { excess_hours });
        }
        return Ok(());
    }

    let actual_hours: f64 = draft.iter().map(|e| sanitize_duration(e.hours)).sum();
    let difference = excess_hours - actual_hours;
    if difference.abs() > tolerance {
        return Err(ReconcileError::BreakdownMismatch {
            expected_hours: excess_hours,
            actual_hours,
            mismatch_hours: difference.abs(),
        });
    }
    Ok(())
}

/// Produce the committed breakdown for an excess.
///
/// Accepted drafts are returned with invalid hours coerced to 0 and empty
/// rows removed.
pub fn allocate(
    selection: &CauseSelection,
    excess_hours: f64,
    tolerance: f64,
) -> Result<Vec<CauseBreakdownEntry>, ReconcileError> {
    match selection {
        CauseSelection::Single(cause) => Ok(allocate_single(excess_hours, cause)),
        CauseSelection::Breakdown(draft) => {
            validate_breakdown(draft, excess_hours, tolerance)?;
            Ok(draft
                .iter()
                .map(|e| CauseBreakdownEntry {
                    hours: sanitize_duration(e.hours),
                    ..e.clone()
                })
                .filter(|e| e.hours > 0.0)
                .collect())
        }
    }
}

/// Attach an allocated breakdown to a classification.
pub fn attach(
    mut classification: TimeClassification,
    selection: &CauseSelection,
    tolerance: f64,
) -> Result<TimeClassification, ReconcileError> {
    classification.breakdown = allocate(selection, classification.excess_hours, tolerance)?;
    Ok(classification)
}

/// Scale a breakdown so it sums to a new target excess.
///
/// Used when the target moves (interval redistribution). A draft summing
/// to 0 is left as is; rows with no hours after scaling are dropped.
pub fn rescale_breakdown(
    draft: Vec<CauseBreakdownEntry>,
    target: f64,
) -> Vec<CauseBreakdownEntry> {
    rescale_to_target(draft, |e| &mut e.hours, sanitize_duration(target))
        .into_iter()
        .filter(|e| e.hours > 0.0)
        .collect()
}
