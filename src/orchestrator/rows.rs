//! Ledger row construction from a classified activity

use crate::reconciliation::IntervalAllocation;
use crate::types::{
    ActivityInfo, CaptureFlow, IntervalEntry, IntervalSpan, LedgerRow, TimeClass,
    TimeClassification,
};

/// Rows for one activity: a TP row (productive captures only) followed by
/// one row per attributed cause.
pub fn rows_for(
    info: &ActivityInfo,
    flow: CaptureFlow,
    kind: TimeClass,
    classification: &TimeClassification,
    interval: Option<&IntervalEntry>,
) -> Vec<LedgerRow> {
    let base_comment = match interval {
        Some(i) if !i.comment.is_empty() => i.comment.as_str(),
        _ => info.comment.as_str(),
    };
    let span = interval.map(IntervalSpan::from);

    let mut rows = Vec::with_capacity(1 + classification.breakdown.len());

    if kind == TimeClass::Tp {
        rows.push(LedgerRow {
            activity_id: info.activity_id.clone(),
            activity: info.activity.clone(),
            flow,
            class: TimeClass::Tp,
            category: None,
            detail: None,
            standard_hours: classification.standard_hours,
            real_hours: classification.productive_hours,
            comment: base_comment.to_string(),
            interval: span,
        });
    }

    if let Some(excess_class) = classification.excess_class {
        for cause in &classification.breakdown {
            let comment = if cause.comment.is_empty() {
                base_comment
            } else {
                cause.comment.as_str()
            };
            rows.push(LedgerRow {
                activity_id: info.activity_id.clone(),
                activity: info.activity.clone(),
                flow,
                class: excess_class.into(),
                category: Some(cause.category.clone()),
                detail: Some(cause.detail.clone()),
                standard_hours: 0.0,
                real_hours: cause.hours,
                comment: comment.to_string(),
                interval: span,
            });
        }
    }

    rows
}

/// Rows for every interval of a distributed activity, in log order.
pub fn rows_for_intervals(
    info: &ActivityInfo,
    flow: CaptureFlow,
    kind: TimeClass,
    allocations: &[IntervalAllocation],
) -> Vec<LedgerRow> {
    allocations
        .iter()
        .flat_map(|a| rows_for(info, flow, kind, &a.classification, Some(&a.interval)))
        .collect()
}
