//! Productive vs excess split for one activity

use super::sanitize_duration;
use crate::types::{ExcessClass, TimeClass, TimeClassification};

/// Split `real` into productive and excess hours.
///
/// - Non-productive capture: all of `real` is excess of that class
/// - TP with no standard: all of `real` is productive
/// - TP over standard: `standard` productive, the rest is excess of
///   `excess_class` (the operator's choice)
/// - TP within standard: all of `real` is productive
///
/// The breakdown is left empty; causes are attached by the allocator.
pub fn classify(
    standard: f64,
    real: f64,
    kind: TimeClass,
    excess_class: ExcessClass,
) -> TimeClassification {
    let standard = sanitize_duration(standard);
    let real = sanitize_duration(real);

    let (productive_hours, excess_hours, class) = match kind.excess_class() {
        Some(domain) => (0.0, real, domain),
        None if standard <= 0.0 => (real, 0.0, excess_class),
        None if real > standard => (standard, real - standard, excess_class),
        None => (real, 0.0, excess_class),
    };

    TimeClassification {
        standard_hours: standard,
        real_hours: real,
        productive_hours,
        excess_hours,
        excess_class: (excess_hours > 0.0).then_some(class),
        breakdown: Vec::new(),
    }
}
