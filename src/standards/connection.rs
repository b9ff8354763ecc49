//! Connection aggregation: component minutes against the catalog standard
//!
//! Only preconnection, connection and postconnection carry a standard; the
//! other five components count fully as captured time. Excess is computed
//! once per connection from the aggregate, not per component.

use serde::{Deserialize, Serialize};

use crate::reconciliation::sanitize_duration;
use crate::types::{ConnectionComponent, ConnectionStandard, ConnectionTimes};

/// Display row for one component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComponentReconciliation {
    pub component: ConnectionComponent,
    pub standard_min: f64,
    pub real_min: f64,
    /// `real - standard`; negative when faster than standard
    pub delta_min: f64,
}

/// Aggregate reconciliation of one connection event (minutes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionSummary {
    pub standard: ConnectionStandard,
    pub components: Vec<ComponentReconciliation>,
    pub total_real_min: f64,
    pub total_standard_min: f64,
    pub tp_min: f64,
    pub excess_min: f64,
}

/// Reconcile captured component minutes against a connection standard.
///
/// Pass `ConnectionStandard::default()` for a missing table entry: with no
/// standard everything is productive and no excess is computed.
pub fn reconcile_connection(
    standard: ConnectionStandard,
    times: &ConnectionTimes,
) -> ConnectionSummary {
    let components: Vec<ComponentReconciliation> = ConnectionComponent::ALL
        .iter()
        .map(|&component| {
            let standard_min = sanitize_duration(standard.for_component(component));
            let real_min = sanitize_duration(times.get(component));
            ComponentReconciliation {
                component,
                standard_min,
                real_min,
                delta_min: real_min - standard_min,
            }
        })
        .collect();

    let total_real_min: f64 = components.iter().map(|c| c.real_min).sum();
    let total_standard_min: f64 = components.iter().map(|c| c.standard_min).sum();

    let (tp_min, excess_min) = if total_standard_min > 0.0 {
        (
            total_real_min.min(total_standard_min),
            (total_real_min - total_standard_min).max(0.0),
        )
    } else {
        (total_real_min, 0.0)
    };

    ConnectionSummary {
        standard,
        components,
        total_real_min,
        total_standard_min,
        tp_min,
        excess_min,
    }
}
