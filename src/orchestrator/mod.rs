//! Reconciliation Orchestrator
//!
//! One call per operator commit. Each capture flow resolves its own
//! standard and real duration, then shares the same tail:
//!
//! 1. Classify productive vs excess
//! 2. Allocate the excess to causes (rejections stop here)
//! 3. Efficiency and severity
//! 4. Distribute across the time log, if one was captured
//! 5. Build ledger rows
//!
//! The engine holds only the standards tables and settings it was built
//! with; it never mutates anything between calls.

pub mod rows;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::reconciliation::{
    attach, classify, distribute, efficiency, is_invalid_duration, sanitize_duration,
    total_real_hours, EfficiencySeverity, IntervalAllocation, ReconcileError, SeverityThresholds,
};
use crate::standards::{
    fixed_trip, hourly_trip, reconcile_connection, ConnectionSummary, FixedTripResult,
    HourlyFallback, HourlyTripResult, StandardsTables,
};
use crate::types::{
    ActivityInfo, BhaCapture, Capture, CaptureFlow, CaptureRequest, ConnectionCapture,
    ConnectionComponent, DataQualityWarning, GeneralActivityCapture, IntervalEntry, LedgerRow,
    RealDuration, TimeClass, TimeClassification, TripCapture, TripMode, HOURS_PER_PROFILE,
};

const MINUTES_PER_HOUR: f64 = 60.0;

// ============================================================================
// Settings & Output
// ============================================================================

/// Numeric policy the engine is built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Accept band for breakdown sums (hours)
    pub tolerance: f64,
    pub severity: SeverityThresholds,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tolerance: crate::reconciliation::SUM_TOLERANCE,
            severity: SeverityThresholds::default(),
        }
    }
}

impl From<&EngineConfig> for EngineSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            tolerance: config.engine.tolerance,
            severity: config.efficiency,
        }
    }
}

/// Flow-specific figures kept for display next to the ledger rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum FlowDetail {
    General,
    Connection(ConnectionSummary),
    Bha { standard_hours: Option<f64> },
    FixedTrip(FixedTripResult),
    HourlyTrip(HourlyTripResult),
}

/// Everything produced for one commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    pub activity_id: String,
    pub flow: CaptureFlow,
    /// Tag the operator captured under
    pub capture_class: TimeClass,
    /// Whole-activity split with its committed cause breakdown
    pub classification: TimeClassification,
    pub efficiency_percent: f64,
    pub severity: EfficiencySeverity,
    /// Per-interval split; empty when no time log was captured
    pub intervals: Vec<IntervalAllocation>,
    /// Rows for the caller to append to the ledger
    pub rows: Vec<LedgerRow>,
    pub detail: FlowDetail,
    pub warnings: Vec<DataQualityWarning>,
}

/// Flow output waiting for the shared classification tail.
struct Pending<'a> {
    info: &'a ActivityInfo,
    flow: CaptureFlow,
    capture: &'a Capture,
    base: TimeClassification,
    intervals: Option<&'a [IntervalEntry]>,
    detail: FlowDetail,
    warnings: Vec<DataQualityWarning>,
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    standards: StandardsTables,
    settings: EngineSettings,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(StandardsTables::builtin(), EngineSettings::default())
    }
}

impl ReconciliationEngine {
    pub fn new(standards: StandardsTables, settings: EngineSettings) -> Self {
        Self {
            standards,
            settings,
        }
    }

    /// Build from a validated config.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            StandardsTables::from_config(&config.standards),
            EngineSettings::from(config),
        )
    }

    pub fn standards(&self) -> &StandardsTables {
        &self.standards
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Reconcile one capture.
    ///
    /// Fails only on an invalid cause breakdown; every other data problem
    /// resolves to a documented default and is listed in `warnings`.
    pub fn reconcile(&self, request: &CaptureRequest) -> Result<Reconciliation, ReconcileError> {
        match request {
            CaptureRequest::General(c) => self.reconcile_general(c),
            CaptureRequest::Connection(c) => self.reconcile_connection(c),
            CaptureRequest::Bha(c) => self.reconcile_bha(c),
            CaptureRequest::Trip(c) => self.reconcile_trip(c),
        }
    }

    /// General activity: standard supplied by the caller.
    pub fn reconcile_general(
        &self,
        capture: &GeneralActivityCapture,
    ) -> Result<Reconciliation, ReconcileError> {
        let mut warnings = Vec::new();
        let standard = checked("standard_hours", capture.standard_hours, &mut warnings);
        let real = real_hours(&capture.real, &mut warnings);
        let kind = capture.capture.time_class();
        if kind == TimeClass::Tp && standard <= 0.0 {
            warnings.push(DataQualityWarning::ZeroStandard);
        }

        let (excess_class, _) = capture.capture.excess_attribution();
        self.finish(Pending {
            info: &capture.info,
            flow: CaptureFlow::General,
            capture: &capture.capture,
            base: classify(standard, real, kind, excess_class),
            intervals: capture.real.intervals(),
            detail: FlowDetail::General,
            warnings,
        })
    }

    /// Connection: standard from the (type, angle) table, excess on the aggregate.
    pub fn reconcile_connection(
        &self,
        capture: &ConnectionCapture,
    ) -> Result<Reconciliation, ReconcileError> {
        let mut warnings = Vec::new();
        let standard = self
            .standards
            .resolve_connection_standard(capture.connection_type, capture.angle_bucket)
            .unwrap_or_else(|| {
                warnings.push(DataQualityWarning::MissingConnectionStandard {
                    connection_type: capture.connection_type,
                    angle_bucket: capture.angle_bucket,
                });
                Default::default()
            });

        let mut times = capture.times;
        for component in ConnectionComponent::ALL {
            let field = format!("times.{}", component.display_name());
            let value = times.get_mut(component);
            *value = checked(&field, *value, &mut warnings);
        }

        let summary = reconcile_connection(standard, &times);
        let kind = capture.capture.time_class();
        let (excess_class, _) = capture.capture.excess_attribution();
        let base = classify(
            summary.total_standard_min / MINUTES_PER_HOUR,
            summary.total_real_min / MINUTES_PER_HOUR,
            kind,
            excess_class,
        );

        self.finish(Pending {
            info: &capture.info,
            flow: CaptureFlow::Connection,
            capture: &capture.capture,
            base,
            intervals: None,
            detail: FlowDetail::Connection(summary),
            warnings,
        })
    }

    /// BHA assembly / disassembly against the ten-type catalog.
    pub fn reconcile_bha(&self, capture: &BhaCapture) -> Result<Reconciliation, ReconcileError> {
        let mut warnings = Vec::new();
        let standard_hours = self
            .standards
            .resolve_bha_standard(capture.bha_type, capture.action);
        if standard_hours.is_none() {
            warnings.push(DataQualityWarning::MissingBhaStandard {
                bha_type: capture.bha_type,
                action: capture.action,
            });
        }
        let standard = sanitize_duration(standard_hours.unwrap_or_default());
        let real = real_hours(&capture.real, &mut warnings);

        let kind = capture.capture.time_class();
        let (excess_class, _) = capture.capture.excess_attribution();
        self.finish(Pending {
            info: &capture.info,
            flow: CaptureFlow::Bha,
            capture: &capture.capture,
            base: classify(standard, real, kind, excess_class),
            intervals: capture.real.intervals(),
            detail: FlowDetail::Bha { standard_hours },
            warnings,
        })
    }

    /// Pipe trip, fixed or hourly standards.
    pub fn reconcile_trip(&self, capture: &TripCapture) -> Result<Reconciliation, ReconcileError> {
        let mut warnings = Vec::new();
        let catalog_standard = self.standards.resolve_trip_standard(&capture.trip_activity);
        let kind = capture.capture.time_class();
        let (excess_class, _) = capture.capture.excess_attribution();

        let (base, detail) = match &capture.mode {
            TripMode::Fixed {
                distance_m,
                connection_count,
                real,
            } => {
                if catalog_standard.is_none() {
                    warnings.push(DataQualityWarning::MissingTripStandard {
                        trip_activity: capture.trip_activity.clone(),
                    });
                }
                let distance = checked("distance_m", *distance_m, &mut warnings);
                let result = fixed_trip(
                    distance,
                    *connection_count,
                    catalog_standard.unwrap_or_default(),
                    *real,
                );
                let base = classify(result.standard_hours, result.real_hours, kind, excess_class);
                (base, FlowDetail::FixedTrip(result))
            }
            TripMode::Hourly {
                distance_m,
                samples,
                standards,
                consider_connections,
                real_hours_override,
            } => {
                if samples.len() != HOURS_PER_PROFILE || standards.len() != HOURS_PER_PROFILE {
                    warnings.push(DataQualityWarning::IncompleteHourlyProfile {
                        samples: samples.len(),
                        standards: standards.len(),
                    });
                }
                let distance = distance_m.map(|d| checked("distance_m", d, &mut warnings));
                let result = hourly_trip(
                    samples,
                    standards,
                    distance,
                    *consider_connections,
                    HourlyFallback {
                        standard: catalog_standard,
                        real_hours_override: *real_hours_override,
                    },
                );
                if result.used_fallback {
                    warnings.push(DataQualityWarning::EmptyHourlyProfile {
                        distance_m: result.distance_m,
                    });
                    if catalog_standard.is_none() {
                        warnings.push(DataQualityWarning::MissingTripStandard {
                            trip_activity: capture.trip_activity.clone(),
                        });
                    }
                }
                // Hour-resolved split only when there is a standard to split against
                let base = if kind == TimeClass::Tp && result.standard_hours > 0.0 {
                    TimeClassification {
                        standard_hours: result.standard_hours,
                        real_hours: result.real_hours,
                        productive_hours: result.productive_hours,
                        excess_hours: result.excess_hours,
                        excess_class: (result.excess_hours > 0.0).then_some(excess_class),
                        breakdown: Vec::new(),
                    }
                } else {
                    classify(result.standard_hours, result.real_hours, kind, excess_class)
                };
                (base, FlowDetail::HourlyTrip(result))
            }
        };

        self.finish(Pending {
            info: &capture.info,
            flow: CaptureFlow::Trip,
            capture: &capture.capture,
            base,
            intervals: None,
            detail,
            warnings,
        })
    }

    /// Shared tail: causes, efficiency, intervals, rows.
    fn finish(&self, pending: Pending<'_>) -> Result<Reconciliation, ReconcileError> {
        let Pending {
            info,
            flow,
            capture,
            base,
            intervals,
            detail,
            warnings,
        } = pending;

        let kind = capture.time_class();
        let (_, causes) = capture.excess_attribution();

        let classification = attach(base, causes, self.settings.tolerance).map_err(|e| {
            debug!(activity_id = %info.activity_id, error = %e, "Cause breakdown rejected");
            e
        })?;

        let efficiency_percent =
            efficiency(classification.standard_hours, classification.real_hours);
        let severity = self.settings.severity.classify(efficiency_percent);

        let (allocations, ledger_rows) = match intervals {
            Some(entries) if !entries.is_empty() => {
                let allocations =
                    distribute(classification.real_hours, entries, &classification, kind);
                let ledger_rows = rows::rows_for_intervals(info, flow, kind, &allocations);
                (allocations, ledger_rows)
            }
            _ => (
                Vec::new(),
                rows::rows_for(info, flow, kind, &classification, None),
            ),
        };

        for w in &warnings {
            warn!(activity_id = %info.activity_id, flow = %flow, "{}", w);
        }
        debug!(
            activity_id = %info.activity_id,
            flow = %flow,
            class = %kind,
            standard_hours = classification.standard_hours,
            real_hours = classification.real_hours,
            excess_hours = classification.excess_hours,
            rows = ledger_rows.len(),
            "Reconciled capture"
        );

        Ok(Reconciliation {
            activity_id: info.activity_id.clone(),
            flow,
            capture_class: kind,
            classification,
            efficiency_percent,
            severity,
            intervals: allocations,
            rows: ledger_rows,
            detail,
            warnings,
        })
    }
}

/// Sanitize a captured duration, noting the coercion.
fn checked(field: &str, value: f64, warnings: &mut Vec<DataQualityWarning>) -> f64 {
    if is_invalid_duration(value) {
        warnings.push(DataQualityWarning::CoercedDuration {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    sanitize_duration(value)
}

/// Total real hours from a direct entry or a time log.
fn real_hours(real: &RealDuration, warnings: &mut Vec<DataQualityWarning>) -> f64 {
    match real {
        RealDuration::Hours(hours) => checked("real_hours", *hours, warnings),
        RealDuration::Intervals(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                checked(&format!("intervals[{i}].real_hours"), entry.real_hours, warnings);
            }
            total_real_hours(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AngleBucket, BhaAction, BhaType, CauseBreakdownEntry, CauseRef, CauseSelection,
        ConnectionTimes, ConnectionType, ExcessAttribution, ExcessClass, TripReal,
    };

    fn info(id: &str) -> ActivityInfo {
        ActivityInfo {
            activity_id: id.to_string(),
            activity: "Test activity".to_string(),
            comment: String::new(),
        }
    }

    fn tp_single() -> Capture {
        Capture::productive(ExcessClass::Tnpi, CauseRef::new("Equipment", "Top drive failure"))
    }

    #[test]
    fn test_general_over_standard_rows() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile_general(&GeneralActivityCapture {
                info: info("G-1"),
                standard_hours: 5.0,
                real: RealDuration::Hours(7.0),
                capture: tp_single(),
            })
            .unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].real_hours, 5.0);
        assert_eq!(result.rows[1].class, TimeClass::Tnpi);
        assert_eq!(result.rows[1].real_hours, 2.0);
        assert_eq!(result.severity, EfficiencySeverity::Critical);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_general_breakdown_mismatch_rejected() {
        let engine = ReconciliationEngine::default();
        let capture = Capture::Productive {
            excess: ExcessAttribution {
                class: ExcessClass::Tnp,
                causes: CauseSelection::Breakdown(vec![CauseBreakdownEntry::new(
                    "Weather", "Fog", 1.0,
                )]),
            },
        };
        let err = engine
            .reconcile_general(&GeneralActivityCapture {
                info: info("G-2"),
                standard_hours: 5.0,
                real: RealDuration::Hours(7.0),
                capture,
            })
            .unwrap_err();
        assert!((err.mismatch_hours() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_real_coerced_with_warning() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile_general(&GeneralActivityCapture {
                info: info("G-3"),
                standard_hours: 2.0,
                real: RealDuration::Hours(-4.0),
                capture: tp_single(),
            })
            .unwrap();
        assert_eq!(result.classification.real_hours, 0.0);
        assert!(matches!(
            result.warnings[0],
            DataQualityWarning::CoercedDuration { ref field, .. } if field == "real_hours"
        ));
    }

    #[test]
    fn test_connection_missing_standard_warns() {
        let engine = ReconciliationEngine::new(StandardsTables::default(), EngineSettings::default());
        let result = engine
            .reconcile_connection(&ConnectionCapture {
                info: info("C-1"),
                connection_type: ConnectionType::FullToFull,
                angle_bucket: AngleBucket::Below30,
                times: ConnectionTimes {
                    preconnection: 30.0,
                    ..Default::default()
                },
                capture: tp_single(),
            })
            .unwrap();
        assert_eq!(result.classification.excess_hours, 0.0);
        assert!((result.classification.productive_hours - 0.5).abs() < 1e-12);
        assert!(matches!(
            result.warnings[0],
            DataQualityWarning::MissingConnectionStandard { .. }
        ));
    }

    #[test]
    fn test_bha_over_standard() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile_bha(&BhaCapture {
                info: info("B-1"),
                bha_type: BhaType::new(4).unwrap(),
                action: BhaAction::Assemble,
                real: RealDuration::Hours(4.0),
                capture: tp_single(),
            })
            .unwrap();
        assert_eq!(result.detail, FlowDetail::Bha { standard_hours: Some(3.0) });
        assert_eq!(result.classification.excess_hours, 1.0);
    }

    #[test]
    fn test_fixed_trip_unknown_activity_warns() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile_trip(&TripCapture {
                info: info("T-1"),
                trip_activity: "Trip to the moon".to_string(),
                mode: TripMode::Fixed {
                    distance_m: 500.0,
                    connection_count: 0,
                    real: TripReal::Hours(3.0),
                },
                capture: tp_single(),
            })
            .unwrap();
        assert_eq!(result.classification.productive_hours, 3.0);
        assert_eq!(result.efficiency_percent, 0.0);
        assert!(matches!(
            result.warnings[0],
            DataQualityWarning::MissingTripStandard { .. }
        ));
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let engine = ReconciliationEngine::default();
        let request = CaptureRequest::General(GeneralActivityCapture {
            info: info("G-9"),
            standard_hours: 3.3,
            real: RealDuration::Intervals(vec![
                IntervalEntry::from_hours(1.1, ""),
                IntervalEntry::from_hours(2.9, ""),
            ]),
            capture: tp_single(),
        });
        let a = engine.reconcile(&request).unwrap();
        let b = engine.reconcile(&request).unwrap();
        assert_eq!(a, b);
    }
}
