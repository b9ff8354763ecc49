//! Ledger rows handed back to the caller and the non-fatal data-quality
//! warnings raised while producing them.

use serde::{Deserialize, Serialize};

use super::{AngleBucket, BhaAction, BhaType, ConnectionType, IntervalSpan, TimeClass};

/// Which capture flow produced a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaptureFlow {
    General,
    Connection,
    Bha,
    Trip,
}

impl std::fmt::Display for CaptureFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureFlow::General => write!(f, "General activity"),
            CaptureFlow::Connection => write!(f, "Connection"),
            CaptureFlow::Bha => write!(f, "BHA"),
            CaptureFlow::Trip => write!(f, "Trip"),
        }
    }
}

/// One row appended to the activity ledger. Durations are hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRow {
    pub activity_id: String,
    pub activity: String,
    pub flow: CaptureFlow,
    pub class: TimeClass,
    /// Cause category; `None` on TP rows
    pub category: Option<String>,
    pub detail: Option<String>,
    pub standard_hours: f64,
    pub real_hours: f64,
    pub comment: String,
    /// Time-log interval this row was distributed to, if any
    pub interval: Option<IntervalSpan>,
}

/// Non-fatal condition the caller should surface as a data-quality note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Negative or non-finite duration replaced with 0
    CoercedDuration { field: String, value: String },
    MissingConnectionStandard {
        connection_type: ConnectionType,
        angle_bucket: AngleBucket,
    },
    MissingTripStandard { trip_activity: String },
    MissingBhaStandard { bha_type: BhaType, action: BhaAction },
    /// No standard to compare against; everything counted as captured
    ZeroStandard,
    /// Hourly trip profile had no distance; fixed-mode velocity math used
    EmptyHourlyProfile { distance_m: f64 },
    /// Hourly profile rows missing for some hours of the day
    IncompleteHourlyProfile { samples: usize, standards: usize },
}

impl std::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQualityWarning::CoercedDuration { field, value } => {
                write!(f, "{field}: invalid duration {value} treated as 0")
            }
            DataQualityWarning::MissingConnectionStandard {
                connection_type,
                angle_bucket,
            } => write!(
                f,
                "No connection standard for {connection_type} at {angle_bucket}"
            ),
            DataQualityWarning::MissingTripStandard { trip_activity } => {
                write!(f, "No trip standard for '{trip_activity}'")
            }
            DataQualityWarning::MissingBhaStandard { bha_type, action } => {
                write!(f, "No standard for {bha_type} ({action})")
            }
            DataQualityWarning::ZeroStandard => {
                write!(f, "Standard is 0: no excess can be computed")
            }
            DataQualityWarning::EmptyHourlyProfile { distance_m } => write!(
                f,
                "Hourly profile carries no distance for a {distance_m:.0} m trip; using fixed standard"
            ),
            DataQualityWarning::IncompleteHourlyProfile { samples, standards } => write!(
                f,
                "Hourly profile incomplete: {samples} real and {standards} standard rows (expected 24)"
            ),
        }
    }
}
