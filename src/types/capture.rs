//! Capture requests: what the operator commits for one activity, connection,
//! BHA event or trip.
//!
//! The capture kind is a closed enum so that a productive capture can only
//! carry an excess attribution and a non-productive capture can only carry
//! causes for its own domain.

use serde::{Deserialize, Serialize};

use super::{
    AngleBucket, BhaAction, BhaType, CauseBreakdownEntry, ConnectionTimes, ConnectionType,
    ExcessClass, IntervalEntry, StandardHourlySample, TimeClass, TripHourlySample,
};

/// A single (category, detail) cause taking the whole excess.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CauseRef {
    pub category: String,
    pub detail: String,
    #[serde(default)]
    pub comment: String,
}

impl CauseRef {
    pub fn new(category: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            detail: detail.into(),
            comment: String::new(),
        }
    }
}

/// How an excess duration is attributed to causes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CauseSelection {
    /// Whole excess to one cause
    Single(CauseRef),
    /// Operator-entered draft; must sum to the excess
    Breakdown(Vec<CauseBreakdownEntry>),
}

impl Default for CauseSelection {
    fn default() -> Self {
        CauseSelection::Breakdown(Vec::new())
    }
}

/// Attribution of any time over standard in a productive capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExcessAttribution {
    /// Operator's choice of domain for the excess
    #[serde(default)]
    pub class: ExcessClass,
    #[serde(default)]
    pub causes: CauseSelection,
}

/// Capture kind selected by the operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Capture {
    /// Productive; only time over standard is excess
    #[serde(rename = "TP")]
    Productive {
        #[serde(default)]
        excess: ExcessAttribution,
    },
    /// The whole duration is TNPI
    #[serde(rename = "TNPI")]
    Improductive { causes: CauseSelection },
    /// The whole duration is TNP
    #[serde(rename = "TNP")]
    Planned { causes: CauseSelection },
}

impl Capture {
    /// Productive capture whose excess (if any) goes to one cause.
    pub fn productive(class: ExcessClass, cause: CauseRef) -> Self {
        Capture::Productive {
            excess: ExcessAttribution {
                class,
                causes: CauseSelection::Single(cause),
            },
        }
    }

    pub fn time_class(&self) -> TimeClass {
        match self {
            Capture::Productive { .. } => TimeClass::Tp,
            Capture::Improductive { .. } => TimeClass::Tnpi,
            Capture::Planned { .. } => TimeClass::Tnp,
        }
    }

    /// Domain excess is attributed to, and the causes for it.
    pub fn excess_attribution(&self) -> (ExcessClass, &CauseSelection) {
        match self {
            Capture::Productive { excess } => (excess.class, &excess.causes),
            Capture::Improductive { causes } => (ExcessClass::Tnpi, causes),
            Capture::Planned { causes } => (ExcessClass::Tnp, causes),
        }
    }
}

/// Identification shared by every capture flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ActivityInfo {
    pub activity_id: String,
    /// Human-readable activity name
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub comment: String,
}

/// Real duration of an activity: entered directly or derived from a time log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RealDuration {
    Hours(f64),
    Intervals(Vec<IntervalEntry>),
}

impl RealDuration {
    pub fn intervals(&self) -> Option<&[IntervalEntry]> {
        match self {
            RealDuration::Hours(_) => None,
            RealDuration::Intervals(entries) => Some(entries),
        }
    }
}

/// General activity with its standard duration already known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralActivityCapture {
    pub info: ActivityInfo,
    pub standard_hours: f64,
    pub real: RealDuration,
    pub capture: Capture,
}

/// One drill-string connection event (all times in minutes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionCapture {
    pub info: ActivityInfo,
    pub connection_type: ConnectionType,
    pub angle_bucket: AngleBucket,
    pub times: ConnectionTimes,
    pub capture: Capture,
}

/// BHA assembly or disassembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BhaCapture {
    pub info: ActivityInfo,
    pub bha_type: BhaType,
    pub action: BhaAction,
    pub real: RealDuration,
    pub capture: Capture,
}

/// Captured real performance for a fixed-mode trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TripReal {
    Measured {
        velocity_m_per_hr: f64,
        connection_time_min: f64,
    },
    /// Real duration supplied directly
    Hours(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TripMode {
    /// Catalog velocity / connection-time standard
    Fixed {
        distance_m: f64,
        #[serde(default)]
        connection_count: u32,
        real: TripReal,
    },
    /// Hour-by-hour standards
    Hourly {
        #[serde(default)]
        distance_m: Option<f64>,
        samples: Vec<TripHourlySample>,
        standards: Vec<StandardHourlySample>,
        #[serde(default)]
        consider_connections: bool,
        /// Used only when the hourly profile is empty
        #[serde(default)]
        real_hours_override: Option<f64>,
    },
}

/// Pipe trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripCapture {
    pub info: ActivityInfo,
    /// Trip catalog key
    pub trip_activity: String,
    pub mode: TripMode,
    pub capture: Capture,
}

/// One operator commit, routed to the matching reconciliation flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum CaptureRequest {
    General(GeneralActivityCapture),
    Connection(ConnectionCapture),
    Bha(BhaCapture),
    Trip(TripCapture),
}

impl CaptureRequest {
    pub fn info(&self) -> &ActivityInfo {
        match self {
            CaptureRequest::General(c) => &c.info,
            CaptureRequest::Connection(c) => &c.info,
            CaptureRequest::Bha(c) => &c.info,
            CaptureRequest::Trip(c) => &c.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_request_from_json() {
        let json = r#"{
            "flow": "general",
            "info": { "activity_id": "A-17", "activity": "Circulate bottoms up" },
            "standard_hours": 5.0,
            "real": { "hours": 7.0 },
            "capture": {
                "type": "TP",
                "excess": {
                    "class": "TNP",
                    "causes": { "single": { "category": "Weather", "detail": "High winds" } }
                }
            }
        }"#;
        let request: CaptureRequest = serde_json::from_str(json).unwrap();
        let CaptureRequest::General(general) = request else {
            panic!("expected general capture");
        };
        assert_eq!(general.info.activity_id, "A-17");
        assert_eq!(general.capture.time_class(), TimeClass::Tp);
        let (class, causes) = general.capture.excess_attribution();
        assert_eq!(class, ExcessClass::Tnp);
        assert!(matches!(causes, CauseSelection::Single(c) if c.detail == "High winds"));
    }

    #[test]
    fn test_productive_capture_defaults_to_tnpi_excess() {
        let capture: Capture = serde_json::from_str(r#"{ "type": "TP" }"#).unwrap();
        let (class, causes) = capture.excess_attribution();
        assert_eq!(class, ExcessClass::Tnpi);
        assert_eq!(causes, &CauseSelection::Breakdown(Vec::new()));
    }

    #[test]
    fn test_non_productive_capture_domains() {
        let tnp = Capture::Planned {
            causes: CauseSelection::Single(CauseRef::new("Client", "Waiting on orders")),
        };
        assert_eq!(tnp.time_class(), TimeClass::Tnp);
        assert_eq!(tnp.excess_attribution().0, ExcessClass::Tnp);
    }
}
