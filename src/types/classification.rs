//! Time classification vocabulary: TP / TNPI / TNP tags, cause rows and the
//! classified split of an activity's real duration.

use serde::{Deserialize, Serialize};

/// Ledger classification tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeClass {
    /// Productive time, within or below the standard
    #[serde(rename = "TP")]
    Tp,
    /// Non-productive improductive time (internal / avoidable causes)
    #[serde(rename = "TNPI")]
    Tnpi,
    /// Non-productive planned time (external / unavoidable causes)
    #[serde(rename = "TNP")]
    Tnp,
}

impl TimeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeClass::Tp => "TP",
            TimeClass::Tnpi => "TNPI",
            TimeClass::Tnp => "TNP",
        }
    }

    /// The excess domain this tag belongs to, if it is a non-productive tag.
    pub fn excess_class(&self) -> Option<ExcessClass> {
        match self {
            TimeClass::Tp => None,
            TimeClass::Tnpi => Some(ExcessClass::Tnpi),
            TimeClass::Tnp => Some(ExcessClass::Tnp),
        }
    }
}

impl std::fmt::Display for TimeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain an excess duration is attributed to.
///
/// Each domain has its own cause catalog, so this also serves as the
/// catalog selector (`CauseDomain`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ExcessClass {
    #[default]
    #[serde(rename = "TNPI")]
    Tnpi,
    #[serde(rename = "TNP")]
    Tnp,
}

/// Cause catalogs are keyed by the same two domains as excess.
pub type CauseDomain = ExcessClass;

impl From<ExcessClass> for TimeClass {
    fn from(class: ExcessClass) -> Self {
        match class {
            ExcessClass::Tnpi => TimeClass::Tnpi,
            ExcessClass::Tnp => TimeClass::Tnp,
        }
    }
}

impl std::fmt::Display for ExcessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TimeClass::from(*self).fmt(f)
    }
}

/// One (category, detail) cause pair with the hours attributed to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CauseBreakdownEntry {
    pub category: String,
    pub detail: String,
    pub hours: f64,
    #[serde(default)]
    pub comment: String,
}

impl CauseBreakdownEntry {
    pub fn new(category: impl Into<String>, detail: impl Into<String>, hours: f64) -> Self {
        Self {
            category: category.into(),
            detail: detail.into(),
            hours,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Classified split of one activity's real duration.
///
/// `productive_hours + excess_hours == real_hours`, and when `breakdown`
/// is non-empty its hours sum to `excess_hours`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeClassification {
    pub standard_hours: f64,
    pub real_hours: f64,
    pub productive_hours: f64,
    pub excess_hours: f64,
    /// `None` when there is no excess
    pub excess_class: Option<ExcessClass>,
    #[serde(default)]
    pub breakdown: Vec<CauseBreakdownEntry>,
}

impl TimeClassification {
    pub fn has_excess(&self) -> bool {
        self.excess_hours > 0.0
    }

    /// Sum of the attributed cause hours.
    pub fn breakdown_hours(&self) -> f64 {
        self.breakdown.iter().map(|e| e.hours).sum()
    }
}
