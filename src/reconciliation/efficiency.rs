//! Time efficiency: how much of the real duration the standard covers

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Efficiency percentage in `[0, 100]`.
///
/// - Either input `<= 0` (or NaN): 0, there is nothing to compare
/// - `real <= standard`: 100, full credit
/// - Otherwise `standard / real * 100`
pub fn efficiency(standard: f64, real: f64) -> f64 {
    if real.is_nan() || standard.is_nan() || real <= 0.0 || standard <= 0.0 {
        return 0.0;
    }
    if real <= standard {
        return 100.0;
    }
    (standard / real * 100.0).clamp(0.0, 100.0)
}

/// Tri-state efficiency tag shared by every consumer of efficiency numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EfficiencySeverity {
    Ok,
    Warning,
    Critical,
}

impl EfficiencySeverity {
    /// Tag a percentage with the default thresholds (85 / 75).
    pub fn from_percent(percent: f64) -> Self {
        SeverityThresholds::default().classify(percent)
    }
}

impl std::fmt::Display for EfficiencySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencySeverity::Ok => write!(f, "OK"),
            EfficiencySeverity::Warning => write!(f, "WARNING"),
            EfficiencySeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Percent boundaries for `EfficiencySeverity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeverityThresholds {
    /// At or above: OK
    pub ok_percent: f64,
    /// At or above (and below `ok_percent`): WARNING; below: CRITICAL
    pub warning_percent: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            ok_percent: defaults::EFFICIENCY_OK_PERCENT,
            warning_percent: defaults::EFFICIENCY_WARNING_PERCENT,
        }
    }
}

impl SeverityThresholds {
    pub fn classify(&self, percent: f64) -> EfficiencySeverity {
        if percent >= self.ok_percent {
            EfficiencySeverity::Ok
        } else if percent >= self.warning_percent {
            EfficiencySeverity::Warning
        } else {
            EfficiencySeverity::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_over_standard() {
        let e = efficiency(5.0, 7.0);
        assert!((e - 71.428_571).abs() < 1e-4, "got {e}");
    }

    #[test]
    fn test_efficiency_full_credit_under_standard() {
        assert_eq!(efficiency(5.0, 3.0), 100.0);
        assert_eq!(efficiency(5.0, 5.0), 100.0);
    }

    #[test]
    fn test_efficiency_no_standard_or_no_real() {
        assert_eq!(efficiency(0.0, 4.0), 0.0);
        assert_eq!(efficiency(4.0, 0.0), 0.0);
        assert_eq!(efficiency(-1.0, 4.0), 0.0);
        assert_eq!(efficiency(f64::NAN, 4.0), 0.0);
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(EfficiencySeverity::from_percent(100.0), EfficiencySeverity::Ok);
        assert_eq!(EfficiencySeverity::from_percent(85.0), EfficiencySeverity::Ok);
        assert_eq!(EfficiencySeverity::from_percent(84.9), EfficiencySeverity::Warning);
        assert_eq!(EfficiencySeverity::from_percent(75.0), EfficiencySeverity::Warning);
        assert_eq!(EfficiencySeverity::from_percent(71.4), EfficiencySeverity::Critical);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = SeverityThresholds {
            ok_percent: 95.0,
            warning_percent: 90.0,
        };
        assert_eq!(thresholds.classify(92.0), EfficiencySeverity::Warning);
        assert_eq!(thresholds.classify(89.0), EfficiencySeverity::Critical);
    }
}
