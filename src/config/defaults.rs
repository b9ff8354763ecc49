//! System-wide default constants and built-in standards tables.
//!
//! These are the values used when no `rigbook.toml` is present. Operators
//! override any table through the `[[standards.*]]` config sections.

use crate::types::{AngleBucket, ConnectionStandard, ConnectionType};

// ============================================================================
// Engine
// ============================================================================

/// Tolerance for breakdown-sum and conservation checks (hours).
pub const SUM_TOLERANCE_HOURS: f64 = 1e-6;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rigbook.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RIGBOOK_CONFIG";

// ============================================================================
// Efficiency
// ============================================================================

/// Efficiency at or above this is OK (%).
pub const EFFICIENCY_OK_PERCENT: f64 = 85.0;

/// Efficiency at or above this (and below OK) is a warning (%).
pub const EFFICIENCY_WARNING_PERCENT: f64 = 75.0;

// ============================================================================
// Connection standards (minutes: pre, connection, post)
// ============================================================================

pub const CONNECTION_STANDARDS: [(ConnectionType, AngleBucket, ConnectionStandard); 6] = [
    (
        ConnectionType::FullToFull,
        AngleBucket::Below30,
        ConnectionStandard::new(10.0, 4.0, 4.0),
    ),
    (
        ConnectionType::FullToFull,
        AngleBucket::From30To60,
        ConnectionStandard::new(12.0, 5.0, 5.0),
    ),
    (
        ConnectionType::FullToFull,
        AngleBucket::Above60,
        ConnectionStandard::new(14.0, 6.0, 6.0),
    ),
    (
        ConnectionType::FullToFullWithMpd,
        AngleBucket::Below30,
        ConnectionStandard::new(15.0, 6.0, 6.0),
    ),
    (
        ConnectionType::FullToFullWithMpd,
        AngleBucket::From30To60,
        ConnectionStandard::new(17.0, 7.0, 7.0),
    ),
    (
        ConnectionType::FullToFullWithMpd,
        AngleBucket::Above60,
        ConnectionStandard::new(20.0, 8.0, 8.0),
    ),
];

// ============================================================================
// Trip standards (velocity m/h, connection minutes)
// ============================================================================

pub const TRIP_STANDARDS: [(&str, f64, f64); 6] = [
    ("Trip in cased hole", 300.0, 3.0),
    ("Trip in open hole", 200.0, 4.0),
    ("Trip out cased hole", 280.0, 3.0),
    ("Trip out open hole", 180.0, 4.0),
    ("Casing run", 120.0, 5.0),
    ("Liner run", 100.0, 5.0),
];

// ============================================================================
// BHA standards (hours)
// ============================================================================

/// Assemble / disassemble hours for BHA types 1 through 10.
pub const BHA_STANDARD_HOURS: [(u8, f64, f64); 10] = [
    (1, 1.5, 1.0),
    (2, 2.0, 1.5),
    (3, 2.5, 2.0),
    (4, 3.0, 2.0),
    (5, 3.5, 2.5),
    (6, 4.0, 3.0),
    (7, 4.5, 3.0),
    (8, 5.0, 3.5),
    (9, 6.0, 4.0),
    (10, 7.0, 5.0),
];

