//! Hour-of-day trip profiles used by the variable-standard trip mode

use serde::{Deserialize, Serialize};

/// Number of hour-of-day buckets in one trip profile.
pub const HOURS_PER_PROFILE: usize = 24;

/// Captured trip performance for one hour-of-day bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TripHourlySample {
    pub hour: u8,
    pub speed_m_per_hr: f64,
    /// Real minutes per connection made during this hour
    #[serde(default)]
    pub connection_min: f64,
}

/// Planned trip performance for one hour-of-day bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct StandardHourlySample {
    pub hour: u8,
    pub standard_speed: f64,
    #[serde(default)]
    pub standard_connection_min: f64,
    #[serde(default)]
    pub connection_count: u32,
}

/// Reconciled figures for one hour of a variable-standard trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HourlyTripRow {
    pub hour: u8,
    /// Distance attributed to this hour after scaling to the known total
    pub distance_m: f64,
    pub real_hours: f64,
    pub standard_hours: f64,
    /// `max(0, real - standard)` for this hour only
    pub excess_hours: f64,
}
