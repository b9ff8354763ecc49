//! Standards-table keys and values for connections, trips and BHA handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Connections
// ============================================================================

/// Drill-string connection practice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    FullToFull,
    #[serde(alias = "FullToFullWithMPD")]
    FullToFullWithMpd,
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::FullToFull => write!(f, "Full to full"),
            ConnectionType::FullToFullWithMpd => write!(f, "Full to full with MPD"),
        }
    }
}

/// Hole-angle range used as part of the connection standards key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AngleBucket {
    #[serde(rename = "<30")]
    Below30,
    #[serde(rename = "30-60")]
    From30To60,
    #[serde(rename = ">60")]
    Above60,
}

impl AngleBucket {
    /// Bucket a hole inclination in degrees. 30 and 60 both fall in the middle bucket.
    pub fn from_degrees(degrees: f64) -> Self {
        if degrees < 30.0 {
            AngleBucket::Below30
        } else if degrees <= 60.0 {
            AngleBucket::From30To60
        } else {
            AngleBucket::Above60
        }
    }
}

impl std::fmt::Display for AngleBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleBucket::Below30 => write!(f, "<30°"),
            AngleBucket::From30To60 => write!(f, "30-60°"),
            AngleBucket::Above60 => write!(f, ">60°"),
        }
    }
}

/// The eight timed parts of a connection event.
///
/// Only the first three have a catalog standard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConnectionComponent {
    Preconnection,
    Connection,
    Postconnection,
    Reaming,
    Survey,
    RssCommands,
    Slug,
    ReducedPressure,
}

impl ConnectionComponent {
    pub const ALL: [ConnectionComponent; 8] = [
        ConnectionComponent::Preconnection,
        ConnectionComponent::Connection,
        ConnectionComponent::Postconnection,
        ConnectionComponent::Reaming,
        ConnectionComponent::Survey,
        ConnectionComponent::RssCommands,
        ConnectionComponent::Slug,
        ConnectionComponent::ReducedPressure,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionComponent::Preconnection => "Preconnection",
            ConnectionComponent::Connection => "Connection",
            ConnectionComponent::Postconnection => "Postconnection",
            ConnectionComponent::Reaming => "Reaming",
            ConnectionComponent::Survey => "Survey",
            ConnectionComponent::RssCommands => "RSS commands",
            ConnectionComponent::Slug => "Slug",
            ConnectionComponent::ReducedPressure => "Reduced pressure",
        }
    }
}

/// Captured real minutes per connection component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ConnectionTimes {
    pub preconnection: f64,
    pub connection: f64,
    pub postconnection: f64,
    pub reaming: f64,
    pub survey: f64,
    pub rss_commands: f64,
    pub slug: f64,
    pub reduced_pressure: f64,
}

impl ConnectionTimes {
    pub fn get(&self, component: ConnectionComponent) -> f64 {
        match component {
            ConnectionComponent::Preconnection => self.preconnection,
            ConnectionComponent::Connection => self.connection,
            ConnectionComponent::Postconnection => self.postconnection,
            ConnectionComponent::Reaming => self.reaming,
            ConnectionComponent::Survey => self.survey,
            ConnectionComponent::RssCommands => self.rss_commands,
            ConnectionComponent::Slug => self.slug,
            ConnectionComponent::ReducedPressure => self.reduced_pressure,
        }
    }

    pub fn get_mut(&mut self, component: ConnectionComponent) -> &mut f64 {
        match component {
            ConnectionComponent::Preconnection => &mut self.preconnection,
            ConnectionComponent::Connection => &mut self.connection,
            ConnectionComponent::Postconnection => &mut self.postconnection,
            ConnectionComponent::Reaming => &mut self.reaming,
            ConnectionComponent::Survey => &mut self.survey,
            ConnectionComponent::RssCommands => &mut self.rss_commands,
            ConnectionComponent::Slug => &mut self.slug,
            ConnectionComponent::ReducedPressure => &mut self.reduced_pressure,
        }
    }

    pub fn total(&self) -> f64 {
        ConnectionComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Standard minutes for one (connection type, angle bucket) key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ConnectionStandard {
    pub preconnection: f64,
    pub connection: f64,
    pub postconnection: f64,
}

impl ConnectionStandard {
    pub const fn new(preconnection: f64, connection: f64, postconnection: f64) -> Self {
        Self {
            preconnection,
            connection,
            postconnection,
        }
    }

    pub fn total(&self) -> f64 {
        self.preconnection + self.connection + self.postconnection
    }

    /// Standard minutes for a component; components without a catalog value are 0.
    pub fn for_component(&self, component: ConnectionComponent) -> f64 {
        match component {
            ConnectionComponent::Preconnection => self.preconnection,
            ConnectionComponent::Connection => self.connection,
            ConnectionComponent::Postconnection => self.postconnection,
            _ => 0.0,
        }
    }
}

// ============================================================================
// BHA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandardKeyError {
    #[error("BHA type {0} is outside the catalog range 1..=10")]
    InvalidBhaType(u8),
}

/// Bottom-hole assembly catalog type, 1 through 10.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct BhaType(u8);

impl BhaType {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, StandardKeyError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(StandardKeyError::InvalidBhaType(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All ten catalog types in order.
    pub fn all() -> impl Iterator<Item = BhaType> {
        (Self::MIN..=Self::MAX).map(BhaType)
    }
}

impl TryFrom<u8> for BhaType {
    type Error = StandardKeyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BhaType> for u8 {
    fn from(value: BhaType) -> Self {
        value.0
    }
}

impl std::fmt::Display for BhaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BHA type {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BhaAction {
    Assemble,
    Disassemble,
}

impl std::fmt::Display for BhaAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BhaAction::Assemble => write!(f, "Assemble"),
            BhaAction::Disassemble => write!(f, "Disassemble"),
        }
    }
}

// ============================================================================
// Trips
// ============================================================================

/// Fixed-mode trip standard for one trip activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TripStandard {
    pub velocity_m_per_hr: f64,
    pub connection_time_min: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_bucket_boundaries() {
        assert_eq!(AngleBucket::from_degrees(0.0), AngleBucket::Below30);
        assert_eq!(AngleBucket::from_degrees(29.9), AngleBucket::Below30);
        assert_eq!(AngleBucket::from_degrees(30.0), AngleBucket::From30To60);
        assert_eq!(AngleBucket::from_degrees(60.0), AngleBucket::From30To60);
        assert_eq!(AngleBucket::from_degrees(60.1), AngleBucket::Above60);
    }

    #[test]
    fn test_bha_type_range() {
        assert!(BhaType::new(0).is_err());
        assert!(BhaType::new(11).is_err());
        assert_eq!(BhaType::new(10).map(BhaType::get), Ok(10));
        assert_eq!(BhaType::all().count(), 10);
    }

    #[test]
    fn test_bha_type_rejected_on_deserialize() {
        let parsed: Result<BhaType, _> = serde_json::from_str("12");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_connection_times_total_and_standard_components() {
        let times = ConnectionTimes {
            preconnection: 15.0,
            connection: 4.0,
            postconnection: 6.0,
            survey: 2.0,
            ..Default::default()
        };
        assert_eq!(times.total(), 27.0);

        let standard = ConnectionStandard::new(12.0, 5.0, 5.0);
        assert_eq!(standard.total(), 22.0);
        assert_eq!(standard.for_component(ConnectionComponent::Survey), 0.0);
    }
}
