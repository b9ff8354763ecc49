//! Standards Resolvers
//!
//! Static lookup tables (built once from config) and the flow-specific
//! math that turns captured values into a standard and a real duration.
//!
//! - `StandardsTables` - connection, trip and BHA tables
//! - `connection::reconcile_connection()` - per-connection aggregate
//! - `trip::fixed_trip()` / `trip::hourly_trip()` - trip standards

pub mod connection;
pub mod trip;

pub use connection::{reconcile_connection, ComponentReconciliation, ConnectionSummary};
pub use trip::{fixed_trip, hourly_trip, FixedTripResult, HourlyFallback, HourlyTripResult};

use std::collections::HashMap;

use crate::config::StandardsConfig;
use crate::types::{
    AngleBucket, BhaAction, BhaType, ConnectionStandard, ConnectionType, TripStandard,
};

/// All standards tables, keyed for direct lookup.
///
/// A missing key is not an error: callers get `None` and treat the
/// standard as 0.
#[derive(Debug, Clone, Default)]
pub struct StandardsTables {
    connection: HashMap<(ConnectionType, AngleBucket), ConnectionStandard>,
    trip: HashMap<String, (String, TripStandard)>,
    bha: HashMap<(BhaType, BhaAction), f64>,
}

impl StandardsTables {
    /// Build lookup tables from validated config entries.
    ///
    /// BHA entries with an out-of-range type are skipped (config validation
    /// already reports them).
    pub fn from_config(config: &StandardsConfig) -> Self {
        let mut tables = Self::default();
        for entry in &config.connection {
            tables.insert_connection(
                entry.connection_type,
                entry.angle_bucket,
                ConnectionStandard::new(entry.preconnection, entry.connection, entry.postconnection),
            );
        }
        for entry in &config.trip {
            tables.insert_trip(
                &entry.activity,
                TripStandard {
                    velocity_m_per_hr: entry.velocity_m_per_hr,
                    connection_time_min: entry.connection_time_min,
                },
            );
        }
        for entry in &config.bha {
            if let Ok(bha_type) = BhaType::new(entry.bha_type) {
                tables.insert_bha(bha_type, entry.action, entry.standard_hours);
            }
        }
        tables
    }

    /// Built-in tables from `config::defaults`.
    pub fn builtin() -> Self {
        Self::from_config(&StandardsConfig::default())
    }

    pub fn insert_connection(
        &mut self,
        connection_type: ConnectionType,
        angle_bucket: AngleBucket,
        standard: ConnectionStandard,
    ) {
        self.connection.insert((connection_type, angle_bucket), standard);
    }

    pub fn insert_trip(&mut self, activity: &str, standard: TripStandard) {
        self.trip
            .insert(trip_key(activity), (activity.trim().to_string(), standard));
    }

    pub fn insert_bha(&mut self, bha_type: BhaType, action: BhaAction, standard_hours: f64) {
        self.bha.insert((bha_type, action), standard_hours);
    }

    /// Standard minutes for a connection key.
    pub fn resolve_connection_standard(
        &self,
        connection_type: ConnectionType,
        angle_bucket: AngleBucket,
    ) -> Option<ConnectionStandard> {
        self.connection.get(&(connection_type, angle_bucket)).copied()
    }

    /// Fixed-mode trip standard. Names match ignoring case and surrounding spaces.
    pub fn resolve_trip_standard(&self, activity: &str) -> Option<TripStandard> {
        self.trip.get(&trip_key(activity)).map(|(_, s)| *s)
    }

    /// Standard hours for assembling or disassembling a BHA type.
    pub fn resolve_bha_standard(&self, bha_type: BhaType, action: BhaAction) -> Option<f64> {
        self.bha.get(&(bha_type, action)).copied()
    }

    /// Trip activity names as configured, sorted.
    pub fn trip_activities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.trip.values().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names
    }
}

fn trip_key(activity: &str) -> String {
    activity.trim().to_lowercase()
}
