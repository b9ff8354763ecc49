//! Trip standards: fixed catalog mode and hour-by-hour variable mode
//!
//! ## Fixed mode
//! `standard = distance / velocity + connections * connection_min / 60`,
//! each term 0 when its rate is not positive. Real time is computed the
//! same way from captured rates, or supplied directly.
//!
//! ## Hourly mode
//! Each hour's speed gives its distance share (speed x 1 h). When a total
//! trip distance is known the shares are scaled so they add up to it:
//! distance is ground truth, the speed profile only gives the shape. Excess
//! is summed per hour where real time exceeds standard time, so a fast hour
//! never hides a slow one.

use serde::{Deserialize, Serialize};

use crate::reconciliation::{rescale_to_target, sanitize_duration};
use crate::types::{
    HourlyTripRow, StandardHourlySample, TripHourlySample, TripReal, TripStandard,
    HOURS_PER_PROFILE,
};

const MINUTES_PER_HOUR: f64 = 60.0;

// ============================================================================
// Fixed mode
// ============================================================================

/// Standard and real hours of a fixed-mode trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FixedTripResult {
    pub velocity_standard_hours: f64,
    pub connection_standard_hours: f64,
    pub standard_hours: f64,
    /// `None` when the real duration was supplied directly
    pub velocity_real_hours: Option<f64>,
    pub connection_real_hours: Option<f64>,
    pub real_hours: f64,
}

/// `(velocity_hours, connection_hours)` for a distance at a rate.
pub fn trip_hours(
    distance_m: f64,
    velocity_m_per_hr: f64,
    connection_count: u32,
    connection_time_min: f64,
) -> (f64, f64) {
    let distance_m = sanitize_duration(distance_m);
    let velocity = sanitize_duration(velocity_m_per_hr);
    let velocity_hours = if velocity > 0.0 {
        distance_m / velocity
    } else {
        0.0
    };
    let connection_hours =
        f64::from(connection_count) * sanitize_duration(connection_time_min) / MINUTES_PER_HOUR;
    (velocity_hours, connection_hours)
}

/// Fixed-mode standard vs real for one trip.
pub fn fixed_trip(
    distance_m: f64,
    connection_count: u32,
    standard: TripStandard,
    real: TripReal,
) -> FixedTripResult {
    let (velocity_standard_hours, connection_standard_hours) = trip_hours(
        distance_m,
        standard.velocity_m_per_hr,
        connection_count,
        standard.connection_time_min,
    );

    let (velocity_real_hours, connection_real_hours, real_hours) = match real {
        TripReal::Measured {
            velocity_m_per_hr,
            connection_time_min,
        } => {
            let (v, c) = trip_hours(
                distance_m,
                velocity_m_per_hr,
                connection_count,
                connection_time_min,
            );
            (Some(v), Some(c), v + c)
        }
        TripReal::Hours(hours) => (None, None, sanitize_duration(hours)),
    };

    FixedTripResult {
        velocity_standard_hours,
        connection_standard_hours,
        standard_hours: velocity_standard_hours + connection_standard_hours,
        velocity_real_hours,
        connection_real_hours,
        real_hours,
    }
}

// ============================================================================
// Hourly mode
// ============================================================================

/// What to use when the hourly profile carries no distance at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourlyFallback {
    /// Catalog standard for the trip activity
    pub standard: Option<TripStandard>,
    /// Real velocity hours, if the operator supplied them
    pub real_hours_override: Option<f64>,
}

/// Hour-resolved reconciliation of a variable-standard trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HourlyTripResult {
    /// One row per hour of day; empty when the fallback was used
    pub rows: Vec<HourlyTripRow>,
    /// Sum of speed x 1 h before scaling
    pub inferred_distance_m: f64,
    /// Distance actually reconciled
    pub distance_m: f64,
    pub velocity_real_hours: f64,
    pub velocity_standard_hours: f64,
    pub velocity_excess_hours: f64,
    pub connection_real_hours: f64,
    pub connection_standard_hours: f64,
    pub connection_excess_hours: f64,
    pub real_hours: f64,
    pub standard_hours: f64,
    pub excess_hours: f64,
    pub productive_hours: f64,
    pub used_fallback: bool,
}

/// Per-hour profile laid out by hour of day.
struct Profile {
    speed: [f64; HOURS_PER_PROFILE],
    connection_min: [f64; HOURS_PER_PROFILE],
    standard_speed: [f64; HOURS_PER_PROFILE],
    standard_connection_min: [f64; HOURS_PER_PROFILE],
    connection_count: [u32; HOURS_PER_PROFILE],
}

impl Profile {
    /// Samples with an hour outside 0..24 are ignored; a repeated hour keeps the last sample.
    fn build(samples: &[TripHourlySample], standards: &[StandardHourlySample]) -> Self {
        let mut profile = Self {
            speed: [0.0; HOURS_PER_PROFILE],
            connection_min: [0.0; HOURS_PER_PROFILE],
            standard_speed: [0.0; HOURS_PER_PROFILE],
            standard_connection_min: [0.0; HOURS_PER_PROFILE],
            connection_count: [0; HOURS_PER_PROFILE],
        };
        for s in samples {
            let h = usize::from(s.hour);
            if h < HOURS_PER_PROFILE {
                profile.speed[h] = sanitize_duration(s.speed_m_per_hr);
                profile.connection_min[h] = sanitize_duration(s.connection_min);
            }
        }
        for s in standards {
            let h = usize::from(s.hour);
            if h < HOURS_PER_PROFILE {
                profile.standard_speed[h] = sanitize_duration(s.standard_speed);
                profile.standard_connection_min[h] = sanitize_duration(s.standard_connection_min);
                profile.connection_count[h] = s.connection_count;
            }
        }
        profile
    }
}

/// Reconcile a trip hour by hour.
///
/// `total_distance_m` is the known trip distance; `None` or `<= 0` uses the
/// inferred hourly distances as they are.
pub fn hourly_trip(
    samples: &[TripHourlySample],
    standards: &[StandardHourlySample],
    total_distance_m: Option<f64>,
    consider_connections: bool,
    fallback: HourlyFallback,
) -> HourlyTripResult {
    let profile = Profile::build(samples, standards);
    let known_distance = total_distance_m
        .map(sanitize_duration)
        .filter(|d| *d > 0.0);

    // 1. Distance share per hour: speed x 1 h
    let rows: Vec<HourlyTripRow> = (0..HOURS_PER_PROFILE)
        .map(|h| HourlyTripRow {
            hour: h as u8,
            distance_m: profile.speed[h],
            ..Default::default()
        })
        .collect();
    let inferred_distance_m: f64 = rows.iter().map(|r| r.distance_m).sum();

    let mut result = HourlyTripResult {
        inferred_distance_m,
        ..Default::default()
    };

    match known_distance {
        // No per-hour split possible: fixed-mode velocity math on the known distance
        Some(distance) if inferred_distance_m <= 0.0 => {
            let standard = fallback.standard.unwrap_or_default();
            let (velocity_standard, _) = trip_hours(distance, standard.velocity_m_per_hr, 0, 0.0);
            let velocity_real = fallback
                .real_hours_override
                .map_or(velocity_standard, sanitize_duration);
            result.distance_m = distance;
            result.velocity_standard_hours = velocity_standard;
            result.velocity_real_hours = velocity_real;
            // No catalog velocity: nothing to measure the real time against
            result.velocity_excess_hours = if velocity_standard > 0.0 {
                (velocity_real - velocity_standard).max(0.0)
            } else {
                0.0
            };
            result.used_fallback = true;
        }
        _ => {
            // 2. Scale shares to the known total
            let rows = match known_distance {
                Some(distance) => rescale_to_target(rows, |r| &mut r.distance_m, distance),
                None => rows,
            };

            // 3-4. Per-hour real / standard time and positive-only excess
            let rows: Vec<HourlyTripRow> = rows
                .into_iter()
                .map(|mut row| {
                    let h = usize::from(row.hour);
                    row.real_hours = time_at(row.distance_m, profile.speed[h]);
                    row.standard_hours = time_at(row.distance_m, profile.standard_speed[h]);
                    row.excess_hours = (row.real_hours - row.standard_hours).max(0.0);
                    row
                })
                .collect();

            result.distance_m = rows.iter().map(|r| r.distance_m).sum();
            result.velocity_real_hours = rows.iter().map(|r| r.real_hours).sum();
            result.velocity_standard_hours = rows.iter().map(|r| r.standard_hours).sum();
            result.velocity_excess_hours = rows.iter().map(|r| r.excess_hours).sum();
            result.rows = rows;
        }
    }

    // 5. Connections, netted over the whole trip
    if consider_connections {
        let (real_min, standard_min) = (0..HOURS_PER_PROFILE).fold((0.0, 0.0), |(r, s), h| {
            let count = f64::from(profile.connection_count[h]);
            (
                r + profile.connection_min[h] * count,
                s + profile.standard_connection_min[h] * count,
            )
        });
        result.connection_real_hours = real_min / MINUTES_PER_HOUR;
        result.connection_standard_hours = standard_min / MINUTES_PER_HOUR;
        result.connection_excess_hours = ((real_min - standard_min) / MINUTES_PER_HOUR).max(0.0);
    }

    // 6. Totals
    result.real_hours = result.velocity_real_hours + result.connection_real_hours;
    result.standard_hours = result.velocity_standard_hours + result.connection_standard_hours;
    result.excess_hours = result.velocity_excess_hours + result.connection_excess_hours;
    result.productive_hours = (result.real_hours - result.excess_hours).max(0.0);
    result
}

/// Hours to cover `distance_m` at `speed`; 0 when the speed is not positive.
fn time_at(distance_m: f64, speed: f64) -> f64 {
    if speed > 0.0 {
        distance_m / speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_profile(speed: f64, standard_speed: f64) -> (Vec<TripHourlySample>, Vec<StandardHourlySample>) {
        let samples = (0..24)
            .map(|h| TripHourlySample {
                hour: h,
                speed_m_per_hr: speed,
                connection_min: 0.0,
            })
            .collect();
        let standards = (0..24)
            .map(|h| StandardHourlySample {
                hour: h,
                standard_speed,
                standard_connection_min: 0.0,
                connection_count: 0,
            })
            .collect();
        (samples, standards)
    }

    #[test]
    fn test_fixed_trip_measured() {
        let standard = TripStandard {
            velocity_m_per_hr: 100.0,
            connection_time_min: 4.0,
        };
        let real = TripReal::Measured {
            velocity_m_per_hr: 80.0,
            connection_time_min: 6.0,
        };
        let r = fixed_trip(500.0, 4, standard, real);
        assert!((r.standard_hours - (5.0 + 16.0 / 60.0)).abs() < 1e-9);
        assert!((r.real_hours - 6.65).abs() < 1e-9);
        assert_eq!(r.velocity_real_hours, Some(6.25));
    }

    #[test]
    fn test_fixed_trip_zero_velocity_guarded() {
        let r = fixed_trip(500.0, 2, TripStandard::default(), TripReal::Hours(3.0));
        assert_eq!(r.standard_hours, 0.0);
        assert_eq!(r.real_hours, 3.0);
        assert_eq!(r.velocity_real_hours, None);
    }

    #[test]
    fn test_hourly_rescales_to_known_distance() {
        let (samples, standards) = flat_profile(100.0, 100.0);
        let r = hourly_trip(&samples, &standards, Some(1200.0), false, HourlyFallback::default());
        assert_eq!(r.inferred_distance_m, 2400.0);
        assert!((r.distance_m - 1200.0).abs() < 1e-6);
        assert!((r.rows[5].distance_m - 50.0).abs() < 1e-9);
        assert!((r.real_hours - 12.0).abs() < 1e-9);
        assert_eq!(r.excess_hours, 0.0);
    }

    #[test]
    fn test_hourly_fast_hour_does_not_mask_slow_hour() {
        let samples = vec![
            TripHourlySample { hour: 0, speed_m_per_hr: 50.0, connection_min: 0.0 },
            TripHourlySample { hour: 1, speed_m_per_hr: 200.0, connection_min: 0.0 },
        ];
        let standards = vec![
            StandardHourlySample { hour: 0, standard_speed: 100.0, ..Default::default() },
            StandardHourlySample { hour: 1, standard_speed: 100.0, ..Default::default() },
        ];
        let r = hourly_trip(&samples, &standards, None, false, HourlyFallback::default());
        // hour 0: 50 m in 1 h vs 0.5 h standard; hour 1: 200 m in 1 h vs 2 h standard
        assert!((r.rows[0].excess_hours - 0.5).abs() < 1e-9);
        assert_eq!(r.rows[1].excess_hours, 0.0);
        assert!((r.velocity_excess_hours - 0.5).abs() < 1e-9);
        assert!((r.real_hours - 2.0).abs() < 1e-9);
        assert!((r.productive_hours - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_hourly_connection_excess_is_netted() {
        let samples = vec![
            TripHourlySample { hour: 3, speed_m_per_hr: 100.0, connection_min: 6.0 },
            TripHourlySample { hour: 4, speed_m_per_hr: 100.0, connection_min: 2.0 },
        ];
        let standards = vec![
            StandardHourlySample { hour: 3, standard_speed: 100.0, standard_connection_min: 4.0, connection_count: 5 },
            StandardHourlySample { hour: 4, standard_speed: 100.0, standard_connection_min: 4.0, connection_count: 5 },
        ];
        let r = hourly_trip(&samples, &standards, None, true, HourlyFallback::default());
        // real 30 + 10 = 40 min, standard 20 + 20 = 40 min
        assert_eq!(r.connection_excess_hours, 0.0);
        assert!((r.connection_real_hours - 40.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_hourly_empty_profile_falls_back_to_fixed() {
        let (samples, standards) = flat_profile(0.0, 100.0);
        let fallback = HourlyFallback {
            standard: Some(TripStandard { velocity_m_per_hr: 200.0, connection_time_min: 3.0 }),
            real_hours_override: Some(4.0),
        };
        let r = hourly_trip(&samples, &standards, Some(600.0), false, fallback);
        assert!(r.used_fallback);
        assert!(r.rows.is_empty());
        assert_eq!(r.velocity_standard_hours, 3.0);
        assert_eq!(r.velocity_excess_hours, 1.0);
        assert_eq!(r.productive_hours, 3.0);
    }

    #[test]
    fn test_hourly_zero_standard_speed_counts_hour_as_excess() {
        let samples = vec![TripHourlySample { hour: 7, speed_m_per_hr: 120.0, connection_min: 0.0 }];
        let r = hourly_trip(&samples, &[], None, false, HourlyFallback::default());
        assert_eq!(r.rows[7].standard_hours, 0.0);
        assert_eq!(r.excess_hours, 1.0);
        assert_eq!(r.productive_hours, 0.0);
    }

    #[test]
    fn test_hourly_fallback_without_standard_has_no_excess() {
        let fallback = HourlyFallback {
            standard: None,
            real_hours_override: Some(4.0),
        };
        let r = hourly_trip(&[], &[], Some(600.0), false, fallback);
        assert!(r.used_fallback);
        assert_eq!(r.velocity_standard_hours, 0.0);
        assert_eq!(r.velocity_real_hours, 4.0);
        assert_eq!(r.excess_hours, 0.0);
        assert_eq!(r.productive_hours, 4.0);
    }
}
