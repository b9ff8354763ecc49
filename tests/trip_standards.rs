//! Trip reconciliation through the engine: fixed catalog standards,
//! hour-by-hour standards and the empty-profile fallback.

use rigbook::types::{
    ActivityInfo, Capture, CaptureRequest, CauseRef, ExcessClass, StandardHourlySample,
    TripCapture, TripHourlySample, TripMode, TripReal,
};
use rigbook::{DataQualityWarning, FlowDetail, ReconciliationEngine};

const EPS: f64 = 1e-6;

fn trip(activity: &str, mode: TripMode) -> CaptureRequest {
    CaptureRequest::Trip(TripCapture {
        info: ActivityInfo {
            activity_id: "TRIP-7".to_string(),
            activity: activity.to_string(),
            comment: String::new(),
        },
        trip_activity: activity.to_string(),
        mode,
        capture: Capture::productive(ExcessClass::Tnpi, CauseRef::new("Operations", "Tight hole")),
    })
}

fn full_day(
    speed: impl Fn(u8) -> f64,
    standard_speed: impl Fn(u8) -> f64,
) -> (Vec<TripHourlySample>, Vec<StandardHourlySample>) {
    let samples = (0..24)
        .map(|h| TripHourlySample {
            hour: h,
            speed_m_per_hr: speed(h),
            connection_min: 6.0,
        })
        .collect();
    let standards = (0..24)
        .map(|h| StandardHourlySample {
            hour: h,
            standard_speed: standard_speed(h),
            standard_connection_min: 4.0,
            connection_count: 1,
        })
        .collect();
    (samples, standards)
}

#[test]
fn fixed_trip_uses_catalog_entry_case_insensitively() {
    let engine = ReconciliationEngine::default();
    let r = engine
        .reconcile(&trip(
            "trip in cased hole",
            TripMode::Fixed {
                distance_m: 900.0,
                connection_count: 10,
                real: TripReal::Hours(5.0),
            },
        ))
        .unwrap();

    // 900 m at 300 m/h + 10 x 3 min
    assert!((r.classification.standard_hours - 3.5).abs() < EPS);
    assert!((r.classification.excess_hours - 1.5).abs() < EPS);
    let FlowDetail::FixedTrip(detail) = r.detail else {
        panic!("expected fixed trip detail");
    };
    assert!((detail.velocity_standard_hours - 3.0).abs() < EPS);
    assert!((detail.connection_standard_hours - 0.5).abs() < EPS);
    assert_eq!(detail.velocity_real_hours, None);
}

#[test]
fn hourly_trip_fast_hours_do_not_offset_slow_hours() {
    let engine = ReconciliationEngine::default();
    // Even hours twice the standard speed, odd hours half of it
    let (samples, standards) = full_day(
        |h| if h % 2 == 0 { 200.0 } else { 50.0 },
        |_| 100.0,
    );
    let r = engine
        .reconcile(&trip(
            "Trip out open hole",
            TripMode::Hourly {
                distance_m: Some(3000.0),
                samples,
                standards,
                consider_connections: false,
                real_hours_override: None,
            },
        ))
        .unwrap();

    let FlowDetail::HourlyTrip(detail) = &r.detail else {
        panic!("expected hourly trip detail");
    };
    assert_eq!(detail.rows.len(), 24);
    assert!(!detail.used_fallback);
    // Inferred 12 x 200 + 12 x 50 = 3000 m, no scaling needed
    assert!((detail.inferred_distance_m - 3000.0).abs() < EPS);
    // Slow hours: 50 m at 50 m/h = 1 h real vs 0.5 h standard
    assert!((detail.rows[1].excess_hours - 0.5).abs() < EPS);
    assert_eq!(detail.rows[0].excess_hours, 0.0);
    assert!((detail.velocity_excess_hours - 6.0).abs() < EPS);
    assert!((r.classification.excess_hours - 6.0).abs() < EPS);
    assert!(
        (r.classification.productive_hours + r.classification.excess_hours
            - r.classification.real_hours)
            .abs()
            < EPS
    );
    assert!(r.warnings.is_empty());
}

#[test]
fn hourly_trip_nets_connection_time() {
    let engine = ReconciliationEngine::default();
    let (samples, standards) = full_day(|_| 100.0, |_| 100.0);
    let r = engine
        .reconcile(&trip(
            "Trip out open hole",
            TripMode::Hourly {
                distance_m: Some(1200.0),
                samples,
                standards,
                consider_connections: true,
                real_hours_override: None,
            },
        ))
        .unwrap();

    let FlowDetail::HourlyTrip(detail) = &r.detail else {
        panic!("expected hourly trip detail");
    };
    // 24 connections x (6 - 4) min
    assert!((detail.connection_excess_hours - 0.8).abs() < EPS);
    assert_eq!(detail.velocity_excess_hours, 0.0);
    assert!((r.classification.excess_hours - 0.8).abs() < EPS);
    assert!((r.classification.real_hours - (12.0 + 2.4)).abs() < EPS);
}

#[test]
fn empty_hourly_profile_falls_back_to_catalog_velocity() {
    let engine = ReconciliationEngine::default();
    let r = engine
        .reconcile(&trip(
            "Trip in open hole",
            TripMode::Hourly {
                distance_m: Some(1000.0),
                samples: Vec::new(),
                standards: Vec::new(),
                consider_connections: false,
                real_hours_override: Some(6.0),
            },
        ))
        .unwrap();

    // 1000 m at 200 m/h
    assert!((r.classification.standard_hours - 5.0).abs() < EPS);
    assert!((r.classification.excess_hours - 1.0).abs() < EPS);
    assert!(r
        .warnings
        .iter()
        .any(|w| matches!(w, DataQualityWarning::EmptyHourlyProfile { .. })));
    assert!(r
        .warnings
        .iter()
        .any(|w| matches!(w, DataQualityWarning::IncompleteHourlyProfile { samples: 0, .. })));
}

#[test]
fn empty_profile_without_override_has_no_excess() {
    let engine = ReconciliationEngine::default();
    let r = engine
        .reconcile(&trip(
            "Casing run",
            TripMode::Hourly {
                distance_m: Some(600.0),
                samples: Vec::new(),
                standards: Vec::new(),
                consider_connections: false,
                real_hours_override: None,
            },
        ))
        .unwrap();
    assert!((r.classification.real_hours - 5.0).abs() < EPS);
    assert_eq!(r.classification.excess_hours, 0.0);
    assert_eq!(r.efficiency_percent, 100.0);
}

#[test]
fn empty_profile_for_unknown_activity_matches_fixed_mode() {
    let engine = ReconciliationEngine::default();
    let hourly = engine
        .reconcile(&trip(
            "Unknown trip",
            TripMode::Hourly {
                distance_m: Some(600.0),
                samples: (0..24)
                    .map(|h| TripHourlySample {
                        hour: h,
                        speed_m_per_hr: 0.0,
                        connection_min: 0.0,
                    })
                    .collect(),
                standards: Vec::new(),
                consider_connections: false,
                real_hours_override: Some(4.0),
            },
        ))
        .unwrap();
    let fixed = engine
        .reconcile(&trip(
            "Unknown trip",
            TripMode::Fixed {
                distance_m: 600.0,
                connection_count: 0,
                real: TripReal::Hours(4.0),
            },
        ))
        .unwrap();

    assert_eq!(hourly.classification.standard_hours, 0.0);
    assert_eq!(hourly.classification.productive_hours, 4.0);
    assert_eq!(hourly.classification.excess_hours, 0.0);
    assert_eq!(
        hourly.classification.productive_hours,
        fixed.classification.productive_hours
    );
    assert_eq!(hourly.rows.len(), 1);
    assert!(hourly
        .warnings
        .iter()
        .any(|w| matches!(w, DataQualityWarning::MissingTripStandard { .. })));
}
