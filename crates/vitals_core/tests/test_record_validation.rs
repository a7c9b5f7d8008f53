//! Measurement record validation tests.
//!
//! Records reject before scoring: every required measurement must be
//! present, finite, and inside its accepted entry domain. Extra
//! measurements are ignored, never an error.

use vitals_core::measurement::{ALL_MEASUREMENTS, Measurement, MeasurementRecord, RecordError};

mod common;
use common::record_all_in_range;

#[test]
fn test_set_then_get_roundtrip() {
    let mut record = MeasurementRecord::new();
    assert!(record.is_empty());
    record.set(Measurement::Glucose, 95.0);
    assert_eq!(record.get(Measurement::Glucose), Some(95.0));
    assert_eq!(record.get(Measurement::Age), None);
    assert_eq!(record.len(), 1);
}

#[test]
fn test_set_twice_keeps_last_value() {
    let record = MeasurementRecord::new()
        .with(Measurement::Bmi, 22.0)
        .with(Measurement::Bmi, 31.0);
    assert_eq!(record.get(Measurement::Bmi), Some(31.0));
    assert_eq!(record.len(), 1);
}

#[test]
fn test_require_missing_fails_closed() {
    let record = MeasurementRecord::new();
    match record.require(Measurement::Insulin) {
        Err(RecordError::MissingField {
            measurement: Measurement::Insulin,
        }) => {}
        other => panic!("expected MissingField for insulin, got {other:?}"),
    }
}

#[test]
fn test_validate_full_record_passes() {
    let record = record_all_in_range();
    assert!(record.validate_against(ALL_MEASUREMENTS).is_ok());
}

#[test]
fn test_validate_reports_missing_field() {
    let record = MeasurementRecord::new()
        .with(Measurement::Age, 50.0)
        .with(Measurement::Glucose, 90.0);
    let shape = [Measurement::Age, Measurement::Glucose, Measurement::Bmi];
    match record.validate_against(&shape) {
        Err(RecordError::MissingField {
            measurement: Measurement::Bmi,
        }) => {}
        other => panic!("expected MissingField for bmi, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_nan() {
    let record = record_all_in_range().with(Measurement::Glucose, f64::NAN);
    match record.validate_against(&[Measurement::Glucose]) {
        Err(RecordError::OutOfDomain {
            measurement: Measurement::Glucose,
            value,
        }) => assert!(value.is_nan()),
        other => panic!("expected OutOfDomain for NaN glucose, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_infinity() {
    let record = record_all_in_range().with(Measurement::Bmi, f64::INFINITY);
    match record.validate_against(&[Measurement::Bmi]) {
        Err(RecordError::OutOfDomain {
            measurement: Measurement::Bmi,
            ..
        }) => {}
        other => panic!("expected OutOfDomain for infinite bmi, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_value_above_domain() {
    let record = record_all_in_range().with(Measurement::Age, 150.0);
    match record.validate_against(&[Measurement::Age]) {
        Err(RecordError::OutOfDomain {
            measurement: Measurement::Age,
            value,
        }) => assert_eq!(value, 150.0),
        other => panic!("expected OutOfDomain for age 150, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_value_below_domain() {
    let record = record_all_in_range().with(Measurement::Glucose, 10.0);
    match record.validate_against(&[Measurement::Glucose]) {
        Err(RecordError::OutOfDomain {
            measurement: Measurement::Glucose,
            ..
        }) => {}
        other => panic!("expected OutOfDomain for glucose 10, got {other:?}"),
    }
}

#[test]
fn test_domain_bounds_are_inclusive() {
    for &measurement in ALL_MEASUREMENTS {
        let (min, max) = measurement.entry_domain();
        let at_min = record_all_in_range().with(measurement, min);
        let at_max = record_all_in_range().with(measurement, max);
        assert!(
            at_min.validate_against(&[measurement]).is_ok(),
            "{} at domain min should pass",
            measurement.name()
        );
        assert!(
            at_max.validate_against(&[measurement]).is_ok(),
            "{} at domain max should pass",
            measurement.name()
        );
    }
}

#[test]
fn test_extra_measurements_are_ignored() {
    // Shape asks only for age; the rest of the record is irrelevant,
    // even if a value there would be out of domain.
    let record = record_all_in_range().with(Measurement::Triglycerides, 10_000.0);
    assert!(record.validate_against(&[Measurement::Age]).is_ok());
}

#[test]
fn test_first_violation_in_shape_order_wins() {
    let record = MeasurementRecord::new().with(Measurement::Glucose, f64::NAN);
    // Age is listed first and missing, so it is reported before the NaN.
    let shape = [Measurement::Age, Measurement::Glucose];
    match record.validate_against(&shape) {
        Err(RecordError::MissingField {
            measurement: Measurement::Age,
        }) => {}
        other => panic!("expected age reported first, got {other:?}"),
    }
}

#[test]
fn test_measurement_names_unique_and_nonempty() {
    let mut names: Vec<&str> = ALL_MEASUREMENTS.iter().map(|m| m.name()).collect();
    for name in &names {
        assert!(!name.is_empty());
    }
    names.sort();
    names.dedup();
    assert_eq!(names.len(), ALL_MEASUREMENTS.len());
}

#[test]
fn test_entry_domains_are_well_formed() {
    for &measurement in ALL_MEASUREMENTS {
        let (min, max) = measurement.entry_domain();
        assert!(min.is_finite() && max.is_finite() && min < max);
    }
}

#[test]
fn test_iteration_order_is_fixed_not_insertion_order() {
    let forward = MeasurementRecord::new()
        .with(Measurement::Age, 50.0)
        .with(Measurement::Glucose, 90.0);
    let reversed = MeasurementRecord::new()
        .with(Measurement::Glucose, 90.0)
        .with(Measurement::Age, 50.0);
    let forward_keys: Vec<Measurement> = forward.iter().map(|(m, _)| m).collect();
    let reversed_keys: Vec<Measurement> = reversed.iter().map(|(m, _)| m).collect();
    assert_eq!(forward_keys, reversed_keys);
    assert_eq!(forward_keys, vec![Measurement::Age, Measurement::Glucose]);
}
