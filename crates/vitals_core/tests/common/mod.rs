use vitals_core::measurement::{Measurement, MeasurementRecord};

/// Test helper: a record inside every low-risk range of the built-in
/// categorical profiles.
///
/// For tests that need one factor out of range, override the measurement:
/// `record_all_in_range().with(Measurement::Glucose, 150.0)`.
pub fn record_all_in_range() -> MeasurementRecord {
    MeasurementRecord::new()
        .with(Measurement::Age, 50.0)
        .with(Measurement::Glucose, 90.0)
        .with(Measurement::Bmi, 22.0)
        .with(Measurement::SystolicBp, 110.0)
        .with(Measurement::DiastolicBp, 70.0)
        .with(Measurement::Insulin, 10.0)
        .with(Measurement::Cholesterol, 180.0)
        .with(Measurement::Triglycerides, 100.0)
}
