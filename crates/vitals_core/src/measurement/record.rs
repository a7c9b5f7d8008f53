//! Measurement identities, accepted entry domains, and the assessment record.
//!
//! A record is a bag of named numeric observations for one person at one point
//! in time. Validation is fail-closed: scoring only ever sees records that have
//! every measurement its profile asks for, each one finite and inside the
//! accepted entry domain. Anything else is rejected before any math runs.

use std::collections::BTreeMap;
use std::fmt;

/// A single physiological measurement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measurement {
    /// Age in whole years.
    Age,
    /// Fasting blood glucose, mg/dL.
    Glucose,
    /// Body mass index, kg/m^2 (dimensionless in reports).
    Bmi,
    /// Systolic blood pressure, mm Hg.
    SystolicBp,
    /// Diastolic blood pressure, mm Hg.
    DiastolicBp,
    /// Fasting serum insulin, uIU/mL.
    Insulin,
    /// Total cholesterol, mg/dL.
    Cholesterol,
    /// Triglycerides, mg/dL.
    Triglycerides,
}

/// All known `Measurement` variants (for exhaustive iteration in tests).
pub const ALL_MEASUREMENTS: &[Measurement] = &[
    Measurement::Age,
    Measurement::Glucose,
    Measurement::Bmi,
    Measurement::SystolicBp,
    Measurement::DiastolicBp,
    Measurement::Insulin,
    Measurement::Cholesterol,
    Measurement::Triglycerides,
];

/// Returns the snake_case name for a measurement (stable across releases;
/// used in logs, fingerprints, and config files).
pub fn measurement_name(measurement: Measurement) -> &'static str {
    match measurement {
        Measurement::Age => "age",
        Measurement::Glucose => "glucose",
        Measurement::Bmi => "bmi",
        Measurement::SystolicBp => "systolic_bp",
        Measurement::DiastolicBp => "diastolic_bp",
        Measurement::Insulin => "insulin",
        Measurement::Cholesterol => "cholesterol",
        Measurement::Triglycerides => "triglycerides",
    }
}

impl Measurement {
    /// Snake_case identifier, same as [`measurement_name`].
    pub fn name(self) -> &'static str {
        measurement_name(self)
    }

    /// Display unit, or `None` for dimensionless measurements.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Measurement::Age => Some("years"),
            Measurement::Glucose => Some("mg/dL"),
            Measurement::Bmi => None,
            Measurement::SystolicBp => Some("mm Hg"),
            Measurement::DiastolicBp => Some("mm Hg"),
            Measurement::Insulin => Some("uIU/mL"),
            Measurement::Cholesterol => Some("mg/dL"),
            Measurement::Triglycerides => Some("mg/dL"),
        }
    }

    /// Inclusive `(min, max)` bounds a value must sit inside to be accepted.
    ///
    /// These are entry-validation bounds (what an intake form would allow),
    /// not clinical normals. Values outside them reject the whole record.
    pub fn entry_domain(self) -> (f64, f64) {
        match self {
            Measurement::Age => (18.0, 100.0),
            Measurement::Glucose => (50.0, 200.0),
            Measurement::Bmi => (10.0, 40.0),
            Measurement::SystolicBp => (80.0, 200.0),
            Measurement::DiastolicBp => (60.0, 130.0),
            Measurement::Insulin => (2.0, 300.0),
            Measurement::Cholesterol => (100.0, 400.0),
            Measurement::Triglycerides => (30.0, 600.0),
        }
    }
}

/// Validation failure for a measurement record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A measurement the profile requires is absent from the record.
    MissingField { measurement: Measurement },
    /// A value is non-finite or outside the accepted entry domain.
    OutOfDomain { measurement: Measurement, value: f64 },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField { measurement } => {
                write!(f, "required measurement '{}' is missing", measurement.name())
            }
            RecordError::OutOfDomain { measurement, value } => {
                let (min, max) = measurement.entry_domain();
                write!(
                    f,
                    "measurement '{}' value {} is outside the accepted domain [{}, {}]",
                    measurement.name(),
                    value,
                    min,
                    max
                )
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// One person's measurements for a single assessment.
///
/// Keys are unique per measurement kind; setting a measurement twice keeps the
/// last value. Iteration order is the fixed `Measurement` order, not insertion
/// order, which keeps downstream fingerprints input-order independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRecord {
    values: BTreeMap<Measurement, f64>,
}

impl MeasurementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Measurement, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Insert or replace one measurement.
    pub fn set(&mut self, measurement: Measurement, value: f64) {
        self.values.insert(measurement, value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, measurement: Measurement, value: f64) -> Self {
        self.set(measurement, value);
        self
    }

    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        self.values.get(&measurement).copied()
    }

    /// Fetch a measurement that must be present, failing closed if absent.
    pub fn require(&self, measurement: Measurement) -> Result<f64, RecordError> {
        self.get(measurement)
            .ok_or(RecordError::MissingField { measurement })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, f64)> + '_ {
        self.values.iter().map(|(&m, &v)| (m, v))
    }

    /// Validate this record against a required measurement shape.
    ///
    /// Every listed measurement must be present, finite, and inside its entry
    /// domain. The first violation is returned, checked in shape order.
    /// Measurements present in the record but absent from `shape` are ignored.
    pub fn validate_against(&self, shape: &[Measurement]) -> Result<(), RecordError> {
        for &measurement in shape {
            let value = self.require(measurement)?;
            if !value.is_finite() {
                return Err(RecordError::OutOfDomain { measurement, value });
            }
            let (min, max) = measurement.entry_domain();
            if value < min || value > max {
                return Err(RecordError::OutOfDomain { measurement, value });
            }
        }
        Ok(())
    }
}
