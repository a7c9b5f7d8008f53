//! Risk factors: the per-component axes of a score breakdown.
//!
//! A factor usually maps 1:1 to a measurement. Blood pressure is the
//! exception: systolic and diastolic are entered separately but always
//! contribute as one combined factor.

use crate::measurement::Measurement;

/// One axis of the risk breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    Age,
    Glucose,
    Bmi,
    BloodPressure,
    Insulin,
    Cholesterol,
    Triglycerides,
}

/// All known `Factor` variants in canonical report order.
pub const ALL_FACTORS: &[Factor] = &[
    Factor::Age,
    Factor::Glucose,
    Factor::Bmi,
    Factor::BloodPressure,
    Factor::Insulin,
    Factor::Cholesterol,
    Factor::Triglycerides,
];

/// Returns the snake_case name for a factor (used in breakdowns and config).
pub fn factor_name(factor: Factor) -> &'static str {
    match factor {
        Factor::Age => "age",
        Factor::Glucose => "glucose",
        Factor::Bmi => "bmi",
        Factor::BloodPressure => "blood_pressure",
        Factor::Insulin => "insulin",
        Factor::Cholesterol => "cholesterol",
        Factor::Triglycerides => "triglycerides",
    }
}

impl Factor {
    /// Snake_case identifier, same as [`factor_name`].
    pub fn name(self) -> &'static str {
        factor_name(self)
    }

    /// Measurements this factor is computed from.
    pub fn measurements(self) -> &'static [Measurement] {
        match self {
            Factor::Age => &[Measurement::Age],
            Factor::Glucose => &[Measurement::Glucose],
            Factor::Bmi => &[Measurement::Bmi],
            Factor::BloodPressure => &[Measurement::SystolicBp, Measurement::DiastolicBp],
            Factor::Insulin => &[Measurement::Insulin],
            Factor::Cholesterol => &[Measurement::Cholesterol],
            Factor::Triglycerides => &[Measurement::Triglycerides],
        }
    }

    /// The single backing measurement for scalar factors, `None` for the
    /// combined blood pressure factor.
    pub fn scalar_measurement(self) -> Option<Measurement> {
        match self {
            Factor::BloodPressure => None,
            other => other.measurements().first().copied(),
        }
    }
}
