//! Prompt construction for the advice generator.
//!
//! The prompt is plain English and fully determined by the profile, the
//! record, and the computed score. Same assessment, same prompt.

use crate::measurement::{Measurement, MeasurementRecord};
use crate::scoring::{RiskAssessment, ScoreProfile};

/// Prompt-facing label for a measurement.
fn prompt_label(measurement: Measurement) -> &'static str {
    match measurement {
        Measurement::Age => "Age",
        Measurement::Glucose => "Glucose Level",
        Measurement::Bmi => "BMI",
        Measurement::SystolicBp => "Systolic BP",
        Measurement::DiastolicBp => "Diastolic BP",
        Measurement::Insulin => "Insulin",
        Measurement::Cholesterol => "Total Cholesterol",
        Measurement::Triglycerides => "Triglycerides",
    }
}

/// Whole numbers render without a decimal point ("50", not "50.0").
fn format_value(value: f64) -> String {
    if value.is_finite() && (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{value}")
    }
}

/// Build the advice prompt for a completed assessment.
///
/// Measurements appear in the profile's shape order using the values from
/// `record`. The score is rendered to two decimals, matching the report.
pub fn build_advice_prompt(
    profile: &ScoreProfile,
    record: &MeasurementRecord,
    assessment: &RiskAssessment,
) -> String {
    let mut attributes = Vec::new();
    for measurement in profile.measurements() {
        if let Some(value) = record.get(measurement) {
            let rendered = format_value(value);
            match measurement.unit() {
                Some(unit) => {
                    attributes.push(format!("{}: {} {}", prompt_label(measurement), rendered, unit))
                }
                None => attributes.push(format!("{}: {}", prompt_label(measurement), rendered)),
            }
        }
    }

    format!(
        "Provide health recommendations for a patient with the following attributes:\n\
         {}.\n\
         Calculated Risk Score: {:.2}. \
         Give specific advice on lifestyle, diet, and stress management.",
        attributes.join(", "),
        assessment.score
    )
}
