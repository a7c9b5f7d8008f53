//! Categorical interval-membership scoring.
//!
//! Each factor contributes exactly 0.0 (inside its low-risk range) or 1.0
//! (outside), and the final score is the weight-blended sum. Membership is
//! binary on purpose: a value one unit past the range boundary scores the
//! same as a value far past it.

use std::collections::BTreeMap;
use std::fmt;

use crate::measurement::{Measurement, MeasurementRecord, RecordError};

use super::factor::Factor;
use super::ranges::{LowRiskRanges, RangeTable};
use super::weights::WeightTable;

/// Outcome of one categorical evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalScore {
    /// Per-factor membership components, each exactly 0.0 or 1.0.
    pub components: BTreeMap<Factor, f64>,
    /// Weight-blended sum, clamped to 1.0.
    pub weighted_total: f64,
}

/// Failure during categorical evaluation.
///
/// The range/weight variants indicate a profile whose tables do not cover
/// its factor list; record failures pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoricalError {
    MissingRanges { factor: Factor },
    MissingWeight { factor: Factor },
    ShapeMismatch { factor: Factor },
    Record(RecordError),
}

impl fmt::Display for CategoricalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoricalError::MissingRanges { factor } => {
                write!(f, "no low-risk ranges for factor '{}'", factor.name())
            }
            CategoricalError::MissingWeight { factor } => {
                write!(f, "no weight for factor '{}'", factor.name())
            }
            CategoricalError::ShapeMismatch { factor } => {
                write!(f, "ranges for factor '{}' have the wrong shape", factor.name())
            }
            CategoricalError::Record(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CategoricalError {}

impl From<RecordError> for CategoricalError {
    fn from(err: RecordError) -> Self {
        CategoricalError::Record(err)
    }
}

/// Evaluate the categorical score for a record.
///
/// The record is expected to be pre-validated for the factors' measurements;
/// missing measurements still fail closed here rather than defaulting.
pub fn evaluate_categorical(
    factors: &[Factor],
    ranges: &RangeTable,
    weights: &WeightTable,
    record: &MeasurementRecord,
) -> Result<CategoricalScore, CategoricalError> {
    let mut components = BTreeMap::new();
    let mut total = 0.0;

    for &factor in factors {
        let entry = ranges
            .ranges(factor)
            .ok_or(CategoricalError::MissingRanges { factor })?;
        let weight = weights
            .weight(factor)
            .ok_or(CategoricalError::MissingWeight { factor })?;

        let in_range = match (factor.scalar_measurement(), entry) {
            (Some(measurement), LowRiskRanges::Scalar(intervals)) => {
                let value = record.require(measurement)?;
                intervals.iter().any(|interval| interval.contains(value))
            }
            (None, LowRiskRanges::BloodPressure(bands)) => {
                let systolic = record.require(Measurement::SystolicBp)?;
                let diastolic = record.require(Measurement::DiastolicBp)?;
                bands.iter().any(|band| band.contains(systolic, diastolic))
            }
            _ => return Err(CategoricalError::ShapeMismatch { factor }),
        };

        let component = if in_range { 0.0 } else { 1.0 };
        components.insert(factor, component);
        total += weight * component;
    }

    Ok(CategoricalScore {
        components,
        weighted_total: total.min(1.0),
    })
}
