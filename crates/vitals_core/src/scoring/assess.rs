//! Assessment pipeline: validate the profile, validate the record, score,
//! then categorize.
//!
//! Ordering is fixed. A bad profile rejects before the record is even
//! looked at; a bad record rejects before any scoring math runs. Scoring is
//! pure, so the same profile and record always produce the same assessment.

use std::collections::BTreeMap;
use std::fmt;

use crate::measurement::{Measurement, MeasurementRecord, RecordError};

use super::categorical::{CategoricalError, evaluate_categorical};
use super::category::RiskCategory;
use super::continuous::{ContinuousObservation, evaluate_continuous};
use super::factor::Factor;
use super::profile::{ProfileError, ScoreProfile, ScoringAlgorithm};
use super::ranges::RangeTableError;

/// One completed risk assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    /// Name of the profile that produced the assessment.
    pub profile: String,
    /// Final score in `[0, 1]`.
    pub score: f64,
    /// Per-factor contributions before weighting and clamping.
    pub components: BTreeMap<Factor, f64>,
    pub category: RiskCategory,
}

/// Assessment rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessError {
    /// The record lacks a measurement the profile requires.
    MissingField { measurement: Measurement },
    /// A measurement is non-finite or outside its accepted domain.
    OutOfDomain { measurement: Measurement, value: f64 },
    /// The profile failed structural validation.
    InvalidProfile(ProfileError),
}

impl fmt::Display for AssessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessError::MissingField { measurement } => {
                write!(f, "required measurement '{}' is missing", measurement.name())
            }
            AssessError::OutOfDomain { measurement, value } => {
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
            AssessError::InvalidProfile(err) => write!(f, "invalid profile: {err}"),
        }
    }
}

impl std::error::Error for AssessError {}

impl From<RecordError> for AssessError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingField { measurement } => AssessError::MissingField { measurement },
            RecordError::OutOfDomain { measurement, value } => {
                AssessError::OutOfDomain { measurement, value }
            }
        }
    }
}

/// Metrics for assessment outcomes.
#[derive(Debug, Default)]
pub struct ScorerMetrics {
    assessed_total: u64,
    low_total: u64,
    medium_total: u64,
    high_total: u64,
    reject_invalid_input_total: u64,
    reject_invalid_profile_total: u64,
}

impl ScorerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assessed_total(&self) -> u64 {
        self.assessed_total
    }

    pub fn low_total(&self) -> u64 {
        self.low_total
    }

    pub fn medium_total(&self) -> u64 {
        self.medium_total
    }

    pub fn high_total(&self) -> u64 {
        self.high_total
    }

    pub fn reject_invalid_input_total(&self) -> u64 {
        self.reject_invalid_input_total
    }

    pub fn reject_invalid_profile_total(&self) -> u64 {
        self.reject_invalid_profile_total
    }

    fn record_assessed(&mut self, category: RiskCategory) {
        self.assessed_total += 1;
        match category {
            RiskCategory::Low => self.low_total += 1,
            RiskCategory::Medium => self.medium_total += 1,
            RiskCategory::High => self.high_total += 1,
        }
    }

    fn record_reject_invalid_input(&mut self) {
        self.reject_invalid_input_total += 1;
    }

    fn record_reject_invalid_profile(&mut self) {
        self.reject_invalid_profile_total += 1;
    }
}

/// Run one assessment.
///
/// Rejections never produce a partial score: the result is either a full
/// [`RiskAssessment`] or an [`AssessError`], and metrics record which.
pub fn assess(
    profile: &ScoreProfile,
    record: &MeasurementRecord,
    metrics: &mut ScorerMetrics,
) -> Result<RiskAssessment, AssessError> {
    if let Err(err) = profile.validate() {
        metrics.record_reject_invalid_profile();
        return Err(AssessError::InvalidProfile(err));
    }

    let shape = profile.measurements();
    if let Err(err) = record.validate_against(&shape) {
        metrics.record_reject_invalid_input();
        return Err(err.into());
    }

    let (score, components) = match &profile.algorithm {
        ScoringAlgorithm::Continuous(ranges) => {
            let obs = match build_continuous_observation(record) {
                Ok(obs) => obs,
                Err(err) => {
                    metrics.record_reject_invalid_input();
                    return Err(err.into());
                }
            };
            let parts = evaluate_continuous(ranges, &obs);
            (parts.total(), parts.into_factor_map())
        }
        ScoringAlgorithm::Categorical { ranges, weights } => {
            match evaluate_categorical(&profile.factors, ranges, weights, record) {
                Ok(outcome) => (outcome.weighted_total, outcome.components),
                Err(err) => {
                    match &err {
                        CategoricalError::Record(_) => metrics.record_reject_invalid_input(),
                        _ => metrics.record_reject_invalid_profile(),
                    }
                    return Err(map_categorical_error(err));
                }
            }
        }
    };

    let category = profile.thresholds.classify(score);
    tracing::debug!(
        "RiskAssessed profile={} algorithm={} score={:.4} category={}",
        profile.name,
        profile.algorithm.kind(),
        score,
        category.name()
    );
    metrics.record_assessed(category);

    Ok(RiskAssessment {
        profile: profile.name.clone(),
        score,
        components,
        category,
    })
}

fn build_continuous_observation(
    record: &MeasurementRecord,
) -> Result<ContinuousObservation, RecordError> {
    Ok(ContinuousObservation {
        age: record.require(Measurement::Age)?,
        glucose: record.require(Measurement::Glucose)?,
        bmi: record.require(Measurement::Bmi)?,
        systolic: record.require(Measurement::SystolicBp)?,
        diastolic: record.require(Measurement::DiastolicBp)?,
    })
}

fn map_categorical_error(err: CategoricalError) -> AssessError {
    match err {
        CategoricalError::Record(record_err) => record_err.into(),
        CategoricalError::MissingRanges { factor } => {
            AssessError::InvalidProfile(ProfileError::MissingRanges { factor })
        }
        CategoricalError::MissingWeight { factor } => {
            AssessError::InvalidProfile(ProfileError::MissingWeight { factor })
        }
        CategoricalError::ShapeMismatch { factor } => AssessError::InvalidProfile(
            ProfileError::Ranges(RangeTableError::ShapeMismatch { factor }),
        ),
    }
}
