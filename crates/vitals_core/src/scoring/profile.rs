//! Score profiles: a named bundle of factors, algorithm, and thresholds.
//!
//! A profile is the unit of configuration. Built-in profiles cover the
//! common cases; custom profiles arrive from config files and go through
//! the same [`ScoreProfile::validate`] before any assessment runs.

use std::fmt;

use crate::measurement::Measurement;

use super::category::CategoryThresholds;
use super::continuous::{ContinuousRanges, ContinuousRangesError};
use super::factor::Factor;
use super::ranges::{BpBand, Interval, RangeTable, RangeTableError};
use super::weights::{WeightTable, WeightTableError};

/// Which scoring algorithm a profile runs, with its parameterization.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringAlgorithm {
    /// Distance-based scoring over the fixed age/glucose/bmi/blood-pressure
    /// factor set.
    Continuous(ContinuousRanges),
    /// Binary interval-membership scoring with per-factor weights.
    Categorical {
        ranges: RangeTable,
        weights: WeightTable,
    },
}

impl ScoringAlgorithm {
    /// Short identifier for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringAlgorithm::Continuous(_) => "continuous",
            ScoringAlgorithm::Categorical { .. } => "categorical",
        }
    }
}

/// Invalid profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    EmptyName,
    NoFactors,
    DuplicateFactor { factor: Factor },
    /// Thresholds must satisfy `0 < medium_at < high_at < 1`.
    MalformedThresholds { medium_at: f64, high_at: f64 },
    /// Continuous scoring covers exactly age, glucose, bmi, and blood
    /// pressure; any other factor list is rejected.
    UnsupportedFactorSet,
    /// A listed factor has no entry in the range table.
    MissingRanges { factor: Factor },
    /// A listed factor has no entry in the weight table.
    MissingWeight { factor: Factor },
    /// A table covers a factor the profile does not list.
    UnlistedFactor { factor: Factor },
    Ranges(RangeTableError),
    Weights(WeightTableError),
    Continuous(ContinuousRangesError),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::EmptyName => write!(f, "profile name is empty"),
            ProfileError::NoFactors => write!(f, "profile lists no factors"),
            ProfileError::DuplicateFactor { factor } => {
                write!(f, "factor '{}' is listed more than once", factor.name())
            }
            ProfileError::MalformedThresholds { medium_at, high_at } => write!(
                f,
                "thresholds ({medium_at}, {high_at}) must satisfy 0 < medium < high < 1"
            ),
            ProfileError::UnsupportedFactorSet => write!(
                f,
                "continuous scoring requires exactly age, glucose, bmi, blood_pressure"
            ),
            ProfileError::MissingRanges { factor } => {
                write!(f, "no low-risk ranges for listed factor '{}'", factor.name())
            }
            ProfileError::MissingWeight { factor } => {
                write!(f, "no weight for listed factor '{}'", factor.name())
            }
            ProfileError::UnlistedFactor { factor } => write!(
                f,
                "table entry for factor '{}' which the profile does not list",
                factor.name()
            ),
            ProfileError::Ranges(err) => err.fmt(f),
            ProfileError::Weights(err) => err.fmt(f),
            ProfileError::Continuous(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ProfileError {}

/// A named, validated scoring configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreProfile {
    pub name: String,
    /// Factors in breakdown order. No duplicates.
    pub factors: Vec<Factor>,
    pub algorithm: ScoringAlgorithm,
    pub thresholds: CategoryThresholds,
}

/// Names of the built-in profiles, in listing order.
pub const BUILTIN_PROFILE_NAMES: &[&str] = &["baseline", "standard", "metabolic", "lipid"];

impl ScoreProfile {
    /// Measurements the profile needs, in factor order, deduplicated.
    pub fn measurements(&self) -> Vec<Measurement> {
        let mut out = Vec::new();
        for factor in &self.factors {
            for &measurement in factor.measurements() {
                if !out.contains(&measurement) {
                    out.push(measurement);
                }
            }
        }
        out
    }

    /// Full structural validation. Assessment refuses profiles that fail
    /// this check, so config layers can rely on one authority.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.factors.is_empty() {
            return Err(ProfileError::NoFactors);
        }
        for (idx, &factor) in self.factors.iter().enumerate() {
            if self.factors[..idx].contains(&factor) {
                return Err(ProfileError::DuplicateFactor { factor });
            }
        }
        if !self.thresholds.is_well_formed() {
            return Err(ProfileError::MalformedThresholds {
                medium_at: self.thresholds.medium_at,
                high_at: self.thresholds.high_at,
            });
        }
        match &self.algorithm {
            ScoringAlgorithm::Continuous(ranges) => {
                ranges.validate().map_err(ProfileError::Continuous)?;
                let expected = [
                    Factor::Age,
                    Factor::Glucose,
                    Factor::Bmi,
                    Factor::BloodPressure,
                ];
                let covers_exactly = self.factors.len() == expected.len()
                    && expected.iter().all(|f| self.factors.contains(f));
                if !covers_exactly {
                    return Err(ProfileError::UnsupportedFactorSet);
                }
            }
            ScoringAlgorithm::Categorical { ranges, weights } => {
                ranges.validate().map_err(ProfileError::Ranges)?;
                weights.validate().map_err(ProfileError::Weights)?;
                for &factor in &self.factors {
                    if ranges.ranges(factor).is_none() {
                        return Err(ProfileError::MissingRanges { factor });
                    }
                    if weights.weight(factor).is_none() {
                        return Err(ProfileError::MissingWeight { factor });
                    }
                }
                for factor in ranges.factors() {
                    if !self.factors.contains(&factor) {
                        return Err(ProfileError::UnlistedFactor { factor });
                    }
                }
                for factor in weights.factors() {
                    if !self.factors.contains(&factor) {
                        return Err(ProfileError::UnlistedFactor { factor });
                    }
                }
            }
        }
        Ok(())
    }

    /// Continuous reference profile with the 0.4 / 0.7 cut points.
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            factors: vec![
                Factor::Age,
                Factor::Glucose,
                Factor::Bmi,
                Factor::BloodPressure,
            ],
            algorithm: ScoringAlgorithm::Continuous(ContinuousRanges::reference()),
            thresholds: CategoryThresholds::BASELINE,
        }
    }

    /// Categorical profile over the four core factors.
    pub fn standard() -> Self {
        let ranges = RangeTable::new()
            .with_scalar(Factor::Age, vec![Interval::new(45.0, 55.0)])
            .with_scalar(Factor::Glucose, vec![Interval::new(70.0, 100.0)])
            .with_scalar(Factor::Bmi, vec![Interval::new(18.5, 24.9)])
            .with_bp_bands(vec![BpBand::new(90.0, 120.0, 60.0, 80.0)]);
        let weights = WeightTable::new()
            .with(Factor::Age, 0.2)
            .with(Factor::Glucose, 0.3)
            .with(Factor::Bmi, 0.25)
            .with(Factor::BloodPressure, 0.25);
        Self {
            name: "standard".to_string(),
            factors: vec![
                Factor::Age,
                Factor::Glucose,
                Factor::Bmi,
                Factor::BloodPressure,
            ],
            algorithm: ScoringAlgorithm::Categorical { ranges, weights },
            thresholds: CategoryThresholds::STANDARD,
        }
    }

    /// Standard factors plus fasting insulin, equally weighted.
    pub fn metabolic() -> Self {
        let ranges = RangeTable::new()
            .with_scalar(Factor::Age, vec![Interval::new(45.0, 55.0)])
            .with_scalar(Factor::Glucose, vec![Interval::new(70.0, 100.0)])
            .with_scalar(Factor::Bmi, vec![Interval::new(18.5, 24.9)])
            .with_bp_bands(vec![BpBand::new(90.0, 120.0, 60.0, 80.0)])
            .with_scalar(Factor::Insulin, vec![Interval::new(2.0, 25.0)]);
        let weights = WeightTable::new()
            .with(Factor::Age, 0.2)
            .with(Factor::Glucose, 0.2)
            .with(Factor::Bmi, 0.2)
            .with(Factor::BloodPressure, 0.2)
            .with(Factor::Insulin, 0.2);
        Self {
            name: "metabolic".to_string(),
            factors: vec![
                Factor::Age,
                Factor::Glucose,
                Factor::Bmi,
                Factor::BloodPressure,
                Factor::Insulin,
            ],
            algorithm: ScoringAlgorithm::Categorical { ranges, weights },
            thresholds: CategoryThresholds::STANDARD,
        }
    }

    /// Standard factors plus total cholesterol and triglycerides.
    pub fn lipid() -> Self {
        let ranges = RangeTable::new()
            .with_scalar(Factor::Age, vec![Interval::new(45.0, 55.0)])
            .with_scalar(Factor::Glucose, vec![Interval::new(70.0, 100.0)])
            .with_scalar(Factor::Bmi, vec![Interval::new(18.5, 24.9)])
            .with_bp_bands(vec![BpBand::new(90.0, 120.0, 60.0, 80.0)])
            .with_scalar(Factor::Cholesterol, vec![Interval::new(125.0, 200.0)])
            .with_scalar(Factor::Triglycerides, vec![Interval::new(40.0, 150.0)]);
        let weights = WeightTable::new()
            .with(Factor::Age, 0.15)
            .with(Factor::Glucose, 0.25)
            .with(Factor::Bmi, 0.15)
            .with(Factor::BloodPressure, 0.20)
            .with(Factor::Cholesterol, 0.15)
            .with(Factor::Triglycerides, 0.10);
        Self {
            name: "lipid".to_string(),
            factors: vec![
                Factor::Age,
                Factor::Glucose,
                Factor::Bmi,
                Factor::BloodPressure,
                Factor::Cholesterol,
                Factor::Triglycerides,
            ],
            algorithm: ScoringAlgorithm::Categorical { ranges, weights },
            thresholds: CategoryThresholds::STANDARD,
        }
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "baseline" => Some(Self::baseline()),
            "standard" => Some(Self::standard()),
            "metabolic" => Some(Self::metabolic()),
            "lipid" => Some(Self::lipid()),
            _ => None,
        }
    }
}
