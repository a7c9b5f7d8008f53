//! Profile configuration files (fail-closed resolution).
//!
//! A profile file is a JSON document naming an algorithm, optional category
//! thresholds, and per-factor weights and low-risk ranges. Resolution never
//! invents numbers: a categorical factor without an explicit weight or
//! range is an error, not a default. Only the category thresholds carry
//! defaults, and those are the built-in cut points.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use vitals_core::scoring::{
    ALL_FACTORS, BpBand, CategoryThresholds, ContinuousRanges, Factor, Interval, RangeTable,
    ScoreProfile, ScoringAlgorithm, WeightTable,
};

/// Applied when a categorical profile file omits `thresholds`.
pub const DEFAULT_CATEGORICAL_THRESHOLDS: CategoryThresholds = CategoryThresholds::STANDARD;

/// Applied when a continuous profile file omits `thresholds`.
pub const DEFAULT_CONTINUOUS_THRESHOLDS: CategoryThresholds = CategoryThresholds::BASELINE;

/// Algorithm selector in a profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmSpec {
    Continuous,
    Categorical,
}

/// Optional threshold overrides. A missing field falls back to the
/// algorithm's default cut point.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ThresholdsSpec {
    #[serde(default)]
    pub medium_at: Option<f64>,
    #[serde(default)]
    pub high_at: Option<f64>,
}

/// One factor entry in a profile file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FactorSpec {
    /// Blend weight. Required for categorical profiles; weights have no
    /// implicit default.
    #[serde(default)]
    pub weight: Option<f64>,

    /// Closed `[min, max]` low-risk intervals for scalar factors.
    #[serde(default)]
    pub low_risk: Vec<[f64; 2]>,

    /// `[systolic_min, systolic_max, diastolic_min, diastolic_max]` bands,
    /// blood pressure only.
    #[serde(default)]
    pub low_risk_bands: Vec<[f64; 4]>,
}

/// Top-level profile file document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFileSpec {
    /// Profile name used in reports and fingerprints.
    pub profile: String,

    pub algorithm: AlgorithmSpec,

    #[serde(default)]
    pub thresholds: Option<ThresholdsSpec>,

    /// Factor entries keyed by factor name. Must be empty for continuous
    /// profiles and non-empty for categorical ones.
    #[serde(default)]
    pub factors: BTreeMap<String, FactorSpec>,
}

/// Error resolving a profile file into a usable profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfigError {
    /// The offending key: a factor name, a field name, or the profile name.
    pub key: String,
    pub reason: String,
}

impl ProfileConfigError {
    fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProfileConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile config fail-closed: '{}': {}", self.key, self.reason)
    }
}

impl std::error::Error for ProfileConfigError {}

/// Error loading a profile file from disk.
#[derive(Debug)]
pub enum ProfileLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Resolve(ProfileConfigError),
}

impl fmt::Display for ProfileLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileLoadError::Io(err) => write!(f, "cannot read profile file: {err}"),
            ProfileLoadError::Parse(err) => write!(f, "cannot parse profile file: {err}"),
            ProfileLoadError::Resolve(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ProfileLoadError {}

impl From<std::io::Error> for ProfileLoadError {
    fn from(err: std::io::Error) -> Self {
        ProfileLoadError::Io(err)
    }
}

impl From<serde_json::Error> for ProfileLoadError {
    fn from(err: serde_json::Error) -> Self {
        ProfileLoadError::Parse(err)
    }
}

impl From<ProfileConfigError> for ProfileLoadError {
    fn from(err: ProfileConfigError) -> Self {
        ProfileLoadError::Resolve(err)
    }
}

/// Map a file key to its factor, `None` for unknown names.
pub fn parse_factor_name(name: &str) -> Option<Factor> {
    ALL_FACTORS.iter().copied().find(|factor| factor.name() == name)
}

/// Resolve a parsed profile file into a validated [`ScoreProfile`].
pub fn resolve_profile(spec: &ProfileFileSpec) -> Result<ScoreProfile, ProfileConfigError> {
    let thresholds = resolve_thresholds(spec.algorithm, spec.thresholds.as_ref());

    let profile = match spec.algorithm {
        AlgorithmSpec::Continuous => {
            if !spec.factors.is_empty() {
                return Err(ProfileConfigError::new(
                    "factors",
                    "continuous profiles take no factor entries",
                ));
            }
            ScoreProfile {
                name: spec.profile.clone(),
                factors: vec![
                    Factor::Age,
                    Factor::Glucose,
                    Factor::Bmi,
                    Factor::BloodPressure,
                ],
                algorithm: ScoringAlgorithm::Continuous(ContinuousRanges::reference()),
                thresholds,
            }
        }
        AlgorithmSpec::Categorical => {
            if spec.factors.is_empty() {
                return Err(ProfileConfigError::new(
                    "factors",
                    "no factor entries; nothing to score",
                ));
            }

            let mut listed = Vec::new();
            let mut ranges = RangeTable::new();
            let mut weights = WeightTable::new();
            for (name, entry) in &spec.factors {
                let factor = parse_factor_name(name)
                    .ok_or_else(|| ProfileConfigError::new(name, "unknown factor name"))?;
                listed.push(factor);

                let weight = entry.weight.ok_or_else(|| {
                    ProfileConfigError::new(name, "weight is missing; weights have no implicit default")
                })?;
                if !weight.is_finite() {
                    return Err(ProfileConfigError::new(name, "weight is non-finite; fail-closed"));
                }
                weights = weights.with(factor, weight);

                if factor == Factor::BloodPressure {
                    if !entry.low_risk.is_empty() {
                        return Err(ProfileConfigError::new(
                            name,
                            "blood_pressure uses low_risk_bands, not low_risk",
                        ));
                    }
                    if entry.low_risk_bands.is_empty() {
                        return Err(ProfileConfigError::new(name, "no low_risk_bands entries"));
                    }
                    let bands = entry
                        .low_risk_bands
                        .iter()
                        .map(|b| BpBand::new(b[0], b[1], b[2], b[3]))
                        .collect();
                    ranges = ranges.with_bp_bands(bands);
                } else {
                    if !entry.low_risk_bands.is_empty() {
                        return Err(ProfileConfigError::new(
                            name,
                            "only blood_pressure takes low_risk_bands",
                        ));
                    }
                    if entry.low_risk.is_empty() {
                        return Err(ProfileConfigError::new(name, "no low_risk intervals"));
                    }
                    let intervals = entry
                        .low_risk
                        .iter()
                        .map(|pair| Interval::new(pair[0], pair[1]))
                        .collect();
                    ranges = ranges.with_scalar(factor, intervals);
                }
            }

            // Breakdown order is canonical factor order, not file key order.
            let factors: Vec<Factor> = ALL_FACTORS
                .iter()
                .copied()
                .filter(|factor| listed.contains(factor))
                .collect();

            ScoreProfile {
                name: spec.profile.clone(),
                factors,
                algorithm: ScoringAlgorithm::Categorical { ranges, weights },
                thresholds,
            }
        }
    };

    profile
        .validate()
        .map_err(|err| ProfileConfigError::new(profile.name.clone(), err.to_string()))?;
    Ok(profile)
}

/// Load, parse, and resolve a profile file.
pub fn load_profile_file(path: &Path) -> Result<ScoreProfile, ProfileLoadError> {
    let raw = std::fs::read_to_string(path)?;
    let spec: ProfileFileSpec = serde_json::from_str(&raw)?;
    Ok(resolve_profile(&spec)?)
}

fn resolve_thresholds(
    algorithm: AlgorithmSpec,
    overrides: Option<&ThresholdsSpec>,
) -> CategoryThresholds {
    let default = match algorithm {
        AlgorithmSpec::Continuous => DEFAULT_CONTINUOUS_THRESHOLDS,
        AlgorithmSpec::Categorical => DEFAULT_CATEGORICAL_THRESHOLDS,
    };
    CategoryThresholds::new(
        overrides
            .and_then(|t| t.medium_at)
            .unwrap_or(default.medium_at),
        overrides.and_then(|t| t.high_at).unwrap_or(default.high_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_factor_name_parses_back() {
        for &factor in ALL_FACTORS {
            assert_eq!(parse_factor_name(factor.name()), Some(factor));
        }
        assert_eq!(parse_factor_name("pulse"), None);
        assert_eq!(parse_factor_name(""), None);
    }

    #[test]
    fn thresholds_default_per_algorithm() {
        let categorical = resolve_thresholds(AlgorithmSpec::Categorical, None);
        assert_eq!(categorical.medium_at, 0.33);
        assert_eq!(categorical.high_at, 0.66);

        let continuous = resolve_thresholds(AlgorithmSpec::Continuous, None);
        assert_eq!(continuous.medium_at, 0.4);
        assert_eq!(continuous.high_at, 0.7);
    }

    #[test]
    fn threshold_overrides_apply_per_field() {
        let overrides = ThresholdsSpec {
            medium_at: Some(0.25),
            high_at: None,
        };
        let resolved = resolve_thresholds(AlgorithmSpec::Categorical, Some(&overrides));
        assert_eq!(resolved.medium_at, 0.25);
        assert_eq!(resolved.high_at, 0.66);
    }
}
