//! Continuous distance-based scoring.
//!
//! Each factor contributes a normalized distance from a reference region:
//! zero inside the region, growing linearly with deviation outside it.
//! Components are unbounded individually; only the summed score is clamped
//! to 1.0. A borderline-everything input therefore accumulates small
//! contributions instead of snapping between 0 and 1.

use std::collections::BTreeMap;
use std::fmt;

use super::factor::Factor;
use super::ranges::Interval;

/// Reference regions and scales for continuous scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousRanges {
    /// Age band whose midpoint is the zero-risk target; deviation is scaled
    /// by the band width.
    pub age_normal: Interval,
    /// Glucose band; deviation is measured from the upper bound and scaled
    /// by the band width.
    pub glucose_normal: Interval,
    /// BMI band contributing zero inside; deviation below is scaled by the
    /// lower bound, deviation above by `bmi_scale_max - max`.
    pub bmi_normal: Interval,
    /// BMI at which the above-band contribution reaches 1.0.
    pub bmi_scale_max: f64,
    /// Systolic reading with zero contribution.
    pub systolic_reference: f64,
    /// Diastolic reading with zero contribution.
    pub diastolic_reference: f64,
    /// mm Hg of deviation that maps to a contribution of 1.0.
    pub bp_scale: f64,
}

impl ContinuousRanges {
    /// The reference parameterization: age band 45-60, glucose band 70-100,
    /// BMI band 18.5-24.9 scaled to 40, blood pressure 120/80 over 40 mm Hg.
    pub fn reference() -> Self {
        Self {
            age_normal: Interval::new(45.0, 60.0),
            glucose_normal: Interval::new(70.0, 100.0),
            bmi_normal: Interval::new(18.5, 24.9),
            bmi_scale_max: 40.0,
            systolic_reference: 120.0,
            diastolic_reference: 80.0,
            bp_scale: 40.0,
        }
    }

    /// Reject parameterizations that would divide by zero or invert a band.
    pub fn validate(&self) -> Result<(), ContinuousRangesError> {
        for (field, interval) in [
            ("age_normal", &self.age_normal),
            ("glucose_normal", &self.glucose_normal),
            ("bmi_normal", &self.bmi_normal),
        ] {
            if !interval.is_well_formed() || interval.width() <= 0.0 {
                return Err(ContinuousRangesError::MalformedInterval { field });
            }
        }
        if self.bmi_normal.min <= 0.0 {
            return Err(ContinuousRangesError::DegenerateScale { field: "bmi_normal" });
        }
        if !self.bmi_scale_max.is_finite() || self.bmi_scale_max <= self.bmi_normal.max {
            return Err(ContinuousRangesError::DegenerateScale {
                field: "bmi_scale_max",
            });
        }
        if !self.systolic_reference.is_finite() {
            return Err(ContinuousRangesError::NonFiniteReference {
                field: "systolic_reference",
            });
        }
        if !self.diastolic_reference.is_finite() {
            return Err(ContinuousRangesError::NonFiniteReference {
                field: "diastolic_reference",
            });
        }
        if !self.bp_scale.is_finite() || self.bp_scale <= 0.0 {
            return Err(ContinuousRangesError::DegenerateScale { field: "bp_scale" });
        }
        Ok(())
    }
}

/// Malformed continuous parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousRangesError {
    MalformedInterval { field: &'static str },
    NonFiniteReference { field: &'static str },
    /// A scale that must be strictly positive (it is a divisor) is not.
    DegenerateScale { field: &'static str },
}

impl fmt::Display for ContinuousRangesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuousRangesError::MalformedInterval { field } => {
                write!(f, "continuous range '{field}' is malformed")
            }
            ContinuousRangesError::NonFiniteReference { field } => {
                write!(f, "continuous reference '{field}' is non-finite")
            }
            ContinuousRangesError::DegenerateScale { field } => {
                write!(f, "continuous scale '{field}' is degenerate")
            }
        }
    }
}

impl std::error::Error for ContinuousRangesError {}

/// Validated inputs for one continuous evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousObservation {
    pub age: f64,
    pub glucose: f64,
    pub bmi: f64,
    pub systolic: f64,
    pub diastolic: f64,
}

/// Per-factor contributions from one continuous evaluation.
///
/// Individual components are reported unclamped; [`total`](Self::total)
/// applies the single clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousComponents {
    pub age_risk: f64,
    pub glucose_risk: f64,
    pub bmi_risk: f64,
    pub bp_risk: f64,
}

impl ContinuousComponents {
    /// Summed score, clamped to 1.0.
    pub fn total(&self) -> f64 {
        (self.age_risk + self.glucose_risk + self.bmi_risk + self.bp_risk).min(1.0)
    }

    pub fn into_factor_map(self) -> BTreeMap<Factor, f64> {
        BTreeMap::from([
            (Factor::Age, self.age_risk),
            (Factor::Glucose, self.glucose_risk),
            (Factor::Bmi, self.bmi_risk),
            (Factor::BloodPressure, self.bp_risk),
        ])
    }
}

/// Evaluate the continuous score for a pre-validated observation.
///
/// `ranges` must already have passed [`ContinuousRanges::validate`]; the
/// divisors below are then guaranteed non-zero.
pub fn evaluate_continuous(
    ranges: &ContinuousRanges,
    obs: &ContinuousObservation,
) -> ContinuousComponents {
    let age_risk = (obs.age - ranges.age_normal.midpoint()).abs() / ranges.age_normal.width();

    let glucose_risk =
        (obs.glucose - ranges.glucose_normal.max).abs() / ranges.glucose_normal.width();

    let bmi_risk = if obs.bmi < ranges.bmi_normal.min {
        (ranges.bmi_normal.min - obs.bmi) / ranges.bmi_normal.min
    } else if obs.bmi > ranges.bmi_normal.max {
        (obs.bmi - ranges.bmi_normal.max) / (ranges.bmi_scale_max - ranges.bmi_normal.max)
    } else {
        0.0
    };

    let systolic_dev = (obs.systolic - ranges.systolic_reference).abs() / ranges.bp_scale;
    let diastolic_dev = (obs.diastolic - ranges.diastolic_reference).abs() / ranges.bp_scale;
    let bp_risk = systolic_dev.max(diastolic_dev);

    ContinuousComponents {
        age_risk,
        glucose_risk,
        bmi_risk,
        bp_risk,
    }
}
