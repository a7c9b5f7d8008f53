//! Low-risk range tables for interval-membership scoring.
//!
//! A range table names, per factor, the region of values that carries no
//! risk contribution. Scalar factors use one or more closed intervals;
//! blood pressure uses paired systolic/diastolic bands because the two
//! readings are only "in range" together.

use std::collections::BTreeMap;
use std::fmt;

use super::factor::Factor;

/// A closed interval `[min, max]`. Endpoints are inside the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// A paired systolic/diastolic low-risk band. Both readings must sit inside
/// their closed interval for the pair to be in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpBand {
    pub systolic_min: f64,
    pub systolic_max: f64,
    pub diastolic_min: f64,
    pub diastolic_max: f64,
}

impl BpBand {
    pub const fn new(
        systolic_min: f64,
        systolic_max: f64,
        diastolic_min: f64,
        diastolic_max: f64,
    ) -> Self {
        Self {
            systolic_min,
            systolic_max,
            diastolic_min,
            diastolic_max,
        }
    }

    pub fn contains(&self, systolic: f64, diastolic: f64) -> bool {
        systolic >= self.systolic_min
            && systolic <= self.systolic_max
            && diastolic >= self.diastolic_min
            && diastolic <= self.diastolic_max
    }

    pub fn is_well_formed(&self) -> bool {
        self.systolic_min.is_finite()
            && self.systolic_max.is_finite()
            && self.diastolic_min.is_finite()
            && self.diastolic_max.is_finite()
            && self.systolic_min <= self.systolic_max
            && self.diastolic_min <= self.diastolic_max
    }
}

/// Low-risk region for one factor.
#[derive(Debug, Clone, PartialEq)]
pub enum LowRiskRanges {
    /// One or more closed intervals over a single measurement.
    Scalar(Vec<Interval>),
    /// One or more paired systolic/diastolic bands.
    BloodPressure(Vec<BpBand>),
}

/// Malformed range table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeTableError {
    /// A factor is listed with no ranges at all.
    EmptyRanges { factor: Factor },
    /// An interval has non-finite endpoints or `min > max`.
    MalformedInterval { factor: Factor },
    /// A blood pressure band has non-finite endpoints or inverted bounds.
    MalformedBand { factor: Factor },
    /// Scalar ranges attached to the blood pressure factor, or bands attached
    /// to a scalar factor.
    ShapeMismatch { factor: Factor },
}

impl fmt::Display for RangeTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeTableError::EmptyRanges { factor } => {
                write!(f, "factor '{}' has no low-risk ranges", factor.name())
            }
            RangeTableError::MalformedInterval { factor } => {
                write!(f, "factor '{}' has a malformed interval", factor.name())
            }
            RangeTableError::MalformedBand { factor } => {
                write!(f, "factor '{}' has a malformed pressure band", factor.name())
            }
            RangeTableError::ShapeMismatch { factor } => write!(
                f,
                "factor '{}' has ranges of the wrong shape (bands are for blood_pressure only)",
                factor.name()
            ),
        }
    }
}

impl std::error::Error for RangeTableError {}

/// Per-factor low-risk ranges for categorical scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeTable {
    entries: BTreeMap<Factor, LowRiskRanges>,
}

impl RangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach closed intervals to a scalar factor.
    pub fn with_scalar(mut self, factor: Factor, intervals: Vec<Interval>) -> Self {
        self.entries.insert(factor, LowRiskRanges::Scalar(intervals));
        self
    }

    /// Attach paired bands to the blood pressure factor.
    pub fn with_bp_bands(mut self, bands: Vec<BpBand>) -> Self {
        self.entries
            .insert(Factor::BloodPressure, LowRiskRanges::BloodPressure(bands));
        self
    }

    pub fn insert(&mut self, factor: Factor, ranges: LowRiskRanges) {
        self.entries.insert(factor, ranges);
    }

    pub fn ranges(&self, factor: Factor) -> Option<&LowRiskRanges> {
        self.entries.get(&factor)
    }

    pub fn factors(&self) -> impl Iterator<Item = Factor> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry for shape and well-formedness. First violation wins,
    /// in factor order.
    pub fn validate(&self) -> Result<(), RangeTableError> {
        for (&factor, ranges) in &self.entries {
            match ranges {
                LowRiskRanges::Scalar(intervals) => {
                    if factor == Factor::BloodPressure {
                        return Err(RangeTableError::ShapeMismatch { factor });
                    }
                    if intervals.is_empty() {
                        return Err(RangeTableError::EmptyRanges { factor });
                    }
                    if intervals.iter().any(|i| !i.is_well_formed()) {
                        return Err(RangeTableError::MalformedInterval { factor });
                    }
                }
                LowRiskRanges::BloodPressure(bands) => {
                    if factor != Factor::BloodPressure {
                        return Err(RangeTableError::ShapeMismatch { factor });
                    }
                    if bands.is_empty() {
                        return Err(RangeTableError::EmptyRanges { factor });
                    }
                    if bands.iter().any(|b| !b.is_well_formed()) {
                        return Err(RangeTableError::MalformedBand { factor });
                    }
                }
            }
        }
        Ok(())
    }
}
