//! Per-factor weights for categorical scoring.

use std::collections::BTreeMap;
use std::fmt;

use super::factor::Factor;

/// Tolerance when checking that weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Malformed weight table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightTableError {
    NonFiniteWeight { factor: Factor },
    NegativeWeight { factor: Factor, weight: f64 },
    /// Weights must sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
    SumNotOne { sum: f64 },
}

impl fmt::Display for WeightTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightTableError::NonFiniteWeight { factor } => {
                write!(f, "factor '{}' has a non-finite weight", factor.name())
            }
            WeightTableError::NegativeWeight { factor, weight } => write!(
                f,
                "factor '{}' has negative weight {}",
                factor.name(),
                weight
            ),
            WeightTableError::SumNotOne { sum } => {
                write!(f, "weights sum to {sum}, expected 1.0")
            }
        }
    }
}

impl std::error::Error for WeightTableError {}

/// Per-factor weights. A valid table is non-empty, non-negative, and sums
/// to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    entries: BTreeMap<Factor, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Factor, f64)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, factor: Factor, weight: f64) -> Self {
        self.entries.insert(factor, weight);
        self
    }

    pub fn weight(&self, factor: Factor) -> Option<f64> {
        self.entries.get(&factor).copied()
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

    pub fn sum(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Check finiteness, sign, and the sum-to-one constraint. First violation
    /// wins, in factor order; the sum check runs last.
    pub fn validate(&self) -> Result<(), WeightTableError> {
        for (&factor, &weight) in &self.entries {
            if !weight.is_finite() {
                return Err(WeightTableError::NonFiniteWeight { factor });
            }
            if weight < 0.0 {
                return Err(WeightTableError::NegativeWeight { factor, weight });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightTableError::SumNotOne { sum });
        }
        Ok(())
    }
}
