//! Risk categories and the threshold pair that assigns them.

/// Coarse risk band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Snake_case identifier for logs and machine-readable output.
    pub fn name(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }

    /// Human-facing label for reports.
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Moderate Risk",
            RiskCategory::High => "High Risk",
        }
    }
}

/// Two cut points partitioning `[0, 1]` into Low / Medium / High.
///
/// Boundaries are exclusive on the low side: a score equal to `medium_at`
/// is already Medium, a score equal to `high_at` is already High.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryThresholds {
    pub medium_at: f64,
    pub high_at: f64,
}

impl CategoryThresholds {
    /// Default cut points for categorical profiles.
    pub const STANDARD: Self = Self {
        medium_at: 0.33,
        high_at: 0.66,
    };

    /// Cut points used by the continuous reference profile.
    pub const BASELINE: Self = Self {
        medium_at: 0.4,
        high_at: 0.7,
    };

    pub const fn new(medium_at: f64, high_at: f64) -> Self {
        Self { medium_at, high_at }
    }

    /// Thresholds must be finite and satisfy `0 < medium_at < high_at < 1`.
    pub fn is_well_formed(&self) -> bool {
        self.medium_at.is_finite()
            && self.high_at.is_finite()
            && self.medium_at > 0.0
            && self.medium_at < self.high_at
            && self.high_at < 1.0
    }

    /// Assign a category to a clamped score.
    pub fn classify(&self, score: f64) -> RiskCategory {
        if score < self.medium_at {
            RiskCategory::Low
        } else if score < self.high_at {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }
}
