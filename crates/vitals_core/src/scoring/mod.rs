//! Risk scoring: factors, the two scoring algorithms, profiles, and the
//! assessment pipeline that ties them together.

pub mod assess;
pub mod categorical;
pub mod category;
pub mod continuous;
pub mod factor;
pub mod profile;
pub mod ranges;
pub mod weights;

pub use assess::{AssessError, RiskAssessment, ScorerMetrics, assess};
pub use categorical::{CategoricalError, CategoricalScore, evaluate_categorical};
pub use category::{CategoryThresholds, RiskCategory};
pub use continuous::{
    ContinuousComponents, ContinuousObservation, ContinuousRanges, ContinuousRangesError,
    evaluate_continuous,
};
pub use factor::{ALL_FACTORS, Factor, factor_name};
pub use profile::{BUILTIN_PROFILE_NAMES, ProfileError, ScoreProfile, ScoringAlgorithm};
pub use ranges::{BpBand, Interval, LowRiskRanges, RangeTable, RangeTableError};
pub use weights::{WEIGHT_SUM_TOLERANCE, WeightTable, WeightTableError};
