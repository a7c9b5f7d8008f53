//! Best-effort advice generation: prompt building, the generator seam, and
//! the fallback policy that keeps advice failures out of the scoring path.

pub mod generator;
pub mod prompt;

pub use generator::{
    ADVICE_UNAVAILABLE_PLACEHOLDER, AdviceError, AdviceFailureKind, AdviceGenerator,
    AdviceOutcome, advice_fallback_total, advice_unavailable, generate_with_fallback,
};
pub use prompt::build_advice_prompt;
