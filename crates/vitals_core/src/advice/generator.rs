//! Advice generation seam and its degradation policy.
//!
//! Advice is best-effort by contract: a generator failure never fails the
//! assessment that requested it. Callers go through
//! [`generate_with_fallback`], which swaps any failure (or an empty
//! completion) for a fixed placeholder and counts the substitution.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Placeholder shown when no generated advice is available.
pub const ADVICE_UNAVAILABLE_PLACEHOLDER: &str =
    "Personalized recommendations are unavailable right now. \
     The risk score and category above were still computed from the entered measurements.";

static ADVICE_FALLBACK_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Process-wide count of advice calls that fell back to the placeholder.
pub fn advice_fallback_total() -> u64 {
    ADVICE_FALLBACK_TOTAL.load(Ordering::Relaxed)
}

/// Coarse classification of an advice failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceFailureKind {
    /// Transport problems: connect, timeout, TLS.
    Network,
    /// Rejected or missing credentials.
    Auth,
    /// The backing service answered with an error of its own.
    Api,
    /// The service answered but the payload was unusable.
    InvalidResponse,
}

impl AdviceFailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AdviceFailureKind::Network => "network",
            AdviceFailureKind::Auth => "auth",
            AdviceFailureKind::Api => "api",
            AdviceFailureKind::InvalidResponse => "invalid_response",
        }
    }
}

/// Failure from an advice generator.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceError {
    pub kind: AdviceFailureKind,
    pub detail: String,
}

impl AdviceError {
    pub fn new(kind: AdviceFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(AdviceFailureKind::Network, detail)
    }

    pub fn auth(detail: impl Into<String>) -> Self {
        Self::new(AdviceFailureKind::Auth, detail)
    }

    pub fn api(detail: impl Into<String>) -> Self {
        Self::new(AdviceFailureKind::Api, detail)
    }

    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self::new(AdviceFailureKind::InvalidResponse, detail)
    }
}

impl fmt::Display for AdviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "advice generation failed ({}): {}", self.kind.as_str(), self.detail)
    }
}

impl std::error::Error for AdviceError {}

/// Anything that can turn a prompt into advice text.
///
/// Implementations live outside this crate (the HTTP chat client, test
/// doubles). The trait is synchronous; generation happens at most once per
/// assessment and the caller has nothing else to do meanwhile.
pub trait AdviceGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}

/// Advice attached to an assessment: either generated text or the
/// placeholder with the reason generation was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum AdviceOutcome {
    Generated { text: String },
    Unavailable { placeholder: String, reason: String },
}

impl AdviceOutcome {
    /// The text to display, whichever arm this is.
    pub fn text(&self) -> &str {
        match self {
            AdviceOutcome::Generated { text } => text,
            AdviceOutcome::Unavailable { placeholder, .. } => placeholder,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, AdviceOutcome::Generated { .. })
    }
}

/// Build an [`AdviceOutcome`] for a degraded call.
pub fn advice_unavailable(reason: impl Into<String>) -> AdviceOutcome {
    ADVICE_FALLBACK_TOTAL.fetch_add(1, Ordering::Relaxed);
    AdviceOutcome::Unavailable {
        placeholder: ADVICE_UNAVAILABLE_PLACEHOLDER.to_string(),
        reason: reason.into(),
    }
}

/// Run a generator and degrade instead of failing.
///
/// An `Err` from the generator, or an `Ok` carrying only whitespace, both
/// become [`AdviceOutcome::Unavailable`].
pub fn generate_with_fallback(generator: &dyn AdviceGenerator, prompt: &str) -> AdviceOutcome {
    match generator.generate(prompt) {
        Ok(text) if !text.trim().is_empty() => AdviceOutcome::Generated { text },
        Ok(_) => {
            tracing::warn!("AdviceFallback reason=empty_completion");
            advice_unavailable("generator returned an empty completion")
        }
        Err(err) => {
            tracing::warn!("AdviceFallback kind={} detail={}", err.kind.as_str(), err.detail);
            advice_unavailable(err.to_string())
        }
    }
}
