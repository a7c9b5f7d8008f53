//! Advice degradation tests: generator failures never propagate, they
//! become the placeholder plus a recorded reason.

use vitals_core::advice::{
    ADVICE_UNAVAILABLE_PLACEHOLDER, AdviceError, AdviceFailureKind, AdviceGenerator,
    AdviceOutcome, advice_fallback_total, generate_with_fallback,
};

/// Test double that replays a scripted result.
struct ScriptedGenerator {
    reply: Result<String, AdviceError>,
}

impl AdviceGenerator for ScriptedGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, AdviceError> {
        self.reply.clone()
    }
}

#[test]
fn test_successful_generation_passes_through() {
    let generator = ScriptedGenerator {
        reply: Ok("Eat more vegetables and walk daily.".to_string()),
    };
    match generate_with_fallback(&generator, "prompt") {
        AdviceOutcome::Generated { text } => {
            assert_eq!(text, "Eat more vegetables and walk daily.");
        }
        other => panic!("expected Generated, got {other:?}"),
    }
}

#[test]
fn test_failure_degrades_to_placeholder() {
    let generator = ScriptedGenerator {
        reply: Err(AdviceError::network("connect timed out")),
    };
    let before = advice_fallback_total();
    match generate_with_fallback(&generator, "prompt") {
        AdviceOutcome::Unavailable { placeholder, reason } => {
            assert_eq!(placeholder, ADVICE_UNAVAILABLE_PLACEHOLDER);
            assert!(reason.contains("connect timed out"), "reason was: {reason}");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
    // Other tests may also bump the process-wide counter in parallel.
    assert!(advice_fallback_total() >= before + 1);
}

#[test]
fn test_empty_completion_degrades() {
    let generator = ScriptedGenerator {
        reply: Ok(String::new()),
    };
    match generate_with_fallback(&generator, "prompt") {
        AdviceOutcome::Unavailable { reason, .. } => {
            assert!(reason.contains("empty"), "reason was: {reason}");
        }
        other => panic!("expected Unavailable for empty completion, got {other:?}"),
    }
}

#[test]
fn test_whitespace_only_completion_degrades() {
    let generator = ScriptedGenerator {
        reply: Ok("  \n\t ".to_string()),
    };
    match generate_with_fallback(&generator, "prompt") {
        AdviceOutcome::Unavailable { .. } => {}
        other => panic!("expected Unavailable for whitespace completion, got {other:?}"),
    }
}

#[test]
fn test_outcome_text_accessor() {
    let generated = AdviceOutcome::Generated {
        text: "advice".to_string(),
    };
    assert!(generated.is_generated());
    assert_eq!(generated.text(), "advice");

    let unavailable = AdviceOutcome::Unavailable {
        placeholder: "placeholder".to_string(),
        reason: "why".to_string(),
    };
    assert!(!unavailable.is_generated());
    assert_eq!(unavailable.text(), "placeholder");
}

#[test]
fn test_failure_kinds_render_stably() {
    assert_eq!(AdviceFailureKind::Network.as_str(), "network");
    assert_eq!(AdviceFailureKind::Auth.as_str(), "auth");
    assert_eq!(AdviceFailureKind::Api.as_str(), "api");
    assert_eq!(AdviceFailureKind::InvalidResponse.as_str(), "invalid_response");

    let err = AdviceError::api("backend returned 500");
    let rendered = err.to_string();
    assert!(rendered.contains("api"), "rendered was: {rendered}");
    assert!(rendered.contains("backend returned 500"), "rendered was: {rendered}");
}
