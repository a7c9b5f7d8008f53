//! Report assembly and text rendering tests.

use vitals_core::advice::{ADVICE_UNAVAILABLE_PLACEHOLDER, AdviceOutcome};
use vitals_core::measurement::Measurement;
use vitals_core::report::{build_report, render_text};
use vitals_core::scoring::{ScoreProfile, ScorerMetrics, assess};

mod common;
use common::record_all_in_range;

fn standard_medium_report(advice: Option<AdviceOutcome>) -> vitals_core::report::AssessmentReport {
    let profile = ScoreProfile::standard();
    let record = record_all_in_range()
        .with(Measurement::Glucose, 101.0)
        .with(Measurement::SystolicBp, 125.0)
        .with(Measurement::DiastolicBp, 82.0);
    let mut metrics = ScorerMetrics::new();
    let assessment = assess(&profile, &record, &mut metrics).expect("assessment should succeed");
    build_report(&record, assessment, advice)
}

#[test]
fn test_percentages_split_the_score() {
    let report = standard_medium_report(None);
    assert!((report.risk_pct - 55.0).abs() < 1e-9);
    assert!((report.normal_pct - 45.0).abs() < 1e-9);
    assert!((report.risk_pct + report.normal_pct - 100.0).abs() < 1e-9);
}

#[test]
fn test_fingerprint_is_stable_hex() {
    let first = standard_medium_report(None);
    let second = standard_medium_report(None);
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.fingerprint.len(), 16);
    assert!(first.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_text_rendering_core_lines() {
    let report = standard_medium_report(None);
    let text = render_text(&report);
    assert!(text.contains("(profile: standard)"), "text was: {text}");
    assert!(
        text.contains("Calculated Risk Score: 0.55"),
        "text was: {text}"
    );
    assert!(text.contains("Risk Category: Moderate Risk"), "text was: {text}");
    assert!(text.contains("Risk Breakdown:"), "text was: {text}");
    assert!(text.contains("blood_pressure"), "text was: {text}");
    assert!(
        text.contains("Risk: 55.00%  Normal: 45.00%"),
        "text was: {text}"
    );
}

#[test]
fn test_breakdown_lists_each_factor_component() {
    let report = standard_medium_report(None);
    let text = render_text(&report);
    assert!(text.contains("glucose"), "text was: {text}");
    assert!(text.contains("1.00"), "text was: {text}");
    assert!(text.contains("0.00"), "text was: {text}");
}

#[test]
fn test_no_advice_section_when_not_requested() {
    let report = standard_medium_report(None);
    let text = render_text(&report);
    assert!(
        !text.contains("Tailored Health Recommendations"),
        "text was: {text}"
    );
}

#[test]
fn test_generated_advice_is_rendered() {
    let report = standard_medium_report(Some(AdviceOutcome::Generated {
        text: "Cut added sugar; re-check glucose in three months.".to_string(),
    }));
    let text = render_text(&report);
    assert!(
        text.contains("Tailored Health Recommendations:"),
        "text was: {text}"
    );
    assert!(
        text.contains("Cut added sugar; re-check glucose in three months."),
        "text was: {text}"
    );
}

#[test]
fn test_unavailable_advice_shows_placeholder_and_reason() {
    let report = standard_medium_report(Some(AdviceOutcome::Unavailable {
        placeholder: ADVICE_UNAVAILABLE_PLACEHOLDER.to_string(),
        reason: "advice generation failed (network): connect timed out".to_string(),
    }));
    let text = render_text(&report);
    assert!(
        text.contains(ADVICE_UNAVAILABLE_PLACEHOLDER),
        "text was: {text}"
    );
    assert!(text.contains("connect timed out"), "text was: {text}");
}

#[test]
fn test_degraded_advice_never_blocks_the_report() {
    // The score, category, and percentages are identical with and without
    // working advice.
    let healthy = standard_medium_report(Some(AdviceOutcome::Generated {
        text: "advice".to_string(),
    }));
    let degraded = standard_medium_report(Some(AdviceOutcome::Unavailable {
        placeholder: ADVICE_UNAVAILABLE_PLACEHOLDER.to_string(),
        reason: "reason".to_string(),
    }));
    assert_eq!(healthy.assessment, degraded.assessment);
    assert_eq!(healthy.risk_pct, degraded.risk_pct);
    assert_eq!(healthy.fingerprint, degraded.fingerprint);
}
