//! Assembled assessment reports and their plain-text rendering.

use crate::advice::AdviceOutcome;
use crate::measurement::MeasurementRecord;
use crate::scoring::RiskAssessment;

use super::fingerprint::{FingerprintInput, compute_assessment_fingerprint, format_fingerprint};

/// Everything one assessment produced, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentReport {
    /// Hex fingerprint of (profile, record).
    pub fingerprint: String,
    pub assessment: RiskAssessment,
    /// `score * 100`, for the risk/normal split.
    pub risk_pct: f64,
    /// `(1 - score) * 100`.
    pub normal_pct: f64,
    /// `None` when advice was not requested at all.
    pub advice: Option<AdviceOutcome>,
}

/// Assemble a report from a completed assessment.
pub fn build_report(
    record: &MeasurementRecord,
    assessment: RiskAssessment,
    advice: Option<AdviceOutcome>,
) -> AssessmentReport {
    let fingerprint = format_fingerprint(compute_assessment_fingerprint(&FingerprintInput {
        profile: &assessment.profile,
        record,
    }));
    let risk_pct = assessment.score * 100.0;
    let normal_pct = (1.0 - assessment.score) * 100.0;
    AssessmentReport {
        fingerprint,
        assessment,
        risk_pct,
        normal_pct,
        advice,
    }
}

/// Render a report for terminal display.
pub fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Assessment {} (profile: {})\n",
        report.fingerprint, report.assessment.profile
    ));
    out.push_str(&format!(
        "Calculated Risk Score: {:.2}\n",
        report.assessment.score
    ));
    out.push_str(&format!(
        "Risk Category: {}\n",
        report.assessment.category.label()
    ));
    out.push_str("Risk Breakdown:\n");
    for (&factor, &component) in &report.assessment.components {
        out.push_str(&format!("  {:<15} {:.2}\n", factor.name(), component));
    }
    out.push_str(&format!(
        "Risk: {:.2}%  Normal: {:.2}%\n",
        report.risk_pct, report.normal_pct
    ));
    match &report.advice {
        None => {}
        Some(AdviceOutcome::Generated { text }) => {
            out.push_str("Tailored Health Recommendations:\n");
            out.push_str(text);
            out.push('\n');
        }
        Some(AdviceOutcome::Unavailable { placeholder, reason }) => {
            out.push_str("Tailored Health Recommendations:\n");
            out.push_str(placeholder);
            out.push('\n');
            out.push_str(&format!("(reason: {reason})\n"));
        }
    }
    out
}
