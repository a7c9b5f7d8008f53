//! Assessment reports: fingerprints for determinism checks plus the
//! assembled, display-ready summary.

pub mod fingerprint;
pub mod summary;

pub use fingerprint::{
    FINGERPRINT_VALUE_SCALE, FingerprintInput, compute_assessment_fingerprint, format_fingerprint,
};
pub use summary::{AssessmentReport, build_report, render_text};
