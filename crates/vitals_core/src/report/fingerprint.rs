//! Assessment fingerprints.
//!
//! `fingerprint = xxhash64(profile_name + measurement names + quantized values)`
//!
//! The fingerprint identifies "same person, same numbers, same profile"
//! across runs, so every input must be deterministic and stable. Values are
//! quantized to centi-units before hashing; raw f64 bit patterns never
//! enter the buffer.

use xxhash_rust::xxh64::xxh64;

use crate::measurement::MeasurementRecord;

/// Measurement values are quantized to `round(value * 100)` before hashing.
pub const FINGERPRINT_VALUE_SCALE: f64 = 100.0;

/// Input fields for computing an assessment fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintInput<'a> {
    /// Profile name; the same record under a different profile is a
    /// different assessment.
    pub profile: &'a str,
    pub record: &'a MeasurementRecord,
}

/// Compute the fingerprint for one assessment.
///
/// The record iterates in fixed measurement order, so fingerprints do not
/// depend on the order values were entered. A separator byte (0xFF) that
/// cannot appear in UTF-8 strings guards field boundaries.
pub fn compute_assessment_fingerprint(input: &FingerprintInput<'_>) -> u64 {
    let mut buf = Vec::with_capacity(128);

    buf.extend_from_slice(input.profile.as_bytes());
    for (measurement, value) in input.record.iter() {
        buf.push(0xFF);
        buf.extend_from_slice(measurement.name().as_bytes());
        buf.push(0xFF);
        buf.extend_from_slice(&quantize_value(value).to_le_bytes());
    }

    xxh64(&buf, 0)
}

/// Centi-unit quantization: 98.6 becomes 9860.
fn quantize_value(value: f64) -> i64 {
    (value * FINGERPRINT_VALUE_SCALE).round() as i64
}

/// Format a fingerprint as a 16-character hex string.
pub fn format_fingerprint(hash: u64) -> String {
    format!("{hash:016x}")
}
