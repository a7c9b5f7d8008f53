//! Physiological measurements and the per-assessment record that carries them.

pub mod record;

pub use record::{
    ALL_MEASUREMENTS, Measurement, MeasurementRecord, RecordError, measurement_name,
};
