#![forbid(unsafe_code)]

pub mod advice;
pub mod measurement;
pub mod report;
pub mod scoring;
