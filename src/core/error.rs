//! Errors for core value types.

use thiserror::Error;

/// A single invalid footprint dimension.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DimensionError {
    #[error("{dimension} must be finite, got {value}")]
    NotFinite { dimension: &'static str, value: f64 },

    #[error("{dimension} must not be negative, got {value}")]
    Negative { dimension: &'static str, value: f64 },
}

/// Errors that can occur when building a footprint from a measurement.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FootprintError {
    /// Every violated dimension, in height-then-width order.
    #[error("Invalid footprint: {}", format_violations(.0))]
    Invalid(Vec<DimensionError>),
}

fn format_violations(violations: &[DimensionError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
