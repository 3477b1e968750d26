//! # Error Types
//!
//! Structured error types for kerf_core. Every variant carries enough
//! context to explain the rejected input programmatically, so callers can
//! map errors straight onto form fields without parsing message strings.
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::errors::{ScoreError, ScoreResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> ScoreResult<()> {
//!     if !(0.1..=150.0).contains(&thickness_mm) {
//!         return Err(ScoreError::out_of_range("thickness_mm", thickness_mm, 0.1, 150.0));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for kerf_core operations
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Structured error type for scoring operations.
///
/// Validation errors are raised before any normalization or scoring runs;
/// a failed evaluation never returns a partial result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ScoreError {
    /// A metric value lies outside its declared valid range
    #[error("Value out of range for '{metric}': {value} (valid range {min} to {max})")]
    OutOfRange {
        metric: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An input value is invalid for a reason other than its range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A metric id was not found in the active metric set
    #[error("Unknown metric: {metric}")]
    MissingMetric { metric: String },

    /// Weight vector and sub-score map share no keys, or the matched
    /// weight mass is zero; a weighted mean is undefined
    #[error("Empty weight intersection: {reason}")]
    EmptyWeights { reason: String },

    /// Benchmark table lookup failed (unknown material or machine class)
    #[error("Benchmark not found: {name}")]
    UnknownBenchmark { name: String },

    /// A threshold table is malformed (empty or bounds not descending)
    #[error("Invalid threshold table: {reason}")]
    InvalidThresholds { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ScoreError {
    /// Create an OutOfRange error
    pub fn out_of_range(metric: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        ScoreError::OutOfRange {
            metric: metric.into(),
            value,
            min,
            max,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ScoreError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingMetric error
    pub fn missing_metric(metric: impl Into<String>) -> Self {
        ScoreError::MissingMetric {
            metric: metric.into(),
        }
    }

    /// Create an EmptyWeights error
    pub fn empty_weights(reason: impl Into<String>) -> Self {
        ScoreError::EmptyWeights {
            reason: reason.into(),
        }
    }

    /// Create an UnknownBenchmark error
    pub fn unknown_benchmark(name: impl Into<String>) -> Self {
        ScoreError::UnknownBenchmark { name: name.into() }
    }

    /// Create an InvalidThresholds error
    pub fn invalid_thresholds(reason: impl Into<String>) -> Self {
        ScoreError::InvalidThresholds {
            reason: reason.into(),
        }
    }

    /// Check if this error describes rejected caller input (as opposed to
    /// a misconfigured table or an internal fault)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScoreError::OutOfRange { .. }
                | ScoreError::InvalidInput { .. }
                | ScoreError::MissingMetric { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ScoreError::OutOfRange { .. } => "OUT_OF_RANGE",
            ScoreError::InvalidInput { .. } => "INVALID_INPUT",
            ScoreError::MissingMetric { .. } => "MISSING_METRIC",
            ScoreError::EmptyWeights { .. } => "EMPTY_WEIGHTS",
            ScoreError::UnknownBenchmark { .. } => "UNKNOWN_BENCHMARK",
            ScoreError::InvalidThresholds { .. } => "INVALID_THRESHOLDS",
            ScoreError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ScoreError::out_of_range("thickness_mm", 250.0, 0.1, 150.0);
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: ScoreError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ScoreError::missing_metric("throughput").error_code(),
            "MISSING_METRIC"
        );
        assert_eq!(
            ScoreError::empty_weights("no overlap").error_code(),
            "EMPTY_WEIGHTS"
        );
        assert_eq!(
            ScoreError::unknown_benchmark("plasma").error_code(),
            "UNKNOWN_BENCHMARK"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ScoreError::out_of_range("x", 1.0, 2.0, 3.0).is_input_error());
        assert!(ScoreError::missing_metric("x").is_input_error());
        assert!(!ScoreError::invalid_thresholds("empty").is_input_error());
        assert!(!ScoreError::empty_weights("no overlap").is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let error = ScoreError::out_of_range("utilization_pct", 140.0, 0.0, 100.0);
        assert_eq!(
            error.to_string(),
            "Value out of range for 'utilization_pct': 140 (valid range 0 to 100)"
        );
    }
}
