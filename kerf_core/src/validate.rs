//! # Input Validation
//!
//! Range and consistency checking ahead of any scoring. Validation
//! produces two severities:
//!
//! - **Errors** (`ScoreError`) block calculation; they are raised before
//!   normalization runs and no partial result is returned.
//! - **Warnings** (`ValidationWarning`) never block; they ride on the
//!   result so callers can surface them next to the score.
//!
//! Range checks are data-driven from a [`MetricSet`]; cross-metric
//! consistency heuristics are calculator-specific and contribute coded
//! warnings through the same report.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use kerf_core::metrics::{MetricDef, MetricSet};
//! use kerf_core::validate::check_ranges;
//!
//! let defs = MetricSet::new(vec![
//!     MetricDef::triple("utilization_pct", "Utilization", "%", 40.0, 65.0, 85.0)
//!         .range(0.0, 100.0),
//! ]);
//! let values = BTreeMap::from([("utilization_pct".to_string(), 130.0)]);
//!
//! let report = check_ranges(&values, &defs);
//! assert!(!report.is_valid());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{MetricSet, MetricValues};

/// A non-blocking consistency finding.
///
/// The `code` is stable across releases for programmatic handling; the
/// `message` is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Input field or metric id the warning is attached to
    pub field: String,

    /// Stable warning code (e.g., "ASPECT_RATIO")
    pub code: String,

    /// Human-readable explanation
    pub message: String,
}

impl ValidationWarning {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationWarning {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one evaluation's inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Hard errors; any entry blocks calculation
    pub errors: Vec<ScoreError>,

    /// Soft findings; calculation proceeds and these ride on the result
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    /// True when no hard error was recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a hard error
    pub fn push_error(&mut self, error: ScoreError) {
        self.errors.push(error);
    }

    /// Record a warning
    pub fn warn(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning::new(field, code, message));
    }

    /// Fold another report into this one, preserving order
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Consume the report: the warnings on success, the first error
    /// otherwise
    pub fn into_result(mut self) -> ScoreResult<Vec<ValidationWarning>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self.errors.remove(0))
        }
    }
}

/// Check every value present in `values` against its declared range.
///
/// Metrics defined in `defs` but absent from `values` are skipped; the
/// typed calculator inputs guarantee presence for the metrics they
/// score, and partial coverage is already defined by the composite
/// scorer's intersection rule.
pub fn check_ranges(values: &MetricValues, defs: &MetricSet) -> ValidationReport {
    let mut report = ValidationReport::new();
    for def in defs.iter() {
        if let Some(&value) = values.get(&def.id) {
            if let Err(error) = def.check_range(value) {
                report.push_error(error);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricDef;
    use std::collections::BTreeMap;

    fn test_defs() -> MetricSet {
        MetricSet::new(vec![
            MetricDef::triple("quality_rate_pct", "Quality rate", "%", 88.0, 94.0, 99.0)
                .range(0.0, 100.0),
            MetricDef::triple("defect_rate_pct", "Defect rate", "%", 1.0, 4.0, 10.0)
                .range(0.0, 100.0)
                .lower_is_better(),
        ])
    }

    #[test]
    fn test_in_range_values_pass() {
        let values = BTreeMap::from([
            ("quality_rate_pct".to_string(), 95.0),
            ("defect_rate_pct".to_string(), 3.0),
        ]);
        let report = check_ranges(&values, &test_defs());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_is_hard_error() {
        let values = BTreeMap::from([("quality_rate_pct".to_string(), 130.0)]);
        let report = check_ranges(&values, &test_defs());
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_absent_metric_is_skipped() {
        let values = BTreeMap::from([("quality_rate_pct".to_string(), 95.0)]);
        let report = check_ranges(&values, &test_defs());
        assert!(report.is_valid());
    }

    #[test]
    fn test_into_result_returns_warnings() {
        let mut report = ValidationReport::new();
        report.warn("aspect_ratio", "ASPECT_RATIO", "High aspect ratio increases risk");
        let warnings = report.into_result().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "ASPECT_RATIO");
    }

    #[test]
    fn test_into_result_surfaces_first_error() {
        let mut report = ValidationReport::new();
        report.push_error(ScoreError::out_of_range("a", 1.0, 2.0, 3.0));
        report.push_error(ScoreError::out_of_range("b", 9.0, 2.0, 3.0));
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, ScoreError::OutOfRange { ref metric, .. } if metric == "a"));
    }

    #[test]
    fn test_merge_preserves_both() {
        let mut a = ValidationReport::new();
        a.warn("x", "X_CODE", "x message");
        let mut b = ValidationReport::new();
        b.push_error(ScoreError::missing_metric("y"));
        a.merge(b);
        assert_eq!(a.warnings.len(), 1);
        assert_eq!(a.errors.len(), 1);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let values = BTreeMap::from([("defect_rate_pct".to_string(), 3.0)]);
        let first = check_ranges(&values, &test_defs());
        let second = check_ranges(&values, &test_defs());
        assert_eq!(first, second);
    }
}
