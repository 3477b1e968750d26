//! # Metric Definitions
//!
//! Static descriptors for every number the scoring pipeline consumes.
//! A [`MetricDef`] names a metric, declares its valid input range, and
//! carries the [`Scale`] used to normalize raw values onto 0-100. Each
//! calculator instance builds one [`MetricSet`] and one or more
//! [`WeightVector`]s and injects them into the generic scoring functions;
//! no thresholds or benchmarks are hard-coded inside the math.
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::metrics::{MetricDef, MetricSet, WeightVector};
//!
//! let defs = MetricSet::new(vec![
//!     MetricDef::triple("quality_rate_pct", "Quality rate", "%", 88.0, 94.0, 99.0)
//!         .range(0.0, 100.0),
//!     MetricDef::triple("defect_rate_pct", "Defect rate", "%", 1.0, 4.0, 10.0)
//!         .range(0.0, 100.0)
//!         .lower_is_better(),
//! ]);
//!
//! let weights = WeightVector::new()
//!     .with("quality_rate_pct", 60.0)
//!     .with("defect_rate_pct", 40.0);
//!
//! assert_eq!(defs.len(), 2);
//! assert_eq!(weights.sum(), 100.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};

/// Measured values keyed by metric id.
///
/// A `BTreeMap` keeps iteration in sorted-id order, which the composite
/// scorer relies on for bit-reproducible accumulation.
pub type MetricValues = BTreeMap<String, f64>;

/// Which end of a metric's scale counts as good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger raw values normalize toward 100
    HigherIsBetter,
    /// Smaller raw values normalize toward 100
    LowerIsBetter,
}

/// Reference values used to normalize a raw metric by interpolation.
///
/// `low` and `high` bound the interpolation span; `average` anchors
/// gap analysis and below-average detection. Invariant: `low <= average
/// <= high` numerically, regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkTriple {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl BenchmarkTriple {
    pub fn new(low: f64, average: f64, high: f64) -> Self {
        BenchmarkTriple { low, average, high }
    }

    /// A triple collapses to a single point when `low == high`
    pub fn is_degenerate(&self) -> bool {
        (self.high - self.low).abs() < f64::EPSILON
    }
}

/// How a raw value maps onto the 0-100 score scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Scale {
    /// Linear interpolation against a {low, average, high} triple
    Triple(BenchmarkTriple),
    /// Capped linear ratio against a reference maximum
    RatioMax { max: f64 },
}

/// Static descriptor for one scored metric.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "throughput_parts_hr",
///   "label": "Throughput",
///   "unit": "parts/h",
///   "min": 0.0,
///   "max": 500.0,
///   "direction": "higher_is_better",
///   "scale": { "mode": "Triple", "low": 20.0, "average": 45.0, "high": 80.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDef {
    /// Stable metric identifier used as the key in values and weights
    pub id: String,

    /// Human-readable name for recommendations and display
    pub label: String,

    /// Unit string for display (e.g., "mm", "parts/h", "USD")
    pub unit: String,

    /// Lower bound of the valid input range (inclusive)
    pub min: f64,

    /// Upper bound of the valid input range (inclusive)
    pub max: f64,

    /// Which end of the scale is good
    pub direction: Direction,

    /// Normalization mode
    pub scale: Scale,
}

impl MetricDef {
    /// Create a metric normalized against a benchmark triple.
    ///
    /// Defaults to `higher_is_better` with an unrestricted non-negative
    /// input range; refine with [`range`](Self::range) and
    /// [`lower_is_better`](Self::lower_is_better).
    pub fn triple(
        id: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        low: f64,
        average: f64,
        high: f64,
    ) -> Self {
        MetricDef {
            id: id.into(),
            label: label.into(),
            unit: unit.into(),
            min: 0.0,
            max: f64::MAX,
            direction: Direction::HigherIsBetter,
            scale: Scale::Triple(BenchmarkTriple::new(low, average, high)),
        }
    }

    /// Create a metric normalized as a capped ratio against `max_ref`.
    pub fn ratio(
        id: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        max_ref: f64,
    ) -> Self {
        MetricDef {
            id: id.into(),
            label: label.into(),
            unit: unit.into(),
            min: 0.0,
            max: f64::MAX,
            direction: Direction::HigherIsBetter,
            scale: Scale::RatioMax { max: max_ref },
        }
    }

    /// Set the valid input range (builder)
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Mark smaller values as better (builder)
    pub fn lower_is_better(mut self) -> Self {
        self.direction = Direction::LowerIsBetter;
        self
    }

    /// The triple's `average` anchor, if this metric uses one
    pub fn benchmark_average(&self) -> Option<f64> {
        match self.scale {
            Scale::Triple(t) => Some(t.average),
            Scale::RatioMax { .. } => None,
        }
    }

    /// The triple's `high` anchor, if this metric uses one
    pub fn benchmark_high(&self) -> Option<f64> {
        match self.scale {
            Scale::Triple(t) => Some(t.high),
            Scale::RatioMax { .. } => None,
        }
    }

    /// Check a raw value against the valid input range
    pub fn check_range(&self, value: f64) -> ScoreResult<()> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(ScoreError::out_of_range(
                self.id.clone(),
                value,
                self.min,
                self.max,
            ));
        }
        Ok(())
    }
}

/// An ordered collection of metric definitions for one calculator
/// instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSet {
    defs: Vec<MetricDef>,
}

impl MetricSet {
    pub fn new(defs: Vec<MetricDef>) -> Self {
        MetricSet { defs }
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&MetricDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    /// Look up a definition by id, failing with `MissingMetric`
    pub fn def(&self, id: &str) -> ScoreResult<&MetricDef> {
        self.get(id).ok_or_else(|| ScoreError::missing_metric(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Per-evaluation weights keyed by metric id.
///
/// Weights are non-negative; negative inputs are clamped to zero on
/// insertion. Callers do not need to normalize: the composite scorer
/// divides by the sum of the weights actually matched, so a partial
/// vector (or one summing to 150) cannot skew the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightVector {
    weights: BTreeMap<String, f64>,
}

impl WeightVector {
    pub fn new() -> Self {
        WeightVector {
            weights: BTreeMap::new(),
        }
    }

    /// Add a weight (builder pattern). Negative weights are clamped to 0.
    pub fn with(mut self, metric: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(metric.into(), weight.max(0.0));
        self
    }

    /// Get the weight for a metric id
    pub fn get(&self, id: &str) -> Option<f64> {
        self.weights.get(id).copied()
    }

    /// Sum of all weights in the vector
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate weights in sorted-id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(id, w)| (id.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
