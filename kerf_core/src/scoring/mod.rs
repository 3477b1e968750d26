//! # Generic Scoring Pipeline
//!
//! The calculator-independent evaluation path. Every calculator follows
//! the same sequence over injected tables:
//!
//! ```text
//! validate ranges -> normalize each metric -> weighted composite
//!     -> classify tier -> strengths/weaknesses
//! ```
//!
//! [`evaluate`] runs the sequence for one entity and returns a
//! [`CompositeResult`]; [`evaluate_many`] evaluates a batch against the
//! same tables and returns a stable descending [`RankingResult`].
//!
//! All functions are pure: identical inputs produce bit-identical
//! results, nothing is cached between calls, and a failed validation
//! returns an error before any scoring runs.
//!
//! ## Submodules
//!
//! - [`normalize`] - raw value -> 0-100 sub-score
//! - [`composite`] - weighted mean over the key intersection
//! - [`classify`] - threshold-table tier assignment
//! - [`rank`] - stable ranking and fresh-pass selections
//! - [`recommend`] - recommendation and gap primitives

pub mod classify;
pub mod composite;
pub mod normalize;
pub mod rank;
pub mod recommend;

use serde::{Deserialize, Serialize};
use tracing::debug;

// Re-export the working set
pub use classify::{ScoreTier, ThresholdTable};
pub use composite::composite_score;
pub use normalize::normalize;
pub use rank::{best_by, bottom_metrics, rank_by_score, top_metrics, worst_by, Ranked};
pub use recommend::{
    fallback_recommendation, gap_analysis, worse_than_average, BenchmarkGap, Priority,
    Recommendation,
};

use crate::errors::ScoreResult;
use crate::metrics::{MetricSet, MetricValues, WeightVector};
use crate::validate::{check_ranges, ValidationWarning};

/// Metric ids reported as strengths per entity
pub const STRENGTH_COUNT: usize = 3;

/// Metric ids reported as weaknesses per entity
pub const WEAKNESS_COUNT: usize = 2;

/// One entity's scored, classified evaluation.
///
/// Created fresh per call and returned to the caller; the core retains
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult<T> {
    /// Caller-supplied entity label
    pub label: String,

    /// Weighted composite in [0,100]
    pub overall_score: f64,

    /// Tier assigned by the calculator's threshold table
    pub tier: T,

    /// Normalized 0-100 sub-score per metric
    pub sub_scores: MetricValues,

    /// Top sub-scores by metric id, best first
    pub strengths: Vec<String>,

    /// Bottom sub-scores by metric id, worst first
    pub weaknesses: Vec<String>,

    /// Non-blocking validation findings attached by the calculator
    pub warnings: Vec<ValidationWarning>,
}

/// A batch evaluation ordered by composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult<T> {
    /// Entities descending by `overall_score`; ties keep input order
    pub ranking: Vec<Ranked<CompositeResult<T>>>,
}

/// Evaluate one entity against a metric set, weight vector, and tier
/// table.
///
/// Fails fast: range validation runs before any normalization, and an
/// out-of-range metric aborts the call with no partial result. Metrics
/// defined in `defs` but absent from `values` are skipped.
pub fn evaluate<T: Copy>(
    label: &str,
    values: &MetricValues,
    defs: &MetricSet,
    weights: &WeightVector,
    tiers: &ThresholdTable<T>,
) -> ScoreResult<CompositeResult<T>> {
    check_ranges(values, defs).into_result()?;

    let mut sub_scores = MetricValues::new();
    for def in defs.iter() {
        if let Some(&value) = values.get(&def.id) {
            sub_scores.insert(def.id.clone(), normalize(value, def));
        }
    }

    let overall_score = composite_score(&sub_scores, weights)?;
    let tier = tiers.classify(overall_score);
    debug!(label, overall_score, "evaluated entity");

    Ok(CompositeResult {
        label: label.to_string(),
        overall_score,
        tier,
        strengths: top_metrics(&sub_scores, STRENGTH_COUNT),
        weaknesses: bottom_metrics(&sub_scores, WEAKNESS_COUNT),
        sub_scores,
        warnings: Vec::new(),
    })
}

/// Evaluate a batch of labeled entities against shared tables and rank
/// them.
///
/// Any entity failing validation fails the whole call; the ranking is a
/// stable descending sort so equal scores keep their input order.
pub fn evaluate_many<T: Copy>(
    entities: &[(String, MetricValues)],
    defs: &MetricSet,
    weights: &WeightVector,
    tiers: &ThresholdTable<T>,
) -> ScoreResult<RankingResult<T>> {
    let mut results = Vec::with_capacity(entities.len());
    for (label, values) in entities {
        results.push(evaluate(label, values, defs, weights, tiers)?);
    }
    debug!(count = results.len(), "ranking batch");
    Ok(RankingResult {
        ranking: rank_by_score(results, |result| result.overall_score),
    })
}
