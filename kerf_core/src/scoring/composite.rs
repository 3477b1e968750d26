//! # Composite Scoring
//!
//! Combines normalized sub-scores into one [0,100] composite via a
//! weighted mean over the intersection of the sub-score and weight keys.
//! Dividing by the matched weight mass (not a fixed 100) means partial
//! weight vectors and unnormalized weight sums are supported without
//! skewing the scale.
//!
//! Accumulation walks the [`WeightVector`] in its sorted-id iteration
//! order, so identical inputs always produce bit-identical sums.

use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{MetricValues, WeightVector};

/// Weighted mean of `sub_scores` under `weights`.
///
/// Fails with `EmptyWeights` when no weight key matches a sub-score, or
/// when the matched weights sum to zero; a weighted mean is undefined in
/// both cases and the caller must supply at least one effective metric.
pub fn composite_score(sub_scores: &MetricValues, weights: &WeightVector) -> ScoreResult<f64> {
    let mut weighted_total = 0.0;
    let mut weight_mass = 0.0;

    for (id, weight) in weights.iter() {
        if let Some(&score) = sub_scores.get(id) {
            weighted_total += score * weight;
            weight_mass += weight;
        }
    }

    if weight_mass <= 0.0 {
        return Err(ScoreError::empty_weights(
            "no weighted metric matches a sub-score",
        ));
    }

    Ok(weighted_total / weight_mass)
}
