//! # Score Classification
//!
//! Maps a composite score onto a discrete, ordered tier via a
//! [`ThresholdTable`]: a list of (inclusive lower bound, label) bands
//! checked from the highest bound downward. Thresholds are data, not
//! code, so every calculator's tier boundaries live next to its other
//! tables and can be tested independently.
//!
//! Classification is total: scores below the lowest bound (including
//! non-finite values) collapse into the lowest band.
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::scoring::classify::{ScoreTier, ThresholdTable};
//!
//! let table = ScoreTier::standard_table();
//! assert_eq!(table.classify(92.0), ScoreTier::Excellent);
//! assert_eq!(table.classify(90.0), ScoreTier::Excellent);
//! assert_eq!(table.classify(89.999), ScoreTier::Good);
//! assert_eq!(table.classify(12.0), ScoreTier::Poor);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};

/// Ordered (inclusive lower bound, label) bands, highest bound first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable<T> {
    bands: Vec<(f64, T)>,
}

impl<T: Copy> ThresholdTable<T> {
    /// Build a table from bands ordered highest bound first.
    ///
    /// Fails with `InvalidThresholds` when the table is empty or bounds
    /// are not strictly descending (equal or ascending bounds would make
    /// a band unreachable).
    pub fn new(bands: Vec<(f64, T)>) -> ScoreResult<Self> {
        if bands.is_empty() {
            return Err(ScoreError::invalid_thresholds("no bands"));
        }
        for pair in bands.windows(2) {
            if pair[0].0 <= pair[1].0 {
                return Err(ScoreError::invalid_thresholds(
                    "lower bounds must be strictly descending",
                ));
            }
        }
        Ok(ThresholdTable { bands })
    }

    /// Classify a score: the first band whose lower bound the score
    /// meets, scanning from the highest bound. Scores below every bound
    /// land in the lowest band, making the function total.
    pub fn classify(&self, score: f64) -> T {
        for &(bound, label) in &self.bands {
            if score >= bound {
                return label;
            }
        }
        self.bands[self.bands.len() - 1].1
    }

    /// The bands in highest-first order
    pub fn bands(&self) -> &[(f64, T)] {
        &self.bands
    }
}

/// Shared five-band rating used by the equipment and performance
/// calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    /// Composite score >= 90
    Excellent,
    /// Composite score >= 80
    Good,
    /// Composite score >= 70
    Average,
    /// Composite score >= 60
    BelowAverage,
    /// Everything below 60
    Poor,
}

impl ScoreTier {
    /// All tiers, best first
    pub const ALL: [ScoreTier; 5] = [
        ScoreTier::Excellent,
        ScoreTier::Good,
        ScoreTier::Average,
        ScoreTier::BelowAverage,
        ScoreTier::Poor,
    ];

    /// Stable label for serialization and display
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Average => "average",
            ScoreTier::BelowAverage => "below_average",
            ScoreTier::Poor => "poor",
        }
    }

    /// The standard 90/80/70/60 banding on the 0-100 composite scale
    pub fn standard_table() -> ThresholdTable<ScoreTier> {
        ThresholdTable::new(vec![
            (90.0, ScoreTier::Excellent),
            (80.0, ScoreTier::Good),
            (70.0, ScoreTier::Average),
            (60.0, ScoreTier::BelowAverage),
            (0.0, ScoreTier::Poor),
        ])
        .expect("standard tier table is well-formed")
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let table = ScoreTier::standard_table();
        assert_eq!(table.classify(90.0), ScoreTier::Excellent);
        assert_eq!(table.classify(80.0), ScoreTier::Good);
        assert_eq!(table.classify(70.0), ScoreTier::Average);
        assert_eq!(table.classify(60.0), ScoreTier::BelowAverage);
        assert_eq!(table.classify(59.999_999), ScoreTier::Poor);
        assert_eq!(table.classify(0.0), ScoreTier::Poor);
    }

    #[test]
    fn test_classification_is_total() {
        let table = ScoreTier::standard_table();
        assert_eq!(table.classify(-10.0), ScoreTier::Poor);
        assert_eq!(table.classify(250.0), ScoreTier::Excellent);
        assert_eq!(table.classify(f64::NAN), ScoreTier::Poor);
    }

    #[test]
    fn test_bands_are_contiguous() {
        // Just below each bound belongs to the next band down; exactly at
        // the bound belongs to the band itself. No gaps, no overlaps.
        let table = ScoreTier::standard_table();
        let bands = table.bands();
        for window in bands.windows(2) {
            let (upper_bound, upper_label) = window[0];
            let (_, lower_label) = window[1];
            assert_eq!(table.classify(upper_bound), upper_label);
            assert_eq!(table.classify(upper_bound - 1e-9), lower_label);
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = ThresholdTable::<ScoreTier>::new(vec![]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_THRESHOLDS");
    }

    #[test]
    fn test_non_descending_bounds_rejected() {
        let result = ThresholdTable::new(vec![
            (60.0, ScoreTier::Good),
            (60.0, ScoreTier::Average),
        ]);
        assert!(result.is_err());

        let result = ThresholdTable::new(vec![
            (10.0, ScoreTier::Good),
            (50.0, ScoreTier::Average),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&ScoreTier::BelowAverage).unwrap();
        assert_eq!(json, "\"below_average\"");
        let roundtrip: ScoreTier = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, ScoreTier::BelowAverage);
    }

    proptest! {
        #[test]
        fn prop_every_score_gets_exactly_one_tier(score in 0.0f64..=100.0) {
            let table = ScoreTier::standard_table();
            let tier = table.classify(score);
            let matches = ScoreTier::ALL.iter().filter(|t| **t == tier).count();
            prop_assert_eq!(matches, 1);
        }
    }
}
