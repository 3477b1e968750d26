//! # Recommendations and Gap Analysis
//!
//! Derives human-readable follow-ups from a classified evaluation:
//!
//! - [`Recommendation`] entries come from deterministic rule tables in
//!   each calculator, keyed by tier and by which metrics miss their
//!   `average` benchmark. Generation never fails: when no rule fires,
//!   [`fallback_recommendation`] supplies the generic entry, so every
//!   result carries at least one recommendation.
//! - [`gap_analysis`] reports the distance to the best-in-class (`high`)
//!   anchor for a fixed headline subset of metrics, not for every
//!   metric. A negative gap means the metric already beats the
//!   benchmark.

use serde::{Deserialize, Serialize};

use crate::metrics::{Direction, MetricSet, MetricValues, Scale};

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One actionable suggestion derived from an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggestion text, templated with the metric label where relevant
    pub text: String,

    /// Grouping key for display (e.g., "fixturing", "process", "general")
    pub category: String,

    /// Urgency
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(category: impl Into<String>, priority: Priority, text: impl Into<String>) -> Self {
        Recommendation {
            text: text.into(),
            category: category.into(),
            priority,
        }
    }
}

/// Distance from a current value to the best-in-class benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkGap {
    /// Metric id
    pub metric: String,

    /// Measured value
    pub current: f64,

    /// Best-in-class (`high`) anchor
    pub benchmark_high: f64,

    /// `benchmark_high - current`; negative when already above benchmark
    pub gap: f64,

    /// `gap / benchmark_high * 100`
    pub gap_percentage: f64,
}

/// Gap-to-best-in-class for the headline metrics only.
///
/// Metrics without a benchmark triple, without a measured value, or with
/// a zero `high` anchor are skipped.
pub fn gap_analysis(
    values: &MetricValues,
    defs: &MetricSet,
    headline_ids: &[&str],
) -> Vec<BenchmarkGap> {
    let mut gaps = Vec::new();
    for id in headline_ids {
        let Some(def) = defs.get(id) else { continue };
        let Some(high) = def.benchmark_high() else { continue };
        let Some(&current) = values.get(*id) else { continue };
        if high == 0.0 {
            continue;
        }
        let gap = high - current;
        gaps.push(BenchmarkGap {
            metric: def.id.clone(),
            current,
            benchmark_high: high,
            gap,
            gap_percentage: gap / high * 100.0,
        });
    }
    gaps
}

/// Metric ids whose measured value misses the `average` anchor in the
/// metric's good direction.
pub fn worse_than_average(values: &MetricValues, defs: &MetricSet) -> Vec<String> {
    let mut below = Vec::new();
    for def in defs.iter() {
        let Scale::Triple(triple) = def.scale else { continue };
        let Some(&value) = values.get(&def.id) else { continue };
        let misses = match def.direction {
            Direction::HigherIsBetter => value < triple.average,
            Direction::LowerIsBetter => value > triple.average,
        };
        if misses {
            below.push(def.id.clone());
        }
    }
    below
}

/// The guaranteed last-resort recommendation when no rule fires.
pub fn fallback_recommendation() -> Recommendation {
    Recommendation::new(
        "general",
        Priority::Low,
        "Performance is consistent across all tracked metrics; maintain current practices.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricDef;
    use std::collections::BTreeMap;

    fn defs() -> MetricSet {
        MetricSet::new(vec![
            MetricDef::triple("throughput_parts_hr", "Throughput", "parts/h", 20.0, 45.0, 80.0),
            MetricDef::triple("defect_rate_pct", "Defect rate", "%", 1.0, 4.0, 10.0)
                .lower_is_better(),
            MetricDef::ratio("laser_power_w", "Laser power", "W", 6000.0),
        ])
    }

    #[test]
    fn test_gap_analysis_headline_subset() {
        let values: MetricValues = BTreeMap::from([
            ("throughput_parts_hr".to_string(), 60.0),
            ("defect_rate_pct".to_string(), 2.0),
        ]);
        let gaps = gap_analysis(&values, &defs(), &["throughput_parts_hr"]);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].metric, "throughput_parts_hr");
        assert_eq!(gaps[0].gap, 20.0);
        assert!((gaps[0].gap_percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_can_be_negative() {
        let values: MetricValues =
            BTreeMap::from([("throughput_parts_hr".to_string(), 95.0)]);
        let gaps = gap_analysis(&values, &defs(), &["throughput_parts_hr"]);
        assert_eq!(gaps[0].gap, -15.0);
    }

    #[test]
    fn test_gap_skips_ratio_metrics() {
        let values: MetricValues = BTreeMap::from([("laser_power_w".to_string(), 4000.0)]);
        let gaps = gap_analysis(&values, &defs(), &["laser_power_w"]);
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_worse_than_average_both_directions() {
        let values: MetricValues = BTreeMap::from([
            ("throughput_parts_hr".to_string(), 30.0),
            ("defect_rate_pct".to_string(), 7.0),
        ]);
        let below = worse_than_average(&values, &defs());
        assert_eq!(below, vec!["throughput_parts_hr", "defect_rate_pct"]);

        let values: MetricValues = BTreeMap::from([
            ("throughput_parts_hr".to_string(), 50.0),
            ("defect_rate_pct".to_string(), 3.0),
        ]);
        assert!(worse_than_average(&values, &defs()).is_empty());
    }

    #[test]
    fn test_fallback_is_low_priority_general() {
        let rec = fallback_recommendation();
        assert_eq!(rec.category, "general");
        assert_eq!(rec.priority, Priority::Low);
        assert!(!rec.text.is_empty());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation::new("process", Priority::High, "Reduce laser power");
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"priority\":\"high\""));
        let roundtrip: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, roundtrip);
    }
}
