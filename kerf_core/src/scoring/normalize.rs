//! # Metric Normalization
//!
//! Maps raw metric values onto the bounded 0-100 score scale using the
//! metric's declared [`Scale`]:
//!
//! - **Triple mode**: linear interpolation between the benchmark `low`
//!   and `high` anchors. For `higher_is_better` the result is 100 at
//!   `value >= high` and 0 at `value <= low`; `lower_is_better` mirrors
//!   this.
//! - **Ratio mode**: `min(100, value / max * 100)`, inverted for
//!   `lower_is_better` metrics.
//!
//! The output is clamped to [0,100] for every numeric input, including
//! values the validator would have rejected. Non-finite inputs normalize
//! to 0. A degenerate triple (`high == low`) scores 100 when the value
//! meets-or-beats the single point in the metric's good direction, else
//! 0.

use crate::metrics::{BenchmarkTriple, Direction, MetricDef, Scale};

/// Normalize one raw value onto [0,100] per the metric's scale.
pub fn normalize(value: f64, def: &MetricDef) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let raw = match def.scale {
        Scale::Triple(triple) => interpolate(value, &triple, def.direction),
        Scale::RatioMax { max } => capped_ratio(value, max, def.direction),
    };
    raw.clamp(0.0, 100.0)
}

fn interpolate(value: f64, triple: &BenchmarkTriple, direction: Direction) -> f64 {
    if triple.is_degenerate() {
        let meets = match direction {
            Direction::HigherIsBetter => value >= triple.high,
            Direction::LowerIsBetter => value <= triple.low,
        };
        return if meets { 100.0 } else { 0.0 };
    }

    let span = triple.high - triple.low;
    match direction {
        Direction::HigherIsBetter => (value - triple.low) / span * 100.0,
        Direction::LowerIsBetter => (triple.high - value) / span * 100.0,
    }
}

fn capped_ratio(value: f64, max: f64, direction: Direction) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    let ratio = (value / max * 100.0).clamp(0.0, 100.0);
    match direction {
        Direction::HigherIsBetter => ratio,
        Direction::LowerIsBetter => 100.0 - ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricDef;
    use proptest::prelude::*;

    fn throughput() -> MetricDef {
        MetricDef::triple("throughput_parts_hr", "Throughput", "parts/h", 20.0, 45.0, 80.0)
            .range(0.0, 500.0)
    }

    fn defect_rate() -> MetricDef {
        MetricDef::triple("defect_rate_pct", "Defect rate", "%", 1.0, 4.0, 10.0)
            .range(0.0, 100.0)
            .lower_is_better()
    }

    #[test]
    fn test_exact_benchmark_bounds() {
        // At the high anchor: exactly 100. At the low anchor: exactly 0.
        let def = throughput();
        assert_eq!(normalize(80.0, &def), 100.0);
        assert_eq!(normalize(20.0, &def), 0.0);
        assert_eq!(normalize(50.0, &def), 50.0);
    }

    #[test]
    fn test_lower_is_better_mirrors() {
        let def = defect_rate();
        assert_eq!(normalize(1.0, &def), 100.0);
        assert_eq!(normalize(10.0, &def), 0.0);
        assert!((normalize(4.0, &def) - 66.666_666_666_666_66).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_benchmark_values_clamp() {
        let def = throughput();
        assert_eq!(normalize(400.0, &def), 100.0);
        assert_eq!(normalize(-50.0, &def), 0.0);
    }

    #[test]
    fn test_degenerate_triple_single_point() {
        let def = MetricDef::triple("uptime", "Uptime", "h", 5.0, 5.0, 5.0);
        assert_eq!(normalize(5.0, &def), 100.0);
        assert_eq!(normalize(6.0, &def), 100.0);
        assert_eq!(normalize(4.9, &def), 0.0);

        let def = MetricDef::triple("scrap", "Scrap", "%", 5.0, 5.0, 5.0).lower_is_better();
        assert_eq!(normalize(5.0, &def), 100.0);
        assert_eq!(normalize(4.0, &def), 100.0);
        assert_eq!(normalize(5.1, &def), 0.0);
    }

    #[test]
    fn test_ratio_mode() {
        let def = MetricDef::ratio("laser_power_w", "Laser power", "W", 4000.0);
        assert_eq!(normalize(3000.0, &def), 75.0);
        assert_eq!(normalize(4000.0, &def), 100.0);
        assert_eq!(normalize(9000.0, &def), 100.0);
    }

    #[test]
    fn test_ratio_mode_inverted() {
        let def = MetricDef::ratio("purchase_price_usd", "Purchase price", "USD", 150_000.0)
            .lower_is_better();
        assert!((normalize(100_000.0, &def) - 33.333_333_333_333_33).abs() < 1e-9);
        assert_eq!(normalize(150_000.0, &def), 0.0);
    }

    #[test]
    fn test_zero_reference_max() {
        let def = MetricDef::ratio("laser_power_w", "Laser power", "W", 0.0);
        assert_eq!(normalize(3000.0, &def), 0.0);
    }

    #[test]
    fn test_non_finite_input() {
        let def = throughput();
        assert_eq!(normalize(f64::NAN, &def), 0.0);
        assert_eq!(normalize(f64::INFINITY, &def), 0.0);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_bounded(
            value in -1.0e9f64..1.0e9,
            low in -1.0e6f64..1.0e6,
            span in 0.0f64..1.0e6,
            lower_is_better in proptest::bool::ANY,
        ) {
            let mut def = MetricDef::triple("m", "Metric", "", low, low + span / 2.0, low + span);
            if lower_is_better {
                def = def.lower_is_better();
            }
            let score = normalize(value, &def);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_normalize_is_monotone(
            v1 in -1.0e6f64..1.0e6,
            v2 in -1.0e6f64..1.0e6,
            low in -1.0e3f64..1.0e3,
            span in 1.0e-3f64..1.0e3,
        ) {
            let def = MetricDef::triple("m", "Metric", "", low, low + span / 2.0, low + span);
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            prop_assert!(normalize(lo, &def) <= normalize(hi, &def));
        }

        #[test]
        fn prop_ratio_mode_is_bounded(
            value in -1.0e9f64..1.0e9,
            max in -1.0e6f64..1.0e6,
        ) {
            let def = MetricDef::ratio("m", "Metric", "", max);
            let score = normalize(value, &def);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
