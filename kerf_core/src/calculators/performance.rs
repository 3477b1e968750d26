//! # Performance Benchmarking Calculator
//!
//! Rates one monitored machine against the installed-base envelope for
//! its class ([`benchmark_metrics`]), producing:
//!
//! - a weighted composite and [`ScoreTier`] rating,
//! - a percentile estimate (benchmark triples are read as P10/P50/P90,
//!   so a machine sitting exactly on every median lands at the 50th
//!   percentile),
//! - a gap-to-best-in-class table for the headline metrics
//!   (throughput, quality rate, utilization),
//! - improvement recommendations keyed by rating tier and by which
//!   metrics miss their class median.
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::benchmarks::MachineClass;
//! use kerf_core::calculators::performance::{benchmark, PerformanceInput};
//!
//! let input = PerformanceInput {
//!     label: "Cell 3".to_string(),
//!     machine: MachineClass::Fiber,
//!     throughput_parts_hr: 52.0,
//!     utilization_pct: 71.0,
//!     quality_rate_pct: 96.5,
//!     defect_rate_pct: 2.5,
//!     energy_per_part_kwh: 0.6,
//!     downtime_hours_month: 9.0,
//!     operating_hours_week: 80.0,
//! };
//!
//! let report = benchmark(&input).unwrap();
//! assert!(report.percentile > 50.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::machines::{benchmark_metrics, metric, MachineClass};
use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{
    BenchmarkTriple, Direction, MetricDef, MetricSet, MetricValues, Scale, WeightVector,
};
use crate::scoring::{
    evaluate, fallback_recommendation, gap_analysis, worse_than_average, BenchmarkGap,
    CompositeResult, Priority, Recommendation, ScoreTier,
};
use crate::validate::ValidationReport;

/// Headline metrics reported in the gap table
pub const HEADLINE_METRICS: [&str; 3] =
    [metric::THROUGHPUT, metric::QUALITY_RATE, metric::UTILIZATION];

/// Monitored values for one machine.
///
/// `operating_hours_week` is context for the consistency heuristics and
/// is not itself scored.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Cell 3",
///   "machine": "fiber",
///   "throughput_parts_hr": 52.0,
///   "utilization_pct": 71.0,
///   "quality_rate_pct": 96.5,
///   "defect_rate_pct": 2.5,
///   "energy_per_part_kwh": 0.6,
///   "downtime_hours_month": 9.0,
///   "operating_hours_week": 80.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInput {
    /// User label for this machine or cell
    pub label: String,

    /// Machine class selecting the benchmark envelope
    pub machine: MachineClass,

    /// Good parts produced per hour
    pub throughput_parts_hr: f64,

    /// Share of scheduled time spent cutting (%)
    pub utilization_pct: f64,

    /// First-pass yield (%)
    pub quality_rate_pct: f64,

    /// Parts rejected or reworked (%)
    pub defect_rate_pct: f64,

    /// Energy drawn per good part (kWh)
    pub energy_per_part_kwh: f64,

    /// Unplanned downtime (hours/month)
    pub downtime_hours_month: f64,

    /// Scheduled operating hours per week (context, not scored)
    pub operating_hours_week: f64,
}

impl PerformanceInput {
    /// Lower the typed input onto the metric map
    pub fn metric_values(&self) -> MetricValues {
        MetricValues::from([
            (metric::THROUGHPUT.to_string(), self.throughput_parts_hr),
            (metric::UTILIZATION.to_string(), self.utilization_pct),
            (metric::QUALITY_RATE.to_string(), self.quality_rate_pct),
            (metric::DEFECT_RATE.to_string(), self.defect_rate_pct),
            (metric::ENERGY_PER_PART.to_string(), self.energy_per_part_kwh),
            (metric::DOWNTIME.to_string(), self.downtime_hours_month),
        ])
    }

    /// Validate input parameters.
    ///
    /// Hard errors cover the scored-metric ranges and the weekly-hours
    /// bound; warnings cover the cross-metric contradictions.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !self.operating_hours_week.is_finite()
            || !(0.0..=168.0).contains(&self.operating_hours_week)
        {
            report.push_error(ScoreError::out_of_range(
                "operating_hours_week",
                self.operating_hours_week,
                0.0,
                168.0,
            ));
        }
        report.merge(crate::validate::check_ranges(
            &self.metric_values(),
            benchmark_metrics(self.machine),
        ));
        if !report.is_valid() {
            return report;
        }

        if self.quality_rate_pct >= 96.0 && self.defect_rate_pct >= 8.0 {
            report.warn(
                "defect_rate_pct",
                "QUALITY_DEFECT_CONTRADICTION",
                "Quality rate and defect rate disagree; check measurement definitions",
            );
        }
        if self.utilization_pct >= 80.0 && self.operating_hours_week < 30.0 {
            report.warn(
                "utilization_pct",
                "UTILIZATION_HOURS_MISMATCH",
                "High utilization with low weekly operating hours is inconsistent; verify the data source",
            );
        }
        report
    }
}

/// Results from benchmarking one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Rating tier from the standard 90/80/70/60 banding
    pub rating: ScoreTier,

    /// Estimated installed-base percentile in [1, 99]
    pub percentile: f64,

    /// Gap to best-in-class for the headline metrics
    pub gaps: Vec<BenchmarkGap>,

    /// Improvement advice, deterministic per input
    pub recommendations: Vec<Recommendation>,

    /// Full generic evaluation (sub-scores, strengths, warnings)
    pub composite: CompositeResult<ScoreTier>,
}

fn weights() -> WeightVector {
    WeightVector::new()
        .with(metric::THROUGHPUT, 25.0)
        .with(metric::QUALITY_RATE, 25.0)
        .with(metric::UTILIZATION, 15.0)
        .with(metric::DEFECT_RATE, 15.0)
        .with(metric::ENERGY_PER_PART, 10.0)
        .with(metric::DOWNTIME, 10.0)
}

/// Benchmark one machine against its class envelope.
///
/// # Returns
///
/// * `Ok(PerformanceReport)` - rating, percentile, gaps, and advice
/// * `Err(ScoreError)` - if inputs are invalid
pub fn benchmark(input: &PerformanceInput) -> ScoreResult<PerformanceReport> {
    let warnings = input.validate().into_result()?;

    let defs = benchmark_metrics(input.machine);
    let values = input.metric_values();
    let weights = weights();

    let mut composite = evaluate(
        &input.label,
        &values,
        defs,
        &weights,
        &ScoreTier::standard_table(),
    )?;
    composite.warnings = warnings;

    let percentile = overall_percentile(&values, defs, &weights)?;
    debug!(
        label = %input.label,
        machine = %input.machine,
        score = composite.overall_score,
        percentile,
        "benchmarked machine"
    );

    Ok(PerformanceReport {
        rating: composite.tier,
        percentile,
        gaps: gap_analysis(&values, defs, &HEADLINE_METRICS),
        recommendations: recommendations(&composite, &values, input),
        composite,
    })
}

/// Percentile estimate for one metric: piecewise-linear through
/// (low, 10), (average, 50), (high, 90), extrapolated on the tails and
/// mirrored for lower-is-better metrics. Callers clamp the combined
/// value.
fn metric_percentile(value: f64, def: &MetricDef) -> Option<f64> {
    let Scale::Triple(triple) = def.scale else {
        return None;
    };
    let raw = anchored_percentile(value, &triple)?;
    Some(match def.direction {
        Direction::HigherIsBetter => raw,
        Direction::LowerIsBetter => 100.0 - raw,
    })
}

fn anchored_percentile(value: f64, triple: &BenchmarkTriple) -> Option<f64> {
    let lower_span = triple.average - triple.low;
    let upper_span = triple.high - triple.average;
    if lower_span <= 0.0 || upper_span <= 0.0 {
        return None;
    }
    let raw = if value <= triple.average {
        50.0 - 40.0 * (triple.average - value) / lower_span
    } else {
        50.0 + 40.0 * (value - triple.average) / upper_span
    };
    Some(raw)
}

fn overall_percentile(
    values: &MetricValues,
    defs: &MetricSet,
    weights: &WeightVector,
) -> ScoreResult<f64> {
    let mut weighted_total = 0.0;
    let mut weight_mass = 0.0;
    for (id, weight) in weights.iter() {
        let Some(&value) = values.get(id) else { continue };
        let Some(percentile) = defs.get(id).and_then(|def| metric_percentile(value, def)) else {
            continue;
        };
        weighted_total += percentile * weight;
        weight_mass += weight;
    }
    if weight_mass <= 0.0 {
        return Err(ScoreError::empty_weights(
            "no weighted metric has a percentile anchor",
        ));
    }
    Ok((weighted_total / weight_mass).clamp(1.0, 99.0))
}

fn recommendations(
    composite: &CompositeResult<ScoreTier>,
    values: &MetricValues,
    input: &PerformanceInput,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for id in worse_than_average(values, benchmark_metrics(input.machine)) {
        let rec = match id.as_str() {
            metric::THROUGHPUT => Recommendation::new(
                "throughput",
                Priority::Medium,
                "Throughput trails the class median; review nesting efficiency and sheet changeover time",
            ),
            metric::UTILIZATION => Recommendation::new(
                "scheduling",
                Priority::Medium,
                "Utilization is below the class median; consolidate short jobs and review shift scheduling",
            ),
            metric::QUALITY_RATE => Recommendation::new(
                "quality",
                Priority::High,
                "First-pass yield is below the class median; audit focus calibration, nozzle condition, and assist-gas purity",
            ),
            metric::DEFECT_RATE => Recommendation::new(
                "quality",
                Priority::High,
                "Defect rate sits above the class median; tighten parameter tables per material and thickness",
            ),
            metric::ENERGY_PER_PART => Recommendation::new(
                "energy",
                Priority::Low,
                "Energy per part is above the class median; batch similar jobs and reduce idle-on time",
            ),
            metric::DOWNTIME => Recommendation::new(
                "maintenance",
                Priority::Medium,
                "Downtime exceeds the class median; move to preventive maintenance scheduling",
            ),
            _ => continue,
        };
        recs.push(rec);
    }

    match composite.tier {
        ScoreTier::Poor => recs.push(Recommendation::new(
            "general",
            Priority::Critical,
            "Commission a full process review; performance sits in the bottom tier for this machine class",
        )),
        ScoreTier::BelowAverage => recs.push(Recommendation::new(
            "general",
            Priority::High,
            "Prioritize the weakest metrics above; the machine rates below the class average",
        )),
        ScoreTier::Average | ScoreTier::Good | ScoreTier::Excellent => {}
    }

    if recs.is_empty() {
        recs.push(fallback_recommendation());
    }
    recs
}
