//! # Equipment Comparison Calculator
//!
//! Scores and ranks laser-cutting machines against each other. Metrics
//! normalize in ratio mode against the *compared set's* maximum, so
//! every sub-score is relative to the candidate pool rather than to an
//! absolute benchmark; cost-like metrics invert the ratio.
//!
//! A [`ComparisonPriority`] selects the weight vector (the UI's
//! priority selector maps straight onto it); [`compare_weighted`]
//! accepts a caller-tuned vector instead for slider-driven weighting.
//!
//! Named selections (best overall / value / budget / performance) are
//! each an independent pass over the original option list. The primary
//! ranking is produced once by a stable sort and is never re-sorted for
//! a selection, so selections may disagree with rank 1 without ever
//! corrupting the ranking order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{MetricDef, MetricSet, MetricValues, WeightVector};
use crate::scoring::{
    best_by, evaluate, rank_by_score, worst_by, CompositeResult, Ranked, ScoreTier,
};
use crate::units::Hours;
use crate::validate::{check_ranges, ValidationReport, ValidationWarning};

/// Metric ids for the equipment comparison calculator
pub mod metric {
    pub const PURCHASE_PRICE: &str = "purchase_price_usd";
    pub const LASER_POWER: &str = "laser_power_w";
    pub const CUTTING_SPEED: &str = "cutting_speed_mm_min";
    pub const OPERATING_COST: &str = "operating_cost_hr_usd";
    pub const MAINTENANCE: &str = "maintenance_annual_usd";
}

/// Assumed annual duty for cost-of-ownership math
const ANNUAL_OPERATING_HOURS: Hours = Hours(2000.0);

/// Ownership horizon for the value-ratio denominator
const OWNERSHIP_YEARS: f64 = 5.0;

/// One machine under comparison.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "FiberCut 4000",
///   "purchase_price_usd": 150000.0,
///   "laser_power_w": 4000.0,
///   "cutting_speed_mm_min": 12000.0,
///   "operating_cost_hr_usd": 25.0,
///   "maintenance_annual_usd": 7000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentOption {
    /// Display name, unique per comparison in practice
    pub name: String,

    /// Purchase price in USD
    pub purchase_price_usd: f64,

    /// Rated laser power in watts
    pub laser_power_w: f64,

    /// Maximum cutting speed in mm/min
    pub cutting_speed_mm_min: f64,

    /// Operating cost per machine-hour in USD
    pub operating_cost_hr_usd: f64,

    /// Annual maintenance contract in USD
    pub maintenance_annual_usd: f64,
}

impl EquipmentOption {
    /// Lower the typed option onto the metric map
    pub fn metric_values(&self) -> MetricValues {
        MetricValues::from([
            (metric::PURCHASE_PRICE.to_string(), self.purchase_price_usd),
            (metric::LASER_POWER.to_string(), self.laser_power_w),
            (metric::CUTTING_SPEED.to_string(), self.cutting_speed_mm_min),
            (metric::OPERATING_COST.to_string(), self.operating_cost_hr_usd),
            (metric::MAINTENANCE.to_string(), self.maintenance_annual_usd),
        ])
    }

    /// Operating plus maintenance spend for one year of assumed duty
    pub fn annual_running_cost_usd(&self) -> f64 {
        self.operating_cost_hr_usd * ANNUAL_OPERATING_HOURS.value() + self.maintenance_annual_usd
    }

    /// Purchase price plus running costs over the ownership horizon
    pub fn total_cost_usd(&self) -> f64 {
        self.purchase_price_usd + OWNERSHIP_YEARS * self.annual_running_cost_usd()
    }

    /// Validate fields the metric ranges cannot express
    pub fn validate(&self) -> ScoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScoreError::invalid_input(
                "name",
                self.name.clone(),
                "Option name must not be empty",
            ));
        }
        Ok(())
    }
}

/// Weighting presets matching the UI's priority selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPriority {
    /// Equal weight on every criterion
    #[default]
    Balanced,
    /// Acquisition and running costs dominate
    Cost,
    /// Laser power and speed dominate
    Performance,
    /// Cutting speed dominates
    Throughput,
}

impl ComparisonPriority {
    /// All priorities for UI selection
    pub const ALL: [ComparisonPriority; 4] = [
        ComparisonPriority::Balanced,
        ComparisonPriority::Cost,
        ComparisonPriority::Performance,
        ComparisonPriority::Throughput,
    ];

    /// The weight vector this priority applies
    pub fn weights(&self) -> WeightVector {
        match self {
            ComparisonPriority::Balanced => WeightVector::new()
                .with(metric::PURCHASE_PRICE, 20.0)
                .with(metric::LASER_POWER, 20.0)
                .with(metric::CUTTING_SPEED, 20.0)
                .with(metric::OPERATING_COST, 20.0)
                .with(metric::MAINTENANCE, 20.0),
            ComparisonPriority::Cost => WeightVector::new()
                .with(metric::PURCHASE_PRICE, 35.0)
                .with(metric::OPERATING_COST, 25.0)
                .with(metric::MAINTENANCE, 20.0)
                .with(metric::LASER_POWER, 10.0)
                .with(metric::CUTTING_SPEED, 10.0),
            ComparisonPriority::Performance => WeightVector::new()
                .with(metric::LASER_POWER, 35.0)
                .with(metric::CUTTING_SPEED, 25.0)
                .with(metric::PURCHASE_PRICE, 15.0)
                .with(metric::OPERATING_COST, 15.0)
                .with(metric::MAINTENANCE, 10.0),
            ComparisonPriority::Throughput => WeightVector::new()
                .with(metric::CUTTING_SPEED, 40.0)
                .with(metric::LASER_POWER, 25.0)
                .with(metric::PURCHASE_PRICE, 15.0)
                .with(metric::OPERATING_COST, 10.0)
                .with(metric::MAINTENANCE, 10.0),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComparisonPriority::Balanced => "Balanced",
            ComparisonPriority::Cost => "Cost",
            ComparisonPriority::Performance => "Performance",
            ComparisonPriority::Throughput => "Throughput",
        }
    }
}

impl std::fmt::Display for ComparisonPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One option's scored evaluation within a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentAnalysis {
    /// Option name
    pub name: String,

    /// Purchase price carried over for budget selection
    pub purchase_price_usd: f64,

    /// Cost of ownership over the 5-year horizon
    pub total_cost_usd: f64,

    /// Composite score per $100k of ownership cost
    pub value_ratio: f64,

    /// Generic evaluation (relative sub-scores, tier, strengths)
    pub composite: CompositeResult<ScoreTier>,
}

/// Results from comparing a set of equipment options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Priority preset the weights came from
    pub priority: ComparisonPriority,

    /// Options descending by composite score; ties keep input order
    pub ranking: Vec<Ranked<EquipmentAnalysis>>,

    /// Option with the maximum composite score
    pub best_overall: String,

    /// Option with the maximum value ratio
    pub best_value: String,

    /// Option with the minimum purchase price
    pub best_budget: String,

    /// Option with the maximum laser power
    pub best_performance: String,

    /// Non-blocking findings across the whole comparison
    pub warnings: Vec<ValidationWarning>,
}

/// Build the metric set for one comparison: static validation ranges,
/// ratio scales anchored at the compared set's maxima.
pub fn comparison_metrics(options: &[EquipmentOption]) -> MetricSet {
    let max_of = |f: fn(&EquipmentOption) -> f64| {
        options.iter().map(f).fold(0.0_f64, f64::max)
    };

    MetricSet::new(vec![
        MetricDef::ratio(
            metric::PURCHASE_PRICE,
            "Purchase price",
            "USD",
            max_of(|o| o.purchase_price_usd),
        )
        .range(1_000.0, 10_000_000.0)
        .lower_is_better(),
        MetricDef::ratio(
            metric::LASER_POWER,
            "Laser power",
            "W",
            max_of(|o| o.laser_power_w),
        )
        .range(100.0, 100_000.0),
        MetricDef::ratio(
            metric::CUTTING_SPEED,
            "Cutting speed",
            "mm/min",
            max_of(|o| o.cutting_speed_mm_min),
        )
        .range(100.0, 200_000.0),
        MetricDef::ratio(
            metric::OPERATING_COST,
            "Operating cost",
            "USD/h",
            max_of(|o| o.operating_cost_hr_usd),
        )
        .range(0.0, 10_000.0)
        .lower_is_better(),
        MetricDef::ratio(
            metric::MAINTENANCE,
            "Annual maintenance",
            "USD",
            max_of(|o| o.maintenance_annual_usd),
        )
        .range(0.0, 1_000_000.0)
        .lower_is_better(),
    ])
}

/// Validate a comparison without running it.
pub fn validate_comparison(options: &[EquipmentOption]) -> ValidationReport {
    let mut report = ValidationReport::new();
    if options.len() < 2 {
        report.push_error(ScoreError::invalid_input(
            "options",
            options.len().to_string(),
            "A comparison needs at least two options",
        ));
        return report;
    }

    let defs = comparison_metrics(options);
    for option in options {
        if let Err(error) = option.validate() {
            report.push_error(error);
        }
        report.merge(check_ranges(&option.metric_values(), &defs));
        if option.annual_running_cost_usd() > option.purchase_price_usd {
            report.warn(
                option.name.clone(),
                "RUNNING_COST_DOMINATES",
                format!(
                    "Annual running cost (${:.0}) exceeds the purchase price; verify the cost inputs",
                    option.annual_running_cost_usd()
                ),
            );
        }
    }
    report
}

/// Compare options under a priority preset.
pub fn compare(
    options: &[EquipmentOption],
    priority: ComparisonPriority,
) -> ScoreResult<ComparisonResult> {
    compare_weighted(options, priority, &priority.weights())
}

/// Compare options under a caller-tuned weight vector.
///
/// The weight vector may cover any subset of the comparison metrics; it
/// is normalized by the sum of the weights actually present.
pub fn compare_weighted(
    options: &[EquipmentOption],
    priority: ComparisonPriority,
    weights: &WeightVector,
) -> ScoreResult<ComparisonResult> {
    let warnings = validate_comparison(options).into_result()?;

    let defs = comparison_metrics(options);
    let tiers = ScoreTier::standard_table();

    let mut analyses = Vec::with_capacity(options.len());
    for option in options {
        let composite = evaluate(&option.name, &option.metric_values(), &defs, weights, &tiers)?;
        let total_cost_usd = option.total_cost_usd();
        analyses.push(EquipmentAnalysis {
            name: option.name.clone(),
            purchase_price_usd: option.purchase_price_usd,
            total_cost_usd,
            value_ratio: composite.overall_score / (total_cost_usd / 100_000.0),
            composite,
        });
    }

    // Each selection is its own pass over the unranked list; the primary
    // ranking below is built from a separate stable sort.
    let best_overall = best_by(&analyses, |a| a.composite.overall_score)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let best_value = best_by(&analyses, |a| a.value_ratio)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let best_budget = worst_by(&analyses, |a| a.purchase_price_usd)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let best_performance = best_by(options, |o| o.laser_power_w)
        .map(|o| o.name.clone())
        .unwrap_or_default();

    debug!(
        count = options.len(),
        %priority,
        %best_overall,
        "compared equipment options"
    );

    Ok(ComparisonResult {
        priority,
        ranking: rank_by_score(analyses, |a| a.composite.overall_score),
        best_overall,
        best_value,
        best_budget,
        best_performance,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(
        name: &str,
        price: f64,
        power: f64,
        speed: f64,
        operating: f64,
        maintenance: f64,
    ) -> EquipmentOption {
        EquipmentOption {
            name: name.to_string(),
            purchase_price_usd: price,
            laser_power_w: power,
            cutting_speed_mm_min: speed,
            operating_cost_hr_usd: operating,
            maintenance_annual_usd: maintenance,
        }
    }

    fn three_options() -> Vec<EquipmentOption> {
        vec![
            option("A", 100_000.0, 3000.0, 10_000.0, 20.0, 5000.0),
            option("B", 150_000.0, 4000.0, 12_000.0, 25.0, 7000.0),
            option("C", 90_000.0, 1500.0, 6000.0, 15.0, 3000.0),
        ]
    }

    #[test]
    fn test_cheaper_option_wins_on_price_and_ranking() {
        // Two options, price [100k, 150k] and power [3000, 4000], equal
        // weights on those two criteria only.
        let options = vec![
            option("A", 100_000.0, 3000.0, 10_000.0, 20.0, 5000.0),
            option("B", 150_000.0, 4000.0, 12_000.0, 25.0, 7000.0),
        ];
        let weights = WeightVector::new()
            .with(metric::PURCHASE_PRICE, 50.0)
            .with(metric::LASER_POWER, 50.0);
        let result = compare_weighted(&options, ComparisonPriority::Balanced, &weights).unwrap();

        let top = &result.ranking[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.item.name, "A");

        let price_sub = |analysis: &EquipmentAnalysis| {
            analysis.composite.sub_scores[metric::PURCHASE_PRICE]
        };
        let a = result.ranking.iter().find(|r| r.item.name == "A").unwrap();
        let b = result.ranking.iter().find(|r| r.item.name == "B").unwrap();
        assert!(price_sub(&a.item) > price_sub(&b.item));
        assert!(a.item.composite.overall_score > b.item.composite.overall_score);
    }

    #[test]
    fn test_named_selections_are_independent() {
        let result = compare(&three_options(), ComparisonPriority::Balanced).unwrap();
        // A carries the best weighted sum, C is the cheapest and the best
        // score-per-dollar, B has the most power. Rank 1 and the named
        // selections legitimately disagree.
        assert_eq!(result.best_overall, "A");
        assert_eq!(result.best_budget, "C");
        assert_eq!(result.best_value, "C");
        assert_eq!(result.best_performance, "B");
        assert_eq!(result.ranking[0].item.name, result.best_overall);
    }

    #[test]
    fn test_selections_leave_ranking_intact() {
        let result = compare(&three_options(), ComparisonPriority::Balanced).unwrap();
        for (index, entry) in result.ranking.iter().enumerate() {
            assert_eq!(entry.rank, (index + 1) as u32);
        }
        for pair in result.ranking.windows(2) {
            assert!(
                pair[0].item.composite.overall_score >= pair[1].item.composite.overall_score,
                "ranking must stay descending after selections are derived"
            );
        }
    }

    #[test]
    fn test_priority_changes_the_winner() {
        let options = vec![
            option("Budget", 80_000.0, 2000.0, 5000.0, 30.0, 10_000.0),
            option("Flagship", 300_000.0, 12_000.0, 20_000.0, 30.0, 10_000.0),
        ];
        let cost = compare(&options, ComparisonPriority::Cost).unwrap();
        assert_eq!(cost.ranking[0].item.name, "Budget");

        let performance = compare(&options, ComparisonPriority::Performance).unwrap();
        assert_eq!(performance.ranking[0].item.name, "Flagship");
    }

    #[test]
    fn test_single_option_rejected() {
        let options = vec![option("A", 100_000.0, 3000.0, 10_000.0, 20.0, 5000.0)];
        let err = compare(&options, ComparisonPriority::Balanced).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut options = three_options();
        options[1].name = "  ".to_string();
        assert!(compare(&options, ComparisonPriority::Balanced).is_err());
    }

    #[test]
    fn test_out_of_range_price_rejected() {
        let mut options = three_options();
        options[0].purchase_price_usd = -5.0;
        let err = compare(&options, ComparisonPriority::Balanced).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_running_cost_warning() {
        let mut options = three_options();
        // 60 USD/h * 2000 h + 30k maintenance = 150k > 120k purchase.
        options[0] = option("Leaky", 120_000.0, 3000.0, 10_000.0, 60.0, 30_000.0);
        let result = compare(&options, ComparisonPriority::Balanced).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == "RUNNING_COST_DOMINATES" && w.field == "Leaky"));
    }

    #[test]
    fn test_total_cost_math() {
        let o = option("A", 100_000.0, 3000.0, 10_000.0, 20.0, 5000.0);
        assert_eq!(o.annual_running_cost_usd(), 45_000.0);
        assert_eq!(o.total_cost_usd(), 325_000.0);
    }

    #[test]
    fn test_comparison_is_idempotent() {
        let first = compare(&three_options(), ComparisonPriority::Balanced).unwrap();
        let second = compare(&three_options(), ComparisonPriority::Balanced).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_tied_scores_keep_input_order() {
        let twin = option("Twin-1", 100_000.0, 3000.0, 10_000.0, 20.0, 5000.0);
        let mut twin2 = twin.clone();
        twin2.name = "Twin-2".to_string();
        let options = vec![twin, twin2];
        let result = compare(&options, ComparisonPriority::Balanced).unwrap();
        assert_eq!(result.ranking[0].item.name, "Twin-1");
        assert_eq!(result.ranking[1].item.name, "Twin-2");
    }
}
