//! # Warping Risk Calculator
//!
//! Composes a 0-10 warping-risk score for a single cutting job from six
//! risk drivers, then classifies it into low/medium/high/critical.
//!
//! Each driver normalizes onto a 0-100 *risk contribution* against its
//! own benchmark span; a driver's direction selects which end of the
//! span contributes maximum risk (for thickness, thin stock is the
//! risky end). The weighted composite divided by 10 is the published
//! risk score.
//!
//! ## Drivers
//!
//! | Driver          | Raw value                              | Weight |
//! |-----------------|----------------------------------------|--------|
//! | `thermal_index` | material distortion index              | 20     |
//! | `thickness_mm`  | sheet thickness (thin = risky)         | 20     |
//! | `aspect_ratio`  | max(length, width) / min(length, width)| 20     |
//! | `heat_input`    | power / (speed x thickness), W-min/mm2 | 15     |
//! | `support_risk`  | fixturing level                        | 15     |
//! | `cooling_risk`  | cooling method                         | 10     |
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::benchmarks::MaterialKind;
//! use kerf_core::calculators::warping::{assess, CoolingMethod, SupportType, WarpingRiskInput};
//!
//! let input = WarpingRiskInput {
//!     label: "Bracket blank".to_string(),
//!     material: MaterialKind::MildSteel,
//!     thickness_mm: 3.0,
//!     length_mm: 400.0,
//!     width_mm: 300.0,
//!     laser_power_w: 2000.0,
//!     cutting_speed_mm_min: 2500.0,
//!     support: SupportType::Moderate,
//!     cooling: CoolingMethod::AirAssist,
//! };
//!
//! let result = assess(&input).unwrap();
//! assert!(result.overall_risk_score <= 10.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::MaterialKind;
use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{MetricDef, MetricSet, MetricValues, WeightVector};
use crate::scoring::{
    evaluate, fallback_recommendation, CompositeResult, Priority, Recommendation, ThresholdTable,
};
use crate::units::{Millimeters, SquareMillimeters};
use crate::validate::ValidationReport;

/// Driver metric ids
pub mod driver {
    pub const THERMAL: &str = "thermal_index";
    pub const THICKNESS: &str = "thickness_mm";
    pub const ASPECT: &str = "aspect_ratio";
    pub const HEAT: &str = "heat_input";
    pub const SUPPORT: &str = "support_risk";
    pub const COOLING: &str = "cooling_risk";
}

/// Fixturing level for the sheet during cutting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    /// No fixturing; sheet rests on the slat bed only
    #[default]
    None,
    /// Edge clamps only
    Minimal,
    /// Clamps plus intermediate supports
    Moderate,
    /// Full fixture or vacuum table
    Extensive,
}

impl SupportType {
    /// All support types for UI selection
    pub const ALL: [SupportType; 4] = [
        SupportType::None,
        SupportType::Minimal,
        SupportType::Moderate,
        SupportType::Extensive,
    ];

    /// Raw risk value on the 0-10 driver scale
    pub fn risk_factor(&self) -> f64 {
        match self {
            SupportType::None => 10.0,
            SupportType::Minimal => 6.5,
            SupportType::Moderate => 3.5,
            SupportType::Extensive => 1.0,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::None => "None",
            SupportType::Minimal => "Minimal",
            SupportType::Moderate => "Moderate",
            SupportType::Extensive => "Extensive",
        }
    }
}

/// Cooling applied during or between cuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoolingMethod {
    /// No assist gas or cooling
    #[default]
    None,
    /// Compressed-air assist
    AirAssist,
    /// Nitrogen or other assist gas
    GasAssist,
    /// Controlled cooling cycles between passes
    Controlled,
}

impl CoolingMethod {
    /// All cooling methods for UI selection
    pub const ALL: [CoolingMethod; 4] = [
        CoolingMethod::None,
        CoolingMethod::AirAssist,
        CoolingMethod::GasAssist,
        CoolingMethod::Controlled,
    ];

    /// Raw risk value on the 0-10 driver scale
    pub fn risk_factor(&self) -> f64 {
        match self {
            CoolingMethod::None => 10.0,
            CoolingMethod::AirAssist => 7.0,
            CoolingMethod::GasAssist => 4.5,
            CoolingMethod::Controlled => 1.5,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CoolingMethod::None => "None",
            CoolingMethod::AirAssist => "Air assist",
            CoolingMethod::GasAssist => "Gas assist",
            CoolingMethod::Controlled => "Controlled",
        }
    }
}

/// Discrete warping-risk tier on the 0-10 score scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Risk score below 3
    Low,
    /// Risk score >= 3
    Medium,
    /// Risk score >= 6
    High,
    /// Risk score >= 8
    Critical,
}

impl RiskLevel {
    /// All risk levels, mildest first
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Stable label for serialization and display
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input parameters for one cutting job.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Rail blank",
///   "material": "aluminum",
///   "thickness_mm": 1.0,
///   "length_mm": 2000.0,
///   "width_mm": 100.0,
///   "laser_power_w": 5000.0,
///   "cutting_speed_mm_min": 1000.0,
///   "support": "none",
///   "cooling": "none"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpingRiskInput {
    /// User label for this job
    pub label: String,

    /// Sheet material family
    pub material: MaterialKind,

    /// Sheet thickness in millimeters
    pub thickness_mm: f64,

    /// Part length in millimeters
    pub length_mm: f64,

    /// Part width in millimeters
    pub width_mm: f64,

    /// Laser power in watts
    pub laser_power_w: f64,

    /// Cutting speed in millimeters per minute
    pub cutting_speed_mm_min: f64,

    /// Fixturing level
    pub support: SupportType,

    /// Cooling method
    pub cooling: CoolingMethod,
}

impl WarpingRiskInput {
    /// Part aspect ratio, always >= 1
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.length_mm.max(self.width_mm);
        let short = self.length_mm.min(self.width_mm);
        long / short
    }

    /// Heat input per unit of cut material (W-min/mm2)
    pub fn heat_input(&self) -> f64 {
        self.laser_power_w / (self.cutting_speed_mm_min * self.thickness_mm)
    }

    /// Part footprint
    pub fn sheet_area(&self) -> SquareMillimeters {
        Millimeters(self.length_mm) * Millimeters(self.width_mm)
    }

    /// Lower the typed input onto the driver metric map
    pub fn driver_values(&self) -> MetricValues {
        MetricValues::from([
            (
                driver::THERMAL.to_string(),
                self.material.properties().distortion_index(),
            ),
            (driver::THICKNESS.to_string(), self.thickness_mm),
            (driver::ASPECT.to_string(), self.aspect_ratio()),
            (driver::HEAT.to_string(), self.heat_input()),
            (driver::SUPPORT.to_string(), self.support.risk_factor()),
            (driver::COOLING.to_string(), self.cooling.risk_factor()),
        ])
    }

    /// Validate input parameters.
    ///
    /// Hard errors cover dimension, power, and speed ranges plus the
    /// derived driver ranges; warnings cover the cross-field heuristics
    /// (high aspect ratio, thin stock at high power).
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (field, value, min, max) in [
            ("length_mm", self.length_mm, 1.0, 10_000.0),
            ("width_mm", self.width_mm, 1.0, 10_000.0),
            ("laser_power_w", self.laser_power_w, 50.0, 50_000.0),
            (
                "cutting_speed_mm_min",
                self.cutting_speed_mm_min,
                10.0,
                100_000.0,
            ),
        ] {
            if !value.is_finite() || value < min || value > max {
                report.push_error(ScoreError::out_of_range(field, value, min, max));
            }
        }
        if !report.is_valid() {
            return report;
        }

        report.merge(crate::validate::check_ranges(&self.driver_values(), &DRIVERS));
        if !report.is_valid() {
            return report;
        }

        let aspect = self.aspect_ratio();
        if aspect > 10.0 {
            report.warn(
                "aspect_ratio",
                "ASPECT_RATIO",
                format!("High aspect ratio ({aspect:.1}:1) increases warping risk"),
            );
        }
        if self.thickness_mm < 1.5 && self.laser_power_w > 3000.0 {
            report.warn(
                "laser_power_w",
                "THIN_HIGH_POWER",
                "Thin stock at high laser power concentrates heat; expect distortion",
            );
        }
        report
    }
}

/// Results from warping-risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpingRiskResult {
    /// Composite risk on the 0-10 scale
    pub overall_risk_score: f64,

    /// Classified tier
    pub risk_level: RiskLevel,

    /// Part aspect ratio
    pub aspect_ratio: f64,

    /// Heat input per unit of cut material (W-min/mm2)
    pub heat_input: f64,

    /// Driver ids contributing the most risk, worst first
    pub top_drivers: Vec<String>,

    /// Mitigation advice, deterministic per input
    pub recommendations: Vec<Recommendation>,

    /// Full generic evaluation (0-100 scale, driver sub-scores, warnings)
    pub composite: CompositeResult<RiskLevel>,
}

static DRIVERS: Lazy<MetricSet> = Lazy::new(|| {
    MetricSet::new(vec![
        MetricDef::triple(driver::THERMAL, "Thermal distortion", "", 1.0, 2.0, 3.0)
            .range(0.0, 10.0),
        MetricDef::triple(driver::THICKNESS, "Thickness", "mm", 0.5, 3.0, 8.0)
            .range(0.1, 150.0)
            .lower_is_better(),
        MetricDef::triple(driver::ASPECT, "Aspect ratio", ":1", 1.0, 8.0, 20.0)
            .range(1.0, 10_000.0),
        MetricDef::triple(driver::HEAT, "Heat input", "W-min/mm2", 0.2, 1.5, 4.0)
            .range(0.0, 50_000.0),
        MetricDef::triple(driver::SUPPORT, "Support", "", 0.0, 5.0, 10.0).range(0.0, 10.0),
        MetricDef::triple(driver::COOLING, "Cooling", "", 0.0, 5.0, 10.0).range(0.0, 10.0),
    ])
});

static WEIGHTS: Lazy<WeightVector> = Lazy::new(|| {
    WeightVector::new()
        .with(driver::THERMAL, 20.0)
        .with(driver::THICKNESS, 20.0)
        .with(driver::ASPECT, 20.0)
        .with(driver::HEAT, 15.0)
        .with(driver::SUPPORT, 15.0)
        .with(driver::COOLING, 10.0)
});

static RISK_BANDS: Lazy<ThresholdTable<RiskLevel>> = Lazy::new(|| {
    // Bounds on the internal 0-100 composite; published scores are /10.
    ThresholdTable::new(vec![
        (80.0, RiskLevel::Critical),
        (60.0, RiskLevel::High),
        (30.0, RiskLevel::Medium),
        (0.0, RiskLevel::Low),
    ])
    .expect("warping risk table is well-formed")
});

/// A driver sub-score at or above this contributes a targeted
/// recommendation
const ELEVATED: f64 = 60.0;

/// Assess warping risk for one cutting job.
///
/// # Returns
///
/// * `Ok(WarpingRiskResult)` - risk score, tier, and mitigation advice
/// * `Err(ScoreError)` - if inputs are invalid
pub fn assess(input: &WarpingRiskInput) -> ScoreResult<WarpingRiskResult> {
    let warnings = input.validate().into_result()?;

    let values = input.driver_values();
    let mut composite = evaluate(&input.label, &values, &DRIVERS, &WEIGHTS, &RISK_BANDS)?;
    composite.warnings = warnings;

    let overall_risk_score = composite.overall_score / 10.0;
    debug!(
        label = %input.label,
        risk = overall_risk_score,
        level = %composite.tier,
        "assessed warping risk"
    );

    Ok(WarpingRiskResult {
        overall_risk_score,
        risk_level: composite.tier,
        aspect_ratio: input.aspect_ratio(),
        heat_input: input.heat_input(),
        top_drivers: composite.strengths.clone(),
        recommendations: recommendations(&composite),
        composite,
    })
}

fn recommendations(composite: &CompositeResult<RiskLevel>) -> Vec<Recommendation> {
    let driver_score =
        |id: &str| composite.sub_scores.get(id).copied().unwrap_or(0.0);
    let mut recs = Vec::new();

    if driver_score(driver::SUPPORT) >= ELEVATED {
        recs.push(Recommendation::new(
            "fixturing",
            Priority::High,
            "Clamp the sheet or add tab supports; unsupported stock is free to bow as heat builds",
        ));
    }
    if driver_score(driver::COOLING) >= ELEVATED {
        recs.push(Recommendation::new(
            "cooling",
            Priority::High,
            "Add assist gas or controlled cooling cycles between passes",
        ));
    }
    if driver_score(driver::HEAT) >= ELEVATED {
        recs.push(Recommendation::new(
            "process",
            Priority::Medium,
            "Reduce laser power or raise cutting speed to cut heat input per unit of material",
        ));
    }
    if driver_score(driver::ASPECT) >= ELEVATED {
        recs.push(Recommendation::new(
            "nesting",
            Priority::Medium,
            "Re-nest long narrow parts across the sheet or bridge them with micro-tabs",
        ));
    }
    if driver_score(driver::THICKNESS) >= ELEVATED {
        recs.push(Recommendation::new(
            "process",
            Priority::Medium,
            "Thin stock distorts readily; consider pulsed mode or multiple lower-power passes",
        ));
    }
    if driver_score(driver::THERMAL) >= ELEVATED {
        recs.push(Recommendation::new(
            "material",
            Priority::Medium,
            "This material family is distortion-prone; allow for post-cut straightening",
        ));
    }

    match composite.tier {
        RiskLevel::Critical => recs.push(Recommendation::new(
            "process",
            Priority::Critical,
            "Run a trial cut on scrap stock and do not leave the job unattended",
        )),
        RiskLevel::High => recs.push(Recommendation::new(
            "process",
            Priority::High,
            "Schedule a post-cut flatness check before any downstream bending",
        )),
        RiskLevel::Medium | RiskLevel::Low => {}
    }

    if recs.is_empty() {
        recs.push(fallback_recommendation());
    }
    recs
}
