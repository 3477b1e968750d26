//! # Calculator Instances
//!
//! The three calculators built on the generic scoring pipeline. Each
//! follows the pattern:
//!
//! - `*Input` - typed input parameters (JSON-serializable)
//! - `*Result` / `*Report` - typed results (JSON-serializable)
//! - a pure entry function (`compare`, `assess`, `benchmark`) returning
//!   `Result<_, ScoreError>`
//!
//! ## Available Calculators
//!
//! - [`equipment`] - multi-option machine comparison with named
//!   selections
//! - [`warping`] - warping-risk composition for one cutting job
//! - [`performance`] - benchmarking one machine against its class
//!   envelope

pub mod equipment;
pub mod performance;
pub mod warping;

use serde::{Deserialize, Serialize};

use crate::errors::ScoreResult;

// Re-export commonly used types
pub use equipment::{compare, ComparisonPriority, ComparisonResult, EquipmentOption};
pub use performance::{benchmark, PerformanceInput, PerformanceReport};
pub use warping::{assess, RiskLevel, WarpingRiskInput, WarpingRiskResult};

/// A full equipment-comparison request: the option pool plus the
/// priority preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// User label for this comparison
    pub label: String,

    /// Options under comparison (at least two)
    pub options: Vec<EquipmentOption>,

    /// Weighting preset
    pub priority: ComparisonPriority,
}

impl ComparisonRequest {
    /// Run the comparison
    pub fn run(&self) -> ScoreResult<ComparisonResult> {
        equipment::compare(&self.options, self.priority)
    }
}

/// Enum wrapper for all calculator inputs.
///
/// This allows storing heterogeneous evaluations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculatorInput {
    /// Multi-option equipment comparison
    EquipmentComparison(ComparisonRequest),
    /// Warping-risk assessment for one job
    WarpingRisk(WarpingRiskInput),
    /// Performance benchmark for one machine
    PerformanceBenchmark(PerformanceInput),
}

impl CalculatorInput {
    /// Get the user-provided label for this evaluation
    pub fn label(&self) -> &str {
        match self {
            CalculatorInput::EquipmentComparison(request) => &request.label,
            CalculatorInput::WarpingRisk(input) => &input.label,
            CalculatorInput::PerformanceBenchmark(input) => &input.label,
        }
    }

    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculatorInput::EquipmentComparison(_) => "Equipment Comparison",
            CalculatorInput::WarpingRisk(_) => "Warping Risk",
            CalculatorInput::PerformanceBenchmark(_) => "Performance Benchmark",
        }
    }

    /// Dispatch to the matching calculator
    pub fn run(&self) -> ScoreResult<CalculatorOutput> {
        match self {
            CalculatorInput::EquipmentComparison(request) => {
                request.run().map(CalculatorOutput::EquipmentComparison)
            }
            CalculatorInput::WarpingRisk(input) => {
                warping::assess(input).map(CalculatorOutput::WarpingRisk)
            }
            CalculatorInput::PerformanceBenchmark(input) => {
                performance::benchmark(input).map(CalculatorOutput::PerformanceBenchmark)
            }
        }
    }
}

/// Enum wrapper for all calculator outputs, mirroring
/// [`CalculatorInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculatorOutput {
    EquipmentComparison(ComparisonResult),
    WarpingRisk(WarpingRiskResult),
    PerformanceBenchmark(PerformanceReport),
}
