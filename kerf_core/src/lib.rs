//! # kerf_core - Laser-Cutting Analytics Engine
//!
//! `kerf_core` is the computational heart of Kerf, providing the scoring,
//! ranking, and risk-classification math behind a suite of laser-cutting
//! calculators. All inputs and outputs are JSON-serializable, so form
//! layers, export layers, and preset stores can exchange plain structured
//! data with the engine without any shared types.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results;
//!   nothing survives past a single evaluation call
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Tables as Data**: Benchmarks, weights, and tier thresholds are
//!   injected values, never constants buried in formulas
//!
//! ## Quick Start
//!
//! ```rust
//! use kerf_core::benchmarks::MaterialKind;
//! use kerf_core::calculators::warping::{assess, CoolingMethod, SupportType, WarpingRiskInput};
//!
//! let input = WarpingRiskInput {
//!     label: "Rail blank".to_string(),
//!     material: MaterialKind::Aluminum,
//!     thickness_mm: 1.0,
//!     length_mm: 2000.0,
//!     width_mm: 100.0,
//!     laser_power_w: 5000.0,
//!     cutting_speed_mm_min: 1000.0,
//!     support: SupportType::None,
//!     cooling: CoolingMethod::None,
//! };
//!
//! let result = assess(&input).unwrap();
//! println!("risk {:.1}/10 ({})", result.overall_risk_score, result.risk_level);
//!
//! // Serialize for the UI or export layer
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculators`] - the equipment, warping, and performance calculators
//! - [`scoring`] - the generic normalize/weigh/classify/rank pipeline
//! - [`benchmarks`] - material and machine-class reference tables
//! - [`metrics`] - metric definitions, benchmark triples, weight vectors
//! - [`validate`] - range checks, warnings, and validation reports
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod benchmarks;
pub mod calculators;
pub mod errors;
pub mod metrics;
pub mod scoring;
pub mod units;
pub mod validate;

// Re-export commonly used types at crate root for convenience
pub use errors::{ScoreError, ScoreResult};
pub use metrics::{BenchmarkTriple, Direction, MetricDef, MetricSet, MetricValues, WeightVector};
pub use scoring::{
    evaluate, evaluate_many, CompositeResult, RankingResult, ScoreTier, ThresholdTable,
};
pub use validate::{ValidationReport, ValidationWarning};
