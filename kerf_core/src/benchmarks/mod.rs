//! # Benchmark Databases
//!
//! Reference tables consumed by the calculators. Benchmarks are data,
//! not code: each table is built once and injected into the generic
//! scoring functions, so boundaries and reference values can be tested
//! (and eventually revised) without touching any formula.
//!
//! ## Tables
//!
//! - [`materials`] - thermal behavior of sheet-metal families for the
//!   warping-risk calculator
//! - [`machines`] - installed-base P10/P50/P90 performance envelopes per
//!   laser source family for the benchmarking calculator
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::benchmarks::machines::{benchmark_metrics, metric, MachineClass};
//!
//! let defs = benchmark_metrics(MachineClass::Fiber);
//! let throughput = defs.get(metric::THROUGHPUT).unwrap();
//! assert_eq!(throughput.benchmark_high(), Some(80.0));
//! ```

pub mod machines;
pub mod materials;

pub use machines::{benchmark_metrics, MachineClass};
pub use materials::{MaterialKind, ThermalProperties};
