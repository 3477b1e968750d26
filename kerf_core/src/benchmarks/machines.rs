//! Installed-base performance benchmarks per machine class.
//!
//! Each machine class carries a benchmark triple per monitored metric,
//! read as the P10/P50/P90 of the installed-base distribution: `low` is
//! the 10th percentile, `average` the median, `high` the 90th. The
//! performance calculator normalizes and percentile-ranks against these
//! tables.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ScoreError, ScoreResult};
use crate::metrics::{MetricDef, MetricSet};

/// Metric ids for the performance benchmarking calculator
pub mod metric {
    pub const THROUGHPUT: &str = "throughput_parts_hr";
    pub const UTILIZATION: &str = "utilization_pct";
    pub const QUALITY_RATE: &str = "quality_rate_pct";
    pub const DEFECT_RATE: &str = "defect_rate_pct";
    pub const ENERGY_PER_PART: &str = "energy_per_part_kwh";
    pub const DOWNTIME: &str = "downtime_hours_month";
}

/// Laser source families with distinct performance envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineClass {
    /// CO2 gas laser
    Co2,
    /// Fiber laser
    Fiber,
    /// Diode laser
    Diode,
}

impl MachineClass {
    /// All machine classes for UI selection
    pub const ALL: [MachineClass; 3] = [MachineClass::Co2, MachineClass::Fiber, MachineClass::Diode];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> ScoreResult<Self> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "co2" | "gas" => Ok(MachineClass::Co2),
            "fiber" | "fibre" => Ok(MachineClass::Fiber),
            "diode" => Ok(MachineClass::Diode),
            _ => Err(ScoreError::unknown_benchmark(s)),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MachineClass::Co2 => "CO2",
            MachineClass::Fiber => "Fiber",
            MachineClass::Diode => "Diode",
        }
    }
}

impl std::fmt::Display for MachineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn class_metrics(class: MachineClass) -> MetricSet {
    let (throughput, energy) = match class {
        MachineClass::Co2 => ((10.0, 25.0, 45.0), (0.8, 1.6, 3.0)),
        MachineClass::Fiber => ((20.0, 45.0, 80.0), (0.3, 0.7, 1.4)),
        MachineClass::Diode => ((4.0, 10.0, 18.0), (0.2, 0.5, 1.0)),
    };

    MetricSet::new(vec![
        MetricDef::triple(
            metric::THROUGHPUT,
            "Throughput",
            "parts/h",
            throughput.0,
            throughput.1,
            throughput.2,
        )
        .range(0.0, 500.0),
        MetricDef::triple(metric::UTILIZATION, "Utilization", "%", 40.0, 65.0, 85.0)
            .range(0.0, 100.0),
        MetricDef::triple(metric::QUALITY_RATE, "Quality rate", "%", 88.0, 94.0, 99.0)
            .range(0.0, 100.0),
        MetricDef::triple(metric::DEFECT_RATE, "Defect rate", "%", 1.0, 4.0, 10.0)
            .range(0.0, 100.0)
            .lower_is_better(),
        MetricDef::triple(
            metric::ENERGY_PER_PART,
            "Energy per part",
            "kWh",
            energy.0,
            energy.1,
            energy.2,
        )
        .range(0.0, 100.0)
        .lower_is_better(),
        MetricDef::triple(metric::DOWNTIME, "Downtime", "h/month", 4.0, 12.0, 30.0)
            .range(0.0, 744.0)
            .lower_is_better(),
    ])
}

static BENCHMARKS: Lazy<BTreeMap<MachineClass, MetricSet>> = Lazy::new(|| {
    MachineClass::ALL
        .into_iter()
        .map(|class| (class, class_metrics(class)))
        .collect()
});

/// The benchmark metric set for one machine class.
pub fn benchmark_metrics(class: MachineClass) -> &'static MetricSet {
    &BENCHMARKS[&class]
}
