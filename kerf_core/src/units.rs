//! # Unit Types
//!
//! Type-safe wrappers for laser-cutting units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers with transparent JSON serialization).
//!
//! Kerf uses metric process units throughout, matching machine-tool
//! conventions:
//! - Length: millimeters (mm), meters (m)
//! - Power: watts (W), kilowatts (kW)
//! - Feed rate: millimeters per minute (mm/min)
//! - Time: hours (h), minutes (min)
//! - Ratios: percent (%)
//!
//! ## Example
//!
//! ```rust
//! use kerf_core::units::{Kilowatts, Millimeters, Watts};
//!
//! let power = Watts(6000.0);
//! let kw: Kilowatts = power.into();
//! assert_eq!(kw.0, 6.0);
//!
//! let sheet_length = Millimeters(2000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

impl Mul for Millimeters {
    type Output = SquareMillimeters;
    fn mul(self, rhs: Millimeters) -> SquareMillimeters {
        SquareMillimeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

// ============================================================================
// Feed Rate Units
// ============================================================================

/// Feed rate in millimeters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmPerMin(pub f64);

// ============================================================================
// Time Units
// ============================================================================

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / 60.0)
    }
}

// ============================================================================
// Ratio Units
// ============================================================================

/// Ratio expressed as a percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Convert to a 0-1 fraction
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Build from a 0-1 fraction
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(MmPerMin);
impl_arithmetic!(Hours);
impl_arithmetic!(Minutes);
impl_arithmetic!(Percent);
