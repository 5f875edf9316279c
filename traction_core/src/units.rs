//! # Unit Types
//!
//! Type-safe wrappers for the units the engine works in, plus the
//! normalization of user-facing track units (slope in degrees, curves as a
//! radius) into the percent-grade and curve-degree values the physical model
//! expects.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - The model uses one consistent unit set (km/h, tonnes, N)
//! - JSON serialization stays clean (just numbers)
//! - No runtime overhead
//!
//! ## Example
//!
//! ```rust
//! use traction_core::units::{Kilograms, Tonnes, Kmh, MetresPerSecond};
//!
//! let weight: Tonnes = Kilograms(120_000.0).into();
//! assert_eq!(weight.0, 120.0);
//!
//! let speed: MetresPerSecond = Kmh(36.0).into();
//! assert!((speed.0 - 10.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{CURVE_DEGREE_RADIUS_CONSTANT, KG_PER_TONNE, KMH_PER_MPS, MAX_SLOPE_DEGREE};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / KG_PER_TONNE)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * KG_PER_TONNE)
    }
}

// ============================================================================
// Speed Units
// ============================================================================

/// Speed in kilometres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kmh(pub f64);

/// Speed in metres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetresPerSecond(pub f64);

impl From<Kmh> for MetresPerSecond {
    fn from(kmh: Kmh) -> Self {
        MetresPerSecond(kmh.0 / KMH_PER_MPS)
    }
}

impl From<MetresPerSecond> for Kmh {
    fn from(mps: MetresPerSecond) -> Self {
        Kmh(mps.0 * KMH_PER_MPS)
    }
}

// ============================================================================
// Force
// ============================================================================

/// Force in Newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Track Geometry
// ============================================================================

/// Gradient in percent grade (rise/run × 100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentGrade(pub f64);

/// Curve severity in degrees (railway curve-degree convention)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveDegree(pub f64);

/// How a slope value was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeUnit {
    /// Percent grade, used as-is
    #[default]
    #[serde(alias = "%")]
    Percent,
    /// Inclination angle in degrees
    #[serde(alias = "deg", alias = "degrees")]
    Degree,
}

/// How a curve value was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveUnit {
    /// Curve degree, used as-is
    #[default]
    #[serde(alias = "deg", alias = "degrees")]
    Degree,
    /// Curve radius in metres
    #[serde(alias = "m", alias = "radius")]
    RadiusMeters,
}

impl SlopeUnit {
    /// Convert a slope entered in this unit to percent grade.
    ///
    /// # Errors
    ///
    /// `OutOfRangeParameter` for an angle of 90° or more, where the grade is
    /// unbounded.
    pub fn to_percent(self, value: f64) -> CalcResult<PercentGrade> {
        match self {
            SlopeUnit::Percent => Ok(PercentGrade(value)),
            SlopeUnit::Degree if value.abs() >= MAX_SLOPE_DEGREE => Err(CalcError::out_of_range(
                "max_slope",
                value.to_string(),
                "Slope angle must be below 90 degrees",
            )),
            SlopeUnit::Degree => Ok(PercentGrade(value.to_radians().tan() * 100.0)),
        }
    }
}

impl CurveUnit {
    /// Convert a curve entered in this unit to curve degrees.
    ///
    /// A radius of zero means straight track and maps to 0°.
    pub fn to_degree(self, value: f64) -> CurveDegree {
        match self {
            CurveUnit::Degree => CurveDegree(value),
            CurveUnit::RadiusMeters if value == 0.0 => CurveDegree(0.0),
            CurveUnit::RadiusMeters => CurveDegree(CURVE_DEGREE_RADIUS_CONSTANT / value),
        }
    }
}
