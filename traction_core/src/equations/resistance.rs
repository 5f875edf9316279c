//! # Train Resistance Formulas
//!
//! Forces opposing the motion of a locomotive or a trailing wagon load.
//! Every function returns Newtons.
//!
//! ## Notation
//!
//! - `v` = Speed (km/h)
//! - `W` = Weight (metric tonnes)
//! - `n` = Number of axles
//! - `i` = Gradient (percent grade)
//! - `D` = Curve severity (degrees)
//! - `g` = Standard gravity (9.81 m/s²)
//!
//! ## Running vs Starting
//!
//! Steady-running searches use the dynamic terms only (rolling, gradient,
//! curvature). Sweeps modelling a start from rest also add the breakaway
//! term. See [`ResistanceMode`].
//!
//! ## Degenerate inputs
//!
//! Rolling-resistance functions return 0 for a non-positive weight or a zero
//! axle count. They are evaluated inside sweeps, where a zero contribution is
//! the well-defined answer for "no vehicle".

use serde::{Deserialize, Serialize};

use crate::constants::{
    CURVATURE_COEFFICIENT, GRAVITY, KG_PER_TONNE, LOCO_ROLLING_A_AXLE, LOCO_ROLLING_A_BASE,
    LOCO_ROLLING_B, LOCO_ROLLING_C_NUM, LOCO_STARTING_COEFFICIENT, WAGON_ROLLING_A,
    WAGON_ROLLING_B, WAGON_ROLLING_C, WAGON_STARTING_COEFFICIENT,
};

/// Which resistance terms apply to an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResistanceMode {
    /// Sustained motion: rolling + gradient + curvature
    Running,
    /// Start from rest: running terms plus breakaway resistance
    Starting,
}

impl ResistanceMode {
    /// Whether the breakaway term is included
    pub fn includes_starting(self) -> bool {
        matches!(self, ResistanceMode::Starting)
    }
}

// =============================================================================
// ROLLING RESISTANCE
// =============================================================================

/// Locomotive rolling resistance
///
/// # Formula
/// - F = (A + B·v + C·v²)·W·g
/// - A = 0.647 + 13.17 / (W/n), B = 0.00933, C = 0.057 / W
///
/// Returns 0 when `W ≤ 0` or `n = 0`.
#[inline]
pub fn rolling_resistance_locomotive(speed_kmh: f64, weight_ton: f64, num_axles: u32) -> f64 {
    if weight_ton <= 0.0 || num_axles == 0 {
        return 0.0;
    }
    let axle_load_ton = weight_ton / f64::from(num_axles);
    let a = LOCO_ROLLING_A_BASE + LOCO_ROLLING_A_AXLE / axle_load_ton;
    let b = LOCO_ROLLING_B;
    let c = LOCO_ROLLING_C_NUM / weight_ton;
    (a + b * speed_kmh + c * speed_kmh.powi(2)) * weight_ton * GRAVITY
}

/// Wagon rolling resistance
///
/// # Formula
/// - F = (A + B·v + C·v²)·W·g
/// - A = 0.6438797, B = 0.01047218, C = 0.00007323
///
/// Returns 0 when `W ≤ 0`.
#[inline]
pub fn rolling_resistance_wagon(speed_kmh: f64, weight_ton: f64) -> f64 {
    if weight_ton <= 0.0 {
        return 0.0;
    }
    (WAGON_ROLLING_A + WAGON_ROLLING_B * speed_kmh + WAGON_ROLLING_C * speed_kmh.powi(2))
        * weight_ton
        * GRAVITY
}

// =============================================================================
// TRACK GEOMETRY
// =============================================================================

/// Gradient resistance: the component of gravity along the incline
///
/// # Formula
/// - F = W·1000·g·i/100
#[inline]
pub fn gradient_resistance(weight_ton: f64, slope_percent: f64) -> f64 {
    weight_ton * KG_PER_TONNE * GRAVITY * slope_percent / 100.0
}

/// Curvature resistance from flange friction and wheel slip in curves
///
/// # Formula
/// - F = 0.4·W·D·g
#[inline]
pub fn curvature_resistance(weight_ton: f64, curve_degree: f64) -> f64 {
    CURVATURE_COEFFICIENT * weight_ton * curve_degree * GRAVITY
}

// =============================================================================
// STARTING (BREAKAWAY) RESISTANCE
// =============================================================================

/// Locomotive breakaway resistance: F = 6.0·W·g
#[inline]
pub fn starting_resistance_locomotive(weight_ton: f64) -> f64 {
    LOCO_STARTING_COEFFICIENT * weight_ton * GRAVITY
}

/// Wagon breakaway resistance: F = 4.0·W·g
#[inline]
pub fn starting_resistance_wagon(weight_ton: f64) -> f64 {
    WAGON_STARTING_COEFFICIENT * weight_ton * GRAVITY
}

// =============================================================================
// COMPOSITE
// =============================================================================

/// Total resistance of the locomotive body for the given mode
pub fn locomotive_resistance(
    speed_kmh: f64,
    weight_ton: f64,
    num_axles: u32,
    slope_percent: f64,
    curve_degree: f64,
    mode: ResistanceMode,
) -> f64 {
    let running = rolling_resistance_locomotive(speed_kmh, weight_ton, num_axles)
        + gradient_resistance(weight_ton, slope_percent)
        + curvature_resistance(weight_ton, curve_degree);
    if mode.includes_starting() {
        running + starting_resistance_locomotive(weight_ton)
    } else {
        running
    }
}

/// Total resistance of a trailing wagon load for the given mode
pub fn wagon_resistance(
    speed_kmh: f64,
    weight_ton: f64,
    slope_percent: f64,
    curve_degree: f64,
    mode: ResistanceMode,
) -> f64 {
    let running = rolling_resistance_wagon(speed_kmh, weight_ton)
        + gradient_resistance(weight_ton, slope_percent)
        + curvature_resistance(weight_ton, curve_degree);
    if mode.includes_starting() {
        running + starting_resistance_wagon(weight_ton)
    } else {
        running
    }
}
