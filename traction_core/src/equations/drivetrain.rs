//! # Drivetrain and Adhesion Formulas
//!
//! Conversions between vehicle speed and engine speed, the power ceiling on
//! engine torque, torque-to-rail force, and the adhesion (slip) limit.
//!
//! ## Notation
//!
//! - `v` = Vehicle speed (km/h)
//! - `D` = Wheel diameter (m)
//! - `G` = Gear ratio
//! - `R` = Rear-axle (final-drive) ratio
//! - `N` = Engine speed (RPM)
//! - `T` = Engine torque (N·m)
//! - `P` = Power (kW)
//! - `μ` = Wheel-rail friction coefficient
//!
//! These functions divide by `D`, `G` and `R`; callers validate them first
//! (see `VehicleConfig::validate`).

use std::f64::consts::PI;

use crate::constants::{GRAVITY, KG_PER_TONNE, SECONDS_PER_MINUTE, WATTS_PER_KW};
use crate::units::{Kmh, MetresPerSecond};

// =============================================================================
// SPEED ↔ RPM
// =============================================================================

/// Wheel speed for a vehicle speed
///
/// # Formula
/// - N_wheel = (v/3.6) / (π·D) · 60
#[inline]
pub fn wheel_rpm(speed_kmh: f64, wheel_diameter_m: f64) -> f64 {
    let speed: MetresPerSecond = Kmh(speed_kmh).into();
    let circumference_m = PI * wheel_diameter_m;
    if circumference_m > 0.0 {
        speed.0 / circumference_m * SECONDS_PER_MINUTE
    } else {
        0.0
    }
}

/// Engine speed for a vehicle speed in a given gear
///
/// # Formula
/// - N = N_wheel · G · R
#[inline]
pub fn engine_rpm(
    speed_kmh: f64,
    wheel_diameter_m: f64,
    gear_ratio: f64,
    rear_axle_ratio: f64,
) -> f64 {
    wheel_rpm(speed_kmh, wheel_diameter_m) * gear_ratio * rear_axle_ratio
}

/// Vehicle speed reached at an engine speed in a given gear (inverse of [`engine_rpm`])
///
/// # Formula
/// - v = N·π·D / (G·R·60) · 3.6
#[inline]
pub fn speed_at_engine_rpm(
    rpm: f64,
    wheel_diameter_m: f64,
    gear_ratio: f64,
    rear_axle_ratio: f64,
) -> f64 {
    let wheel_turns_per_second = rpm / (gear_ratio * rear_axle_ratio * SECONDS_PER_MINUTE);
    let speed = MetresPerSecond(wheel_turns_per_second * PI * wheel_diameter_m);
    Kmh::from(speed).0
}

// =============================================================================
// POWER
// =============================================================================

/// Shaft power from torque and engine speed
///
/// # Formula
/// - P = N·T·2π / (60·1000)
#[inline]
pub fn shaft_power_kw(torque_nm: f64, rpm: f64) -> f64 {
    rpm * torque_nm * 2.0 * PI / (SECONDS_PER_MINUTE * WATTS_PER_KW)
}

/// Torque that exactly yields `power_kw` at `rpm`
///
/// # Formula
/// - T = P·60·1000 / (N·2π)
///
/// Returns 0 at standstill.
#[inline]
pub fn torque_for_power(power_kw: f64, rpm: f64) -> f64 {
    if rpm <= 0.0 {
        return 0.0;
    }
    power_kw * SECONDS_PER_MINUTE * WATTS_PER_KW / (rpm * 2.0 * PI)
}

/// Apply the power ceiling to a torque-curve value.
///
/// Returns the usable torque and whether the ceiling was hit. Torque is only
/// reduced when the curve value would exceed `peak_power_kw` at a running
/// engine speed.
#[inline]
pub fn power_limited_torque(curve_torque_nm: f64, rpm: f64, peak_power_kw: f64) -> (f64, bool) {
    if rpm > 0.0 && shaft_power_kw(curve_torque_nm, rpm) > peak_power_kw {
        (torque_for_power(peak_power_kw, rpm), true)
    } else {
        (curve_torque_nm, false)
    }
}

// =============================================================================
// RAIL FORCES
// =============================================================================

/// Tractive force generated at the rail by engine torque
///
/// # Formula
/// - F = 2·T·G·R / D
#[inline]
pub fn generated_tractive_force(
    torque_nm: f64,
    gear_ratio: f64,
    rear_axle_ratio: f64,
    wheel_diameter_m: f64,
) -> f64 {
    2.0 * torque_nm * gear_ratio * rear_axle_ratio / wheel_diameter_m
}

/// Largest force the wheel-rail contact transmits before slipping
///
/// # Formula
/// - F_adh = W·μ·1000·g
///
/// All axles are assumed driven with the full weight on them.
#[inline]
pub fn adhesion_limit(weight_ton: f64, friction_mu: f64) -> f64 {
    weight_ton * friction_mu * KG_PER_TONNE * GRAVITY
}
