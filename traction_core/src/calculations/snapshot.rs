//! # Traction Snapshot
//!
//! Per-gear top speeds for three reference conditions, plus the overall
//! traction-vs-slipping summary.
//!
//! ## Conditions
//!
//! | Condition | Slope | Curve |
//! |-----------|-------|-------|
//! | Level     | 0     | 0     |
//! | Slope     | max   | 0     |
//! | Curve     | 0     | max   |
//!
//! Each gear is searched over its own band, from the speed at minimum RPM to
//! the speed at maximum RPM, with the locomotive alone and running
//! resistance.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::grid::linspace;
use crate::calculations::solver::{OperatingPoint, ResistanceLoad, TractionSolver};
use crate::equations::drivetrain::generated_tractive_force;
use crate::equations::resistance::ResistanceMode;
use crate::errors::CalcResult;
use crate::settings::SimulationSettings;
use crate::vehicle::TrackEnvelope;

/// Top speeds of one gear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearSnapshot {
    pub gear_ratio: f64,
    /// On level, straight track (km/h)
    pub max_speed_level_kmh: f64,
    /// On the steepest slope, straight track (km/h)
    pub max_speed_slope_kmh: f64,
    /// On the sharpest curve, level track (km/h)
    pub max_speed_curve_kmh: f64,
}

/// Whether drivetrain torque or wheel slip caps the starting force
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TractionLimit {
    /// Force from peak curve torque in the highest gear (N)
    pub max_traction_generated_n: f64,
    /// Adhesion limit (N)
    pub max_traction_slipping_n: f64,
    /// The drivetrain can generate more than the rails transmit
    pub limited_by_slip: bool,
}

/// Compare peak generated force with the adhesion limit.
pub fn traction_limit(solver: &TractionSolver<'_>) -> TractionLimit {
    let vehicle = solver.vehicle();
    let generated = generated_tractive_force(
        solver.torque_curve().max_torque(),
        vehicle.highest_gear(),
        vehicle.rear_axle_ratio,
        vehicle.wheel_diameter_m,
    )
    .max(0.0);
    let slipping = solver.adhesion_n();
    TractionLimit {
        max_traction_generated_n: generated,
        max_traction_slipping_n: slipping,
        limited_by_slip: generated > slipping,
    }
}

/// Top speeds per gear, in configured gear order.
pub fn traction_snapshot(
    solver: &TractionSolver<'_>,
    track: &TrackEnvelope,
    settings: &SimulationSettings,
) -> CalcResult<Vec<GearSnapshot>> {
    let vehicle = solver.vehicle();
    let load = ResistanceLoad::locomotive_only(ResistanceMode::Running);

    vehicle
        .gear_ratios
        .iter()
        .map(|&gear| -> CalcResult<GearSnapshot> {
            let grid = linspace(
                solver.speed_at_rpm(vehicle.min_rpm, gear),
                solver.speed_at_rpm(vehicle.max_rpm, gear),
                settings.speed_samples,
            );
            let top_speed = |slope: f64, curve: f64| -> CalcResult<f64> {
                let base = OperatingPoint::new(0.0, gear, slope, curve);
                let outcome = settings.search.max_sustainable_speed(&grid, |speed| {
                    solver.evaluate(&base.at_speed(speed), &load)
                })?;
                Ok(outcome.max_speed_kmh)
            };

            let snapshot = GearSnapshot {
                gear_ratio: gear,
                max_speed_level_kmh: top_speed(0.0, 0.0)?,
                max_speed_slope_kmh: top_speed(track.max_slope_percent, 0.0)?,
                max_speed_curve_kmh: top_speed(0.0, track.max_curve_degree)?,
            };
            if snapshot.max_speed_level_kmh == 0.0 {
                warn!(gear, "gear cannot hold any speed on level track");
            }
            debug!(
                gear,
                level = snapshot.max_speed_level_kmh,
                slope = snapshot.max_speed_slope_kmh,
                curve = snapshot.max_speed_curve_kmh,
                "gear snapshot"
            );
            Ok(snapshot)
        })
        .collect()
}
