//! # Shunting Speed vs Slope
//!
//! For a fixed trailing load, the highest speed the locomotive can hold at
//! each slope row. Uses the highest gear ratio (most torque at the rail) and
//! running resistance only: the table describes sustained motion, not
//! breakaway.
//!
//! The speed grid spans from the speed at minimum RPM in the highest gear to
//! the speed at maximum RPM in the lowest gear, so multi-gear vehicles are
//! probed over their whole operating band.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::grid::linspace;
use crate::calculations::solver::{OperatingPoint, ResistanceLoad, TractionSolver};
use crate::equations::resistance::ResistanceMode;
use crate::errors::CalcResult;
use crate::settings::SimulationSettings;
use crate::vehicle::{ShuntingScenario, TrackEnvelope};

/// One row of the speed-vs-slope table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeSpeedRow {
    pub slope_percent: f64,
    /// Highest sustainable speed (km/h), 0 when the load cannot be moved
    pub max_speed_kmh: f64,
}

/// Speed samples searched by the table
pub fn shunting_speed_grid(solver: &TractionSolver<'_>, samples: usize) -> Vec<f64> {
    let vehicle = solver.vehicle();
    let slowest = solver.speed_at_rpm(vehicle.min_rpm, vehicle.highest_gear());
    let fastest = solver.speed_at_rpm(vehicle.max_rpm, vehicle.lowest_gear());
    linspace(slowest, fastest, samples)
}

/// Build the speed-vs-slope table for a trailing load.
///
/// Rows are in ascending slope order and, under the linear scan, the speeds
/// are non-increasing.
pub fn speed_vs_slope(
    solver: &TractionSolver<'_>,
    track: &TrackEnvelope,
    scenario: &ShuntingScenario,
    settings: &SimulationSettings,
) -> CalcResult<Vec<SlopeSpeedRow>> {
    scenario.validate()?;
    let gear = solver.vehicle().highest_gear();
    let load =
        ResistanceLoad::with_trailing(scenario.trailing_load_tonnes, ResistanceMode::Running);
    let grid = shunting_speed_grid(solver, settings.speed_samples);

    let mut rows = Vec::new();
    for slope in settings.slope_rows(track.max_slope_percent) {
        let base = OperatingPoint::new(0.0, gear, slope, track.max_curve_degree);
        let outcome = settings
            .search
            .max_sustainable_speed(&grid, |speed| solver.evaluate(&base.at_speed(speed), &load))?;

        if outcome.max_speed_kmh == 0.0 {
            warn!(
                slope,
                trailing_tonnes = scenario.trailing_load_tonnes,
                "no sustainable speed for shunting load"
            );
        } else {
            debug!(slope, max_speed_kmh = outcome.max_speed_kmh, "shunting row");
        }
        rows.push(SlopeSpeedRow {
            slope_percent: slope,
            max_speed_kmh: outcome.max_speed_kmh,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::search::SpeedSearch;
    use crate::torque_curve::TorqueCurve;
    use crate::vehicle::tests::reference_vehicle;
    use crate::vehicle::VehicleConfig;

    fn reference_curve() -> TorqueCurve {
        TorqueCurve::from_points([(400, 12_000.0), (1200, 18_000.0), (2100, 9_000.0)]).unwrap()
    }

    fn multi_gear_vehicle() -> VehicleConfig {
        VehicleConfig {
            gear_ratios: vec![8.5, 6.2, 4.5],
            ..reference_vehicle()
        }
    }

    #[test]
    fn test_grid_spans_operating_band() {
        let vehicle = multi_gear_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let grid = shunting_speed_grid(&solver, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], solver.speed_at_rpm(400.0, 8.5));
        assert_eq!(grid[99], solver.speed_at_rpm(2100.0, 4.5));
    }

    #[test]
    fn test_speed_non_increasing_with_slope() {
        let vehicle = multi_gear_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let rows = speed_vs_slope(
            &solver,
            &TrackEnvelope::new(10.0, 2.0),
            &ShuntingScenario::new(800.0),
            &SimulationSettings::default(),
        )
        .unwrap();

        assert_eq!(rows.len(), 21);
        assert_eq!(rows[0].slope_percent, 0.0);
        assert_eq!(rows[20].slope_percent, 10.0);
        for pair in rows.windows(2) {
            assert!(pair[1].max_speed_kmh <= pair[0].max_speed_kmh);
        }
        assert!(rows[0].max_speed_kmh > 0.0);
    }

    #[test]
    fn test_immovable_load_gives_zero() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let rows = speed_vs_slope(
            &solver,
            &TrackEnvelope::new(2.0, 0.0),
            &ShuntingScenario::new(100_000.0),
            &SimulationSettings::default(),
        )
        .unwrap();
        assert!(rows.iter().all(|row| row.max_speed_kmh == 0.0));
    }

    #[test]
    fn test_bisection_never_below_linear_scan() {
        let vehicle = multi_gear_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let track = TrackEnvelope::new(3.0, 0.0);
        let scenario = ShuntingScenario::new(1500.0);

        let linear =
            speed_vs_slope(&solver, &track, &scenario, &SimulationSettings::default()).unwrap();
        let refined = speed_vs_slope(
            &solver,
            &track,
            &scenario,
            &SimulationSettings {
                search: SpeedSearch::bisection(),
                ..SimulationSettings::default()
            },
        )
        .unwrap();

        let step = {
            let grid = shunting_speed_grid(&solver, 100);
            grid[1] - grid[0]
        };
        for pair in refined.windows(2) {
            assert!(pair[1].max_speed_kmh <= pair[0].max_speed_kmh);
        }
        for (l, r) in linear.iter().zip(&refined) {
            assert_eq!(l.slope_percent, r.slope_percent);
            assert!(r.max_speed_kmh >= l.max_speed_kmh);
            assert!(r.max_speed_kmh <= l.max_speed_kmh + step);
        }
    }

    #[test]
    fn test_negative_trailing_load_rejected() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let err = speed_vs_slope(
            &solver,
            &TrackEnvelope::new(1.0, 0.0),
            &ShuntingScenario::new(-1.0),
            &SimulationSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("trailing_load_tonnes"));
    }
}
