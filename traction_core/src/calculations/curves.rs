//! # Performance Curves
//!
//! Sweeps slope, gear and speed to build the tractive-effort and
//! shunting-capability datasets used for plotting.
//!
//! Each gear is swept from standstill to the speed reached at maximum engine
//! RPM. Resistance includes the breakaway term, since these curves describe
//! what the locomotive can start and accelerate, not just hold.
//!
//! Shunting capability expresses the force left after locomotive resistance
//! in tonnes of wagon load, using the resistance of a 1-tonne probe wagon as
//! the per-tonne divisor. It is never negative.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::grid::linspace;
use crate::calculations::solver::{OperatingPoint, ResistanceLoad, TractionSolver};
use crate::constants::WAGON_PROBE_TONNES;
use crate::equations::resistance::{wagon_resistance, ResistanceMode};
use crate::errors::CalcResult;
use crate::settings::SimulationSettings;
use crate::vehicle::TrackEnvelope;

/// What a dataset's `value` column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Achievable force at the rail (N)
    TractiveEffort,
    /// Shuntable wagon load (t)
    ShuntingCapability,
}

/// One sampled row of a performance dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub slope_percent: f64,
    pub gear_ratio: f64,
    pub speed_kmh: f64,
    /// Achievable tractive force (N)
    pub traction_n: f64,
    /// Locomotive resistance including breakaway (N)
    pub resistance_n: f64,
    /// Tractive effort (N) or shunting capacity (t), per the dataset kind
    pub value: f64,
}

/// Flat, ordered dataset: by slope, then gear in configured order, then speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceDataset {
    pub kind: DatasetKind,
    pub rows: Vec<CurvePoint>,
}

impl PerformanceDataset {
    pub fn new(kind: DatasetKind) -> Self {
        PerformanceDataset { kind, rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one slope and gear, in speed order
    pub fn series(
        &self,
        slope_percent: f64,
        gear_ratio: f64,
    ) -> impl Iterator<Item = &CurvePoint> + '_ {
        self.rows
            .iter()
            .filter(move |row| row.slope_percent == slope_percent && row.gear_ratio == gear_ratio)
    }
}

/// Both datasets from one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceCurves {
    pub tractive_effort: PerformanceDataset,
    pub shunting_capability: PerformanceDataset,
}

/// Shuntable tonnes for the force left over after locomotive resistance.
///
/// Returns 0 when nothing is left or the probe resistance is not positive.
pub fn shunting_capacity_tonnes(remaining_n: f64, probe_resistance_n: f64) -> f64 {
    if remaining_n > 0.0 && probe_resistance_n > 0.0 {
        remaining_n / probe_resistance_n
    } else {
        0.0
    }
}

/// Sweep every slope row and gear, evaluating each speed sample once.
pub fn generate_curves(
    solver: &TractionSolver<'_>,
    track: &TrackEnvelope,
    settings: &SimulationSettings,
) -> CalcResult<PerformanceCurves> {
    let vehicle = solver.vehicle();
    let load = ResistanceLoad::locomotive_only(ResistanceMode::Starting);

    let mut tractive_effort = PerformanceDataset::new(DatasetKind::TractiveEffort);
    let mut shunting_capability = PerformanceDataset::new(DatasetKind::ShuntingCapability);

    for slope in settings.slope_rows(track.max_slope_percent) {
        for &gear in &vehicle.gear_ratios {
            let top_speed = solver.speed_at_rpm(vehicle.max_rpm, gear);
            debug!(slope, gear, top_speed, "sweeping curve");

            for speed in linspace(0.0, top_speed, settings.speed_samples) {
                let point = OperatingPoint::new(speed, gear, slope, track.max_curve_degree);
                let eq = solver.evaluate(&point, &load)?;

                let probe = wagon_resistance(
                    speed,
                    WAGON_PROBE_TONNES,
                    slope,
                    track.max_curve_degree,
                    ResistanceMode::Starting,
                );
                let row = CurvePoint {
                    slope_percent: slope,
                    gear_ratio: gear,
                    speed_kmh: speed,
                    traction_n: eq.achievable_n,
                    resistance_n: eq.resistance_n,
                    value: eq.achievable_n,
                };
                tractive_effort.rows.push(row);
                shunting_capability.rows.push(CurvePoint {
                    value: shunting_capacity_tonnes(eq.surplus_n(), probe),
                    ..row
                });
            }
        }
    }

    Ok(PerformanceCurves {
        tractive_effort,
        shunting_capability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::resistance::locomotive_resistance;
    use crate::torque_curve::TorqueCurve;
    use crate::vehicle::tests::reference_vehicle;
    use approx::assert_relative_eq;

    fn reference_curve() -> TorqueCurve {
        TorqueCurve::from_points([(400, 12_000.0), (1200, 18_000.0), (2100, 9_000.0)]).unwrap()
    }

    #[test]
    fn test_level_track_first_sample_is_adhesion_capped() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let track = TrackEnvelope::new(0.0, 0.0);
        let curves = generate_curves(&solver, &track, &SimulationSettings::default()).unwrap();

        let adhesion = 120.0 * 0.35 * 1000.0 * 9.81;
        let te = &curves.tractive_effort;
        assert_eq!(te.len(), 100);
        assert_eq!(te.rows[0].speed_kmh, 0.0);
        assert_relative_eq!(te.rows[0].value, adhesion, epsilon = 1e-6);

        // Second sample: the RPM of the lowest nonzero speed is below the
        // curve, so torque clamps to the 400 RPM point (12 kN·m)
        let second = &te.rows[1];
        let rpm = 29.75 * (second.speed_kmh / 3.6) / (std::f64::consts::PI * 1.25) * 60.0;
        assert!(rpm > 0.0 && rpm < 400.0);
        let generated: f64 = 2.0 * 12_000.0 * 8.5 * 3.5 / 1.25;
        assert_relative_eq!(generated, 571_200.0, epsilon = 1e-6);
        assert_relative_eq!(second.value, generated.min(adhesion), epsilon = 1e-6);
        assert_relative_eq!(second.value, adhesion, epsilon = 1e-6);

        let top = te.rows.last().unwrap();
        assert_relative_eq!(top.speed_kmh, solver.speed_at_rpm(2100.0, 8.5), epsilon = 1e-9);
    }

    #[test]
    fn test_rows_ordered_by_slope_gear_speed() {
        let mut vehicle = reference_vehicle();
        vehicle.gear_ratios = vec![8.5, 4.5];
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let settings = SimulationSettings {
            speed_samples: 10,
            ..SimulationSettings::default()
        };
        let curves = generate_curves(&solver, &TrackEnvelope::new(1.0, 0.0), &settings).unwrap();

        let rows = &curves.tractive_effort.rows;
        assert_eq!(rows.len(), 3 * 2 * 10);
        assert_eq!(rows[0].slope_percent, 0.0);
        assert_eq!(rows[0].gear_ratio, 8.5);
        assert_eq!(rows[10].gear_ratio, 4.5);
        assert_eq!(rows[20].slope_percent, 0.5);
        assert_eq!(rows[59].slope_percent, 1.0);
        assert_eq!(curves.tractive_effort.series(0.5, 4.5).count(), 10);
        for pair in rows[0..10].windows(2) {
            assert!(pair[0].speed_kmh < pair[1].speed_kmh);
        }
    }

    #[test]
    fn test_shunting_capacity_never_negative() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        // Past 35 % the gradient alone exceeds the adhesion limit
        let track = TrackEnvelope::new(40.0, 5.0);
        let curves = generate_curves(&solver, &track, &SimulationSettings::default()).unwrap();

        let shunting = &curves.shunting_capability;
        assert_eq!(shunting.kind, DatasetKind::ShuntingCapability);
        assert!(shunting.rows.iter().all(|row| row.value >= 0.0));
        assert!(shunting.rows.iter().any(|row| row.value == 0.0));
        for row in &shunting.rows {
            if row.traction_n <= row.resistance_n {
                assert_eq!(row.value, 0.0);
            }
        }
    }

    #[test]
    fn test_shunting_uses_one_tonne_probe() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let track = TrackEnvelope::new(0.0, 0.0);
        let curves = generate_curves(&solver, &track, &SimulationSettings::default()).unwrap();

        let row = curves.shunting_capability.rows[0];
        let loco = locomotive_resistance(0.0, 120.0, 4, 0.0, 0.0, ResistanceMode::Starting);
        let probe = wagon_resistance(0.0, 1.0, 0.0, 0.0, ResistanceMode::Starting);
        assert_relative_eq!(row.resistance_n, loco, epsilon = 1e-9);
        assert_relative_eq!(row.value, (row.traction_n - loco) / probe, epsilon = 1e-9);
        assert!(row.value > 0.0);
    }

    #[test]
    fn test_capacity_helper() {
        assert_eq!(shunting_capacity_tonnes(-5.0, 10.0), 0.0);
        assert_eq!(shunting_capacity_tonnes(0.0, 10.0), 0.0);
        assert_eq!(shunting_capacity_tonnes(100.0, 0.0), 0.0);
        assert_eq!(shunting_capacity_tonnes(100.0, 20.0), 5.0);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let vehicle = reference_vehicle();
        let curve = reference_curve();
        let solver = TractionSolver::new(&vehicle, &curve).unwrap();
        let track = TrackEnvelope::new(2.0, 3.0);
        let settings = SimulationSettings::default();
        let a = generate_curves(&solver, &track, &settings).unwrap();
        let b = generate_curves(&solver, &track, &settings).unwrap();
        assert_eq!(a, b);
    }
}
