//! # Locomotive Performance Analysis
//!
//! The primary operation: validate everything, then run the snapshot, the
//! curve sweep and the speed-vs-slope table for one vehicle.
//!
//! ## Assumptions
//!
//! - All axles are driven and carry the full vehicle weight
//! - Trailing wagons share one empirical resistance polynomial
//! - With no shunting scenario the table is computed for the locomotive alone
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Yard shunter",
//!   "vehicle": {
//!     "gross_weight_kg": 120000.0,
//!     "num_axles": 4,
//!     "wheel_diameter_m": 1.25,
//!     "rear_axle_ratio": 3.5,
//!     "gear_ratios": [8.5],
//!     "peak_power_kw": 2000.0,
//!     "friction_mu": 0.35,
//!     "min_rpm": 400.0,
//!     "max_rpm": 2100.0
//!   },
//!   "torque_curve": { "400": 12000.0, "1200": 18000.0, "2100": 9000.0 },
//!   "track": { "max_slope": 2.0, "max_curve": 350.0, "curve_unit": "m" },
//!   "shunting": { "trailing_load_tonnes": 600.0 }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use traction_core::calculations::analysis::{analyze, AnalysisInput};
//!
//! let json = r#"{
//!   "label": "Yard shunter",
//!   "vehicle": {
//!     "gross_weight_kg": 120000.0, "num_axles": 4, "wheel_diameter_m": 1.25,
//!     "rear_axle_ratio": 3.5, "gear_ratios": [8.5], "peak_power_kw": 2000.0,
//!     "friction_mu": 0.35, "min_rpm": 400.0, "max_rpm": 2100.0
//!   },
//!   "torque_curve": { "400": 12000.0, "1200": 18000.0, "2100": 9000.0 },
//!   "track": { "max_slope": 1.0, "max_curve": 0.0 }
//! }"#;
//! let input: AnalysisInput = serde_json::from_str(json).unwrap();
//! let result = analyze(&input).unwrap();
//! assert_eq!(result.speed_vs_slope_table.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::curves::{generate_curves, PerformanceDataset};
use crate::calculations::shunting::{speed_vs_slope, SlopeSpeedRow};
use crate::calculations::snapshot::{traction_limit, traction_snapshot, GearSnapshot, TractionLimit};
use crate::calculations::solver::TractionSolver;
use crate::errors::CalcResult;
use crate::settings::SimulationSettings;
use crate::torque_curve::TorqueCurve;
use crate::units::{CurveUnit, SlopeUnit};
use crate::vehicle::{ShuntingScenario, TrackEnvelope, VehicleConfig};

/// Track limits as entered, before unit normalization
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackInput {
    /// Steepest gradient, in `slope_unit`
    pub max_slope: f64,

    #[serde(default)]
    pub slope_unit: SlopeUnit,

    /// Sharpest curve, in `curve_unit`; a radius of 0 means straight track
    pub max_curve: f64,

    #[serde(default)]
    pub curve_unit: CurveUnit,
}

impl TrackInput {
    /// Normalize to percent grade and curve degrees
    pub fn envelope(&self) -> CalcResult<TrackEnvelope> {
        TrackEnvelope::from_units(self.max_slope, self.slope_unit, self.max_curve, self.curve_unit)
    }
}

/// Everything one analysis run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// User label for this run
    #[serde(default)]
    pub label: String,

    pub vehicle: VehicleConfig,

    pub torque_curve: TorqueCurve,

    pub track: TrackInput,

    /// Trailing load for the speed-vs-slope table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shunting: Option<ShuntingScenario>,

    #[serde(default)]
    pub settings: SimulationSettings,
}

/// Results of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub label: String,

    /// Normalized track limits the sweeps used
    pub track: TrackEnvelope,

    /// Peak generated force against the adhesion limit
    pub traction_limit: TractionLimit,

    /// Top speeds per gear, in configured gear order
    pub traction_snapshot: Vec<GearSnapshot>,

    /// Achievable force per slope, gear and speed
    pub tractive_effort_curve: PerformanceDataset,

    /// Shuntable tonnes per slope, gear and speed
    pub shunting_capability_curve: PerformanceDataset,

    /// Highest sustainable speed per slope with the trailing load
    pub speed_vs_slope_table: Vec<SlopeSpeedRow>,
}

/// Run the full analysis.
///
/// All inputs are validated before the first sweep.
///
/// # Errors
///
/// - `DegenerateParameter` for a zero or negative divisor
/// - `OutOfRangeParameter` for values outside their physical range
/// - `InvalidCurve` for an unusable torque curve
/// - `OutOfRangeParameter` for a sweep too large to run
pub fn analyze(input: &AnalysisInput) -> CalcResult<PerformanceAnalysis> {
    let solver = TractionSolver::new(&input.vehicle, &input.torque_curve)?;
    let track = input.track.envelope()?;
    track.validate()?;
    let scenario = input.shunting.unwrap_or_default();
    scenario.validate()?;
    let settings = &input.settings;
    settings.validate()?;

    let gear_count = input.vehicle.gear_ratios.len();
    let evaluations = settings.check_budget(gear_count, track.max_slope_percent)?;
    info!(
        label = %input.label,
        gears = gear_count,
        max_slope_percent = track.max_slope_percent,
        max_curve_degree = track.max_curve_degree,
        estimated_evaluations = evaluations,
        "starting performance analysis"
    );

    let limit = traction_limit(&solver);
    let snapshot = traction_snapshot(&solver, &track, settings)?;
    let curves = generate_curves(&solver, &track, settings)?;
    let table = speed_vs_slope(&solver, &track, &scenario, settings)?;

    info!(
        label = %input.label,
        curve_rows = curves.tractive_effort.len(),
        table_rows = table.len(),
        limited_by_slip = limit.limited_by_slip,
        "performance analysis complete"
    );

    Ok(PerformanceAnalysis {
        label: input.label.clone(),
        track,
        traction_limit: limit,
        traction_snapshot: snapshot,
        tractive_effort_curve: curves.tractive_effort,
        shunting_capability_curve: curves.shunting_capability,
        speed_vs_slope_table: table,
    })
}
