//! # traction_core - Locomotive Traction & Performance Engine
//!
//! `traction_core` models the forces on a rail vehicle, interpolates its
//! engine torque curve, solves for the speed/traction balance under power and
//! adhesion limits, and sweeps that solver across gears and gradients to
//! produce performance curves and capability tables. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending field
//! - **Fail Fast**: Every input is validated before the first sweep
//!
//! ## Quick Start
//!
//! ```rust
//! use traction_core::calculations::{analyze, AnalysisInput, TrackInput};
//! use traction_core::settings::SimulationSettings;
//! use traction_core::torque_curve::TorqueCurve;
//! use traction_core::vehicle::{ShuntingScenario, VehicleConfig};
//!
//! let input = AnalysisInput {
//!     label: "Yard shunter".to_string(),
//!     vehicle: VehicleConfig {
//!         gross_weight_kg: 120_000.0,
//!         num_axles: 4,
//!         wheel_diameter_m: 1.25,
//!         rear_axle_ratio: 3.5,
//!         gear_ratios: vec![8.5, 6.2, 4.5],
//!         peak_power_kw: 2000.0,
//!         friction_mu: 0.35,
//!         min_rpm: 400.0,
//!         max_rpm: 2100.0,
//!         max_speed_kmh: None,
//!     },
//!     torque_curve: TorqueCurve::from_points([
//!         (400, 12_000.0),
//!         (1200, 18_000.0),
//!         (2100, 9_000.0),
//!     ])
//!     .unwrap(),
//!     track: TrackInput { max_slope: 2.0, ..TrackInput::default() },
//!     shunting: Some(ShuntingScenario::new(600.0)),
//!     settings: SimulationSettings::default(),
//! };
//!
//! let result = analyze(&input).unwrap();
//! assert_eq!(result.traction_snapshot.len(), 3);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("speed_vs_slope_table"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Solver, speed search and the performance sweeps
//! - [`equations`] - Resistance and drivetrain formulas, equation registry
//! - [`torque_curve`] - Engine torque curve and interpolation
//! - [`vehicle`] - Vehicle, track and trailing-load inputs
//! - [`settings`] - Sweep resolution and search strategy
//! - [`units`] - Type-safe unit wrappers and track-unit normalization
//! - [`constants`] - Physical constants and defaults
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod torque_curve;
pub mod units;
pub mod vehicle;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, AnalysisInput, PerformanceAnalysis};
pub use errors::{CalcError, CalcResult};
pub use settings::SimulationSettings;
pub use torque_curve::TorqueCurve;
pub use vehicle::{ShuntingScenario, TrackEnvelope, VehicleConfig};
