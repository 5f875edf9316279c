//! # Traction Calculations
//!
//! The solver and the sweeps built on it. The primary entry point follows
//! the pattern:
//!
//! - [`AnalysisInput`] - Input parameters (JSON-serializable)
//! - [`PerformanceAnalysis`] - Results (JSON-serializable)
//! - [`analyze`] - Pure calculation function returning `CalcResult`
//!
//! ## Modules
//!
//! - [`solver`] - Forces at one operating point
//! - [`search`] - Highest sustainable speed on a sample grid
//! - [`curves`] - Tractive-effort and shunting-capability datasets
//! - [`shunting`] - Speed vs slope for a trailing load
//! - [`snapshot`] - Per-gear top speeds and the traction limit
//! - [`analysis`] - Runs all of the above for one vehicle
//!
//! Every operation is a deterministic function of its arguments; nothing is
//! cached between calls.

pub mod analysis;
pub mod curves;
pub mod grid;
pub mod search;
pub mod shunting;
pub mod snapshot;
pub mod solver;

// Re-export commonly used types
pub use analysis::{analyze, AnalysisInput, PerformanceAnalysis, TrackInput};
pub use curves::{CurvePoint, DatasetKind, PerformanceDataset};
pub use search::SpeedSearch;
pub use shunting::SlopeSpeedRow;
pub use snapshot::{GearSnapshot, TractionLimit};
pub use solver::{EquilibriumPoint, OperatingPoint, ResistanceLoad, TractionSolver};
