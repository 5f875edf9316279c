//! # Physical Constants and Defaults
//!
//! Every empirical coefficient and default used by the resistance model,
//! the drivetrain conversions and the sweeps lives here, so recalibrating
//! against field data never touches solver logic.
//!
//! Coefficients follow railway practice: resistance polynomials take speed
//! in km/h and weight in metric tonnes and yield kgf per tonne, which is
//! multiplied by `GRAVITY` to give Newtons.

// ============================================================================
// Fundamental
// ============================================================================

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Kilograms per metric tonne
pub const KG_PER_TONNE: f64 = 1000.0;

/// km/h per m/s
pub const KMH_PER_MPS: f64 = 3.6;

/// Seconds per minute, for RPM conversions
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Watts per kilowatt
pub const WATTS_PER_KW: f64 = 1000.0;

// ============================================================================
// Locomotive Rolling Resistance: (A + B·v + C·v²)·W·g
// ============================================================================

/// Constant part of A; the axle-load term is added per vehicle
pub const LOCO_ROLLING_A_BASE: f64 = 0.647;

/// Axle-load part of A: `LOCO_ROLLING_A_AXLE / (W / axles)`
pub const LOCO_ROLLING_A_AXLE: f64 = 13.17;

/// Speed coefficient B
pub const LOCO_ROLLING_B: f64 = 0.00933;

/// Speed-squared numerator: C = `LOCO_ROLLING_C_NUM / W`
pub const LOCO_ROLLING_C_NUM: f64 = 0.057;

// ============================================================================
// Wagon Rolling Resistance: (A + B·v + C·v²)·W·g
// ============================================================================

pub const WAGON_ROLLING_A: f64 = 0.6438797;
pub const WAGON_ROLLING_B: f64 = 0.01047218;
pub const WAGON_ROLLING_C: f64 = 0.00007323;

// ============================================================================
// Track Geometry and Starting
// ============================================================================

/// Curvature resistance per tonne per curve degree (kgf/t/°)
pub const CURVATURE_COEFFICIENT: f64 = 0.4;

/// Empirical radius-to-degree relation: degree ≈ 1750 / radius_m
pub const CURVE_DEGREE_RADIUS_CONSTANT: f64 = 1750.0;

/// Locomotive breakaway resistance (kgf/t)
pub const LOCO_STARTING_COEFFICIENT: f64 = 6.0;

/// Wagon breakaway resistance (kgf/t)
pub const WAGON_STARTING_COEFFICIENT: f64 = 4.0;

/// Trailing load used to express shunting capacity per tonne
pub const WAGON_PROBE_TONNES: f64 = 1.0;

// ============================================================================
// Vehicle Defaults
// ============================================================================

/// Wheel-rail adhesion coefficient when none is supplied
pub const DEFAULT_FRICTION_MU: f64 = 0.3;

/// Minimum engine speed when none is supplied (RPM)
pub const DEFAULT_MIN_RPM: f64 = 100.0;

/// Maximum engine speed when none is supplied (RPM)
pub const DEFAULT_MAX_RPM: f64 = 2500.0;

// ============================================================================
// Sweep Resolution Defaults
// ============================================================================

/// Slope increment between sweep rows (percent grade)
pub const DEFAULT_SLOPE_STEP_PERCENT: f64 = 0.5;

/// Speed samples per gear/slope combination
pub const DEFAULT_SPEED_SAMPLES: usize = 100;

/// Convergence width for the bisection search (km/h)
pub const DEFAULT_BISECTION_TOLERANCE_KMH: f64 = 0.01;

/// Iteration cap for the bisection search
pub const DEFAULT_BISECTION_MAX_ITERATIONS: u32 = 40;

// ============================================================================
// Input Limits
// ============================================================================

/// Slopes entered in degrees must stay below vertical
pub const MAX_SLOPE_DEGREE: f64 = 90.0;

/// Upper bound on speed samples per sweep
pub const MAX_SPEED_SAMPLES: usize = 100_000;

/// Upper bound on solver evaluations for one analysis
pub const MAX_SWEEP_EVALUATIONS: usize = 2_000_000;
