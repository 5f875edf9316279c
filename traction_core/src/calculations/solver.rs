//! # Traction Equilibrium Solver
//!
//! The kernel of every sweep: for one operating point (speed, gear, slope,
//! curve) it works out what the drivetrain can deliver at the rail and what
//! the train resists with.
//!
//! ## Method
//!
//! 1. Vehicle speed → wheel RPM → engine RPM through gear and rear-axle ratio
//! 2. Torque interpolated from the engine curve at that RPM
//! 3. Torque capped so shaft power never exceeds peak power
//! 4. Generated force `F = 2·T·G·R / D`
//! 5. Adhesion limit `F_adh = W·μ·1000·g`
//! 6. Achievable force `min(F, F_adh)`
//! 7. Resistance of the locomotive (plus any trailing load) for the mode
//!
//! ## Example
//!
//! ```rust
//! use traction_core::calculations::solver::{OperatingPoint, ResistanceLoad, TractionSolver};
//! use traction_core::equations::resistance::ResistanceMode;
//! use traction_core::torque_curve::TorqueCurve;
//! use traction_core::vehicle::VehicleConfig;
//!
//! let vehicle = VehicleConfig {
//!     gross_weight_kg: 120_000.0,
//!     num_axles: 4,
//!     wheel_diameter_m: 1.25,
//!     rear_axle_ratio: 3.5,
//!     gear_ratios: vec![8.5],
//!     peak_power_kw: 2000.0,
//!     friction_mu: 0.35,
//!     min_rpm: 400.0,
//!     max_rpm: 2100.0,
//!     max_speed_kmh: None,
//! };
//! let curve =
//!     TorqueCurve::from_points([(400, 12_000.0), (1200, 18_000.0), (2100, 9_000.0)]).unwrap();
//!
//! let solver = TractionSolver::new(&vehicle, &curve).unwrap();
//! let point = solver
//!     .evaluate(
//!         &OperatingPoint::new(0.0, 8.5, 0.0, 0.0),
//!         &ResistanceLoad::locomotive_only(ResistanceMode::Running),
//!     )
//!     .unwrap();
//! assert!(point.achievable_n <= point.adhesion_n);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::drivetrain::{
    adhesion_limit, engine_rpm, generated_tractive_force, power_limited_torque, speed_at_engine_rpm,
};
use crate::equations::resistance::{locomotive_resistance, wagon_resistance, ResistanceMode};
use crate::errors::{CalcError, CalcResult};
use crate::torque_curve::TorqueCurve;
use crate::vehicle::{validate_gear_ratio, VehicleConfig};

/// Where on the track and in which gear the train is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Vehicle speed (km/h)
    pub speed_kmh: f64,
    /// Transmission gear ratio in use
    pub gear_ratio: f64,
    /// Gradient (percent grade)
    pub slope_percent: f64,
    /// Curve severity (degrees)
    pub curve_degree: f64,
}

impl OperatingPoint {
    pub fn new(speed_kmh: f64, gear_ratio: f64, slope_percent: f64, curve_degree: f64) -> Self {
        OperatingPoint {
            speed_kmh,
            gear_ratio,
            slope_percent,
            curve_degree,
        }
    }

    /// Same point at another speed
    pub fn at_speed(self, speed_kmh: f64) -> Self {
        OperatingPoint { speed_kmh, ..self }
    }
}

/// The body opposing motion: the locomotive, plus an optional trailing load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceLoad {
    /// Wagon load behind the locomotive (tonnes)
    pub trailing_tonnes: f64,
    /// Running or start-from-rest resistance
    pub mode: ResistanceMode,
}

impl ResistanceLoad {
    pub fn locomotive_only(mode: ResistanceMode) -> Self {
        ResistanceLoad {
            trailing_tonnes: 0.0,
            mode,
        }
    }

    pub fn with_trailing(trailing_tonnes: f64, mode: ResistanceMode) -> Self {
        ResistanceLoad { trailing_tonnes, mode }
    }
}

/// Forces at one operating point.
///
/// Produced fresh by every [`TractionSolver::evaluate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    /// The evaluated operating point
    pub point: OperatingPoint,
    /// Engine speed at this vehicle speed and gear (RPM)
    pub engine_rpm: f64,
    /// Torque used after power limiting (N·m)
    pub torque_nm: f64,
    /// Whether the power ceiling reduced the curve torque
    pub power_limited: bool,
    /// Force the drivetrain generates at the rail (N)
    pub generated_n: f64,
    /// Largest force the wheel-rail contact transmits (N)
    pub adhesion_n: f64,
    /// `min(generated, adhesion)` (N)
    pub achievable_n: f64,
    /// Resistance of the locomotive body (N)
    pub locomotive_resistance_n: f64,
    /// Resistance of the trailing load (N)
    pub trailing_resistance_n: f64,
    /// Total resistance (N)
    pub resistance_n: f64,
}

impl EquilibriumPoint {
    /// The train can hold this speed
    pub fn is_sustainable(&self) -> bool {
        self.achievable_n >= self.resistance_n
    }

    /// Achievable force left over after resistance (N), negative when short
    pub fn surplus_n(&self) -> f64 {
        self.achievable_n - self.resistance_n
    }

    /// Whether wheel slip, rather than the drivetrain, caps the force
    pub fn adhesion_limited(&self) -> bool {
        self.generated_n > self.adhesion_n
    }
}

/// Evaluates operating points for one validated vehicle and torque curve.
#[derive(Debug, Clone)]
pub struct TractionSolver<'a> {
    vehicle: &'a VehicleConfig,
    torque_curve: &'a TorqueCurve,
    weight_tonnes: f64,
    adhesion_n: f64,
}

impl<'a> TractionSolver<'a> {
    /// Validate the vehicle and build a solver around it.
    pub fn new(vehicle: &'a VehicleConfig, torque_curve: &'a TorqueCurve) -> CalcResult<Self> {
        vehicle.validate()?;
        if torque_curve.is_empty() {
            return Err(CalcError::invalid_curve("Torque curve must contain at least one point"));
        }
        let weight_tonnes = vehicle.weight_tonnes();
        Ok(TractionSolver {
            vehicle,
            torque_curve,
            weight_tonnes,
            adhesion_n: adhesion_limit(weight_tonnes, vehicle.friction_mu),
        })
    }

    pub fn vehicle(&self) -> &VehicleConfig {
        self.vehicle
    }

    pub fn torque_curve(&self) -> &TorqueCurve {
        self.torque_curve
    }

    /// Adhesion limit of the vehicle (N)
    pub fn adhesion_n(&self) -> f64 {
        self.adhesion_n
    }

    /// Vehicle speed at an engine speed in a gear (km/h)
    pub fn speed_at_rpm(&self, rpm: f64, gear_ratio: f64) -> f64 {
        speed_at_engine_rpm(
            rpm,
            self.vehicle.wheel_diameter_m,
            gear_ratio,
            self.vehicle.rear_axle_ratio,
        )
    }

    /// Solve the forces at one operating point.
    ///
    /// # Errors
    ///
    /// `DegenerateParameter` if the point's gear ratio is not positive.
    pub fn evaluate(
        &self,
        point: &OperatingPoint,
        load: &ResistanceLoad,
    ) -> CalcResult<EquilibriumPoint> {
        validate_gear_ratio(point.gear_ratio, "gear_ratio")?;
        let v = self.vehicle;

        let rpm = engine_rpm(
            point.speed_kmh,
            v.wheel_diameter_m,
            point.gear_ratio,
            v.rear_axle_ratio,
        );
        let curve_torque = self.torque_curve.torque_at(rpm)?;
        let (torque_nm, power_limited) = power_limited_torque(curve_torque, rpm, v.peak_power_kw);

        let generated_n = generated_tractive_force(
            torque_nm,
            point.gear_ratio,
            v.rear_axle_ratio,
            v.wheel_diameter_m,
        );
        let achievable_n = generated_n.min(self.adhesion_n);

        let locomotive_resistance_n = locomotive_resistance(
            point.speed_kmh,
            self.weight_tonnes,
            v.num_axles,
            point.slope_percent,
            point.curve_degree,
            load.mode,
        );
        let trailing_resistance_n = wagon_resistance(
            point.speed_kmh,
            load.trailing_tonnes,
            point.slope_percent,
            point.curve_degree,
            load.mode,
        );

        Ok(EquilibriumPoint {
            point: *point,
            engine_rpm: rpm,
            torque_nm,
            power_limited,
            generated_n,
            adhesion_n: self.adhesion_n,
            achievable_n,
            locomotive_resistance_n,
            trailing_resistance_n,
            resistance_n: locomotive_resistance_n + trailing_resistance_n,
        })
    }
}
