//! # Vehicle, Track and Load Inputs
//!
//! The value objects a simulation run is built from. All are immutable for
//! the duration of a call and validated before any sweep begins.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "gross_weight_kg": 120000.0,
//!   "num_axles": 4,
//!   "wheel_diameter_m": 1.25,
//!   "rear_axle_ratio": 3.5,
//!   "gear_ratios": [8.5, 6.2, 4.5],
//!   "peak_power_kw": 2000.0,
//!   "friction_mu": 0.35,
//!   "min_rpm": 400.0,
//!   "max_rpm": 2100.0
//! }
//! ```
//!
//! `gear_ratios` also accepts form-style text such as `"8.5, 6.2, 4.5"`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_FRICTION_MU, DEFAULT_MAX_RPM, DEFAULT_MIN_RPM};
use crate::errors::{CalcError, CalcResult};
use crate::units::{CurveUnit, Kilograms, SlopeUnit, Tonnes};

/// Locomotive parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Gross vehicle weight in kilograms
    pub gross_weight_kg: f64,

    /// Number of powered axles
    pub num_axles: u32,

    /// Driving wheel diameter in metres
    pub wheel_diameter_m: f64,

    /// Final-drive ratio
    pub rear_axle_ratio: f64,

    /// Transmission gear ratios; the highest ratio gives the most torque at the rail
    #[serde(deserialize_with = "deserialize_gear_ratios")]
    pub gear_ratios: Vec<f64>,

    /// Peak engine power in kW
    pub peak_power_kw: f64,

    /// Wheel-rail friction coefficient μ, 0 < μ ≤ 1
    #[serde(default = "default_friction_mu")]
    pub friction_mu: f64,

    /// Lowest usable engine speed (RPM)
    #[serde(default = "default_min_rpm")]
    pub min_rpm: f64,

    /// Highest usable engine speed (RPM)
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f64,

    /// Design top speed in km/h, carried through for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed_kmh: Option<f64>,
}

fn default_friction_mu() -> f64 {
    DEFAULT_FRICTION_MU
}

fn default_min_rpm() -> f64 {
    DEFAULT_MIN_RPM
}

fn default_max_rpm() -> f64 {
    DEFAULT_MAX_RPM
}

impl VehicleConfig {
    /// Validate every field before a simulation starts.
    ///
    /// Divisors are checked first and reported as `DegenerateParameter`;
    /// range violations follow as `OutOfRangeParameter`.
    pub fn validate(&self) -> CalcResult<()> {
        self.validate_divisors()?;
        self.validate_ranges()
    }

    fn validate_divisors(&self) -> CalcResult<()> {
        if !is_positive(self.wheel_diameter_m) {
            return Err(CalcError::degenerate_parameter(
                "wheel_diameter_m",
                self.wheel_diameter_m.to_string(),
                "Wheel diameter must be positive",
            ));
        }
        if !is_positive(self.rear_axle_ratio) {
            return Err(CalcError::degenerate_parameter(
                "rear_axle_ratio",
                self.rear_axle_ratio.to_string(),
                "Rear-axle ratio must be positive",
            ));
        }
        if self.gear_ratios.is_empty() {
            return Err(CalcError::degenerate_parameter(
                "gear_ratios",
                "[]",
                "At least one gear ratio is required",
            ));
        }
        for (i, &ratio) in self.gear_ratios.iter().enumerate() {
            validate_gear_ratio(ratio, &format!("gear_ratios[{}]", i))?;
        }
        Ok(())
    }

    fn validate_ranges(&self) -> CalcResult<()> {
        if !is_positive(self.gross_weight_kg) {
            return Err(CalcError::out_of_range(
                "gross_weight_kg",
                self.gross_weight_kg.to_string(),
                "Gross weight must be positive",
            ));
        }
        if self.num_axles == 0 {
            return Err(CalcError::out_of_range(
                "num_axles",
                "0",
                "At least one powered axle is required",
            ));
        }
        if !is_positive(self.peak_power_kw) {
            return Err(CalcError::out_of_range(
                "peak_power_kw",
                self.peak_power_kw.to_string(),
                "Peak power must be positive",
            ));
        }
        if !(self.friction_mu > 0.0 && self.friction_mu <= 1.0) {
            return Err(CalcError::out_of_range(
                "friction_mu",
                self.friction_mu.to_string(),
                "Friction coefficient must be in (0, 1]",
            ));
        }
        if !is_positive(self.min_rpm) {
            return Err(CalcError::out_of_range(
                "min_rpm",
                self.min_rpm.to_string(),
                "Minimum RPM must be positive",
            ));
        }
        if !is_positive(self.max_rpm) {
            return Err(CalcError::out_of_range(
                "max_rpm",
                self.max_rpm.to_string(),
                "Maximum RPM must be positive",
            ));
        }
        if self.min_rpm > self.max_rpm {
            return Err(CalcError::out_of_range(
                "min_rpm",
                self.min_rpm.to_string(),
                format!("Minimum RPM exceeds maximum RPM ({})", self.max_rpm),
            ));
        }
        if let Some(speed) = self.max_speed_kmh {
            if !is_positive(speed) {
                return Err(CalcError::out_of_range(
                    "max_speed_kmh",
                    speed.to_string(),
                    "Design top speed must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Gross weight in metric tonnes
    pub fn weight_tonnes(&self) -> f64 {
        Tonnes::from(Kilograms(self.gross_weight_kg)).0
    }

    /// Numerically largest gear ratio (most torque, lowest top speed)
    pub fn highest_gear(&self) -> f64 {
        self.gear_ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Numerically smallest gear ratio (least torque, highest top speed)
    pub fn lowest_gear(&self) -> f64 {
        self.gear_ratios.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// Check a single gear ratio used as a divisor.
pub(crate) fn validate_gear_ratio(ratio: f64, field: &str) -> CalcResult<()> {
    if !is_positive(ratio) {
        return Err(CalcError::degenerate_parameter(
            field,
            ratio.to_string(),
            "Gear ratio must be positive",
        ));
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Parse a comma-separated gear ratio list such as `"8.5, 6.2, 4.5"`.
///
/// Blank entries are skipped. Values are only parsed here; positivity is
/// checked by [`VehicleConfig::validate`].
pub fn parse_gear_ratios(text: &str) -> CalcResult<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                CalcError::invalid_input(
                    "gear_ratios",
                    text,
                    format!("'{}' is not a number; use comma-separated numbers", token),
                )
            })
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GearRatiosInput {
    List(Vec<f64>),
    Text(String),
}

fn deserialize_gear_ratios<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match GearRatiosInput::deserialize(deserializer)? {
        GearRatiosInput::List(ratios) => Ok(ratios),
        GearRatiosInput::Text(text) => parse_gear_ratios(&text).map_err(serde::de::Error::custom),
    }
}

/// Operating envelope of the track, already normalized to percent grade and
/// curve degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackEnvelope {
    /// Steepest gradient to analyse (percent grade)
    pub max_slope_percent: f64,

    /// Sharpest curve to analyse (curve degrees)
    pub max_curve_degree: f64,
}

impl TrackEnvelope {
    /// Envelope from already-normalized values
    pub fn new(max_slope_percent: f64, max_curve_degree: f64) -> Self {
        TrackEnvelope {
            max_slope_percent,
            max_curve_degree,
        }
    }

    /// Envelope from values in user-facing units.
    ///
    /// Slopes in degrees become `tan(θ)·100`; a curve radius `r` becomes
    /// `1750 / r` degrees, with `r = 0` read as straight track. Angles of 90°
    /// or more are `OutOfRangeParameter`.
    pub fn from_units(
        slope: f64,
        slope_unit: SlopeUnit,
        curve: f64,
        curve_unit: CurveUnit,
    ) -> CalcResult<Self> {
        Ok(TrackEnvelope {
            max_slope_percent: slope_unit.to_percent(slope)?.0,
            max_curve_degree: curve_unit.to_degree(curve).0,
        })
    }

    /// Validate the envelope.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.max_slope_percent.is_finite() && self.max_slope_percent >= 0.0) {
            return Err(CalcError::out_of_range(
                "max_slope_percent",
                self.max_slope_percent.to_string(),
                "Maximum slope must be zero or positive",
            ));
        }
        if !(self.max_curve_degree.is_finite() && self.max_curve_degree >= 0.0) {
            return Err(CalcError::out_of_range(
                "max_curve_degree",
                self.max_curve_degree.to_string(),
                "Maximum curve must be zero or positive",
            ));
        }
        Ok(())
    }
}

/// Wagon load pulled behind the locomotive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShuntingScenario {
    /// Trailing load in metric tonnes
    pub trailing_load_tonnes: f64,
}

impl ShuntingScenario {
    pub fn new(trailing_load_tonnes: f64) -> Self {
        ShuntingScenario { trailing_load_tonnes }
    }

    /// Validate the scenario.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.trailing_load_tonnes.is_finite() && self.trailing_load_tonnes >= 0.0) {
            return Err(CalcError::out_of_range(
                "trailing_load_tonnes",
                self.trailing_load_tonnes.to_string(),
                "Trailing load must be zero or positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Reference shunting locomotive used across the crate's tests
    pub(crate) fn reference_vehicle() -> VehicleConfig {
        VehicleConfig {
            gross_weight_kg: 120_000.0,
            num_axles: 4,
            wheel_diameter_m: 1.25,
            rear_axle_ratio: 3.5,
            gear_ratios: vec![8.5],
            peak_power_kw: 2000.0,
            friction_mu: 0.35,
            min_rpm: 400.0,
            max_rpm: 2100.0,
            max_speed_kmh: None,
        }
    }

    #[test]
    fn test_reference_vehicle_is_valid() {
        assert!(reference_vehicle().validate().is_ok());
        assert_eq!(reference_vehicle().weight_tonnes(), 120.0);
    }

    #[test]
    fn test_zero_divisors_are_degenerate() {
        let mut v = reference_vehicle();
        v.wheel_diameter_m = 0.0;
        let err = v.validate().unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_PARAMETER");
        assert_eq!(err.field(), Some("wheel_diameter_m"));

        let mut v = reference_vehicle();
        v.rear_axle_ratio = -1.0;
        assert_eq!(v.validate().unwrap_err().field(), Some("rear_axle_ratio"));
    }

    #[test]
    fn test_gear_list_problems_are_degenerate() {
        let mut v = reference_vehicle();
        v.gear_ratios = vec![];
        assert_eq!(v.validate().unwrap_err().field(), Some("gear_ratios"));

        v.gear_ratios = vec![8.5, 0.0, 4.5];
        let err = v.validate().unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_PARAMETER");
        assert_eq!(err.field(), Some("gear_ratios[1]"));
    }

    #[test]
    fn test_friction_range() {
        for mu in [0.0, -0.1, 1.01, f64::NAN] {
            let mut v = reference_vehicle();
            v.friction_mu = mu;
            let err = v.validate().unwrap_err();
            assert_eq!(err.error_code(), "OUT_OF_RANGE_PARAMETER");
            assert_eq!(err.field(), Some("friction_mu"));
        }
        let mut v = reference_vehicle();
        v.friction_mu = 1.0;
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_rpm_bounds() {
        let mut v = reference_vehicle();
        v.min_rpm = 0.0;
        assert_eq!(v.validate().unwrap_err().field(), Some("min_rpm"));

        let mut v = reference_vehicle();
        v.max_rpm = -5.0;
        assert_eq!(v.validate().unwrap_err().field(), Some("max_rpm"));

        let mut v = reference_vehicle();
        v.min_rpm = 2500.0;
        assert_eq!(v.validate().unwrap_err().field(), Some("min_rpm"));
    }

    #[test]
    fn test_degenerate_reported_before_range() {
        let mut v = reference_vehicle();
        v.friction_mu = 5.0;
        v.gear_ratios = vec![0.0];
        assert_eq!(v.validate().unwrap_err().error_code(), "DEGENERATE_PARAMETER");
    }

    #[test]
    fn test_gear_extremes() {
        let mut v = reference_vehicle();
        v.gear_ratios = vec![4.5, 8.5, 6.2];
        assert_eq!(v.highest_gear(), 8.5);
        assert_eq!(v.lowest_gear(), 4.5);
    }

    #[test]
    fn test_parse_gear_ratios() {
        assert_eq!(parse_gear_ratios("8.5, 6.2,4.5").unwrap(), vec![8.5, 6.2, 4.5]);
        assert_eq!(parse_gear_ratios("8.5,, ").unwrap(), vec![8.5]);
        let err = parse_gear_ratios("8.5, fast").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_deserialize_defaults_and_text_gears() {
        let json = r#"{
            "gross_weight_kg": 80000.0,
            "num_axles": 2,
            "wheel_diameter_m": 0.73,
            "rear_axle_ratio": 4.1,
            "gear_ratios": "5.0, 3.0",
            "peak_power_kw": 400.0
        }"#;
        let v: VehicleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(v.gear_ratios, vec![5.0, 3.0]);
        assert_eq!(v.friction_mu, DEFAULT_FRICTION_MU);
        assert_eq!(v.min_rpm, DEFAULT_MIN_RPM);
        assert_eq!(v.max_rpm, DEFAULT_MAX_RPM);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_deserialize_bad_gear_text_fails() {
        let json = r#"{
            "gross_weight_kg": 80000.0, "num_axles": 2, "wheel_diameter_m": 0.73,
            "rear_axle_ratio": 4.1, "gear_ratios": "five", "peak_power_kw": 400.0
        }"#;
        assert!(serde_json::from_str::<VehicleConfig>(json).is_err());
    }

    #[test]
    fn test_track_from_units() {
        let track =
            TrackEnvelope::from_units(45.0, SlopeUnit::Degree, 350.0, CurveUnit::RadiusMeters);
        let track = track.unwrap();
        assert!((track.max_slope_percent - 100.0).abs() < 1e-9);
        assert!((track.max_curve_degree - 5.0).abs() < 1e-12);

        let err =
            TrackEnvelope::from_units(90.0, SlopeUnit::Degree, 0.0, CurveUnit::Degree).unwrap_err();
        assert_eq!(err.field(), Some("max_slope"));
    }

    #[test]
    fn test_track_and_load_validation() {
        assert!(TrackEnvelope::new(2.0, 4.0).validate().is_ok());
        assert!(TrackEnvelope::new(-1.0, 0.0).validate().is_err());
        assert!(TrackEnvelope::new(0.0, f64::INFINITY).validate().is_err());
        assert!(ShuntingScenario::new(0.0).validate().is_ok());
        assert!(ShuntingScenario::new(-10.0).validate().is_err());
    }
}
