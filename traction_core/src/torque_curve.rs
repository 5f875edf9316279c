//! # Engine Torque Curve
//!
//! A discrete RPM → torque table and the linear interpolator used inside every
//! sweep. Outside the tabulated range the torque clamps to the nearest
//! endpoint; the curve is never extrapolated.
//!
//! ## JSON Example
//!
//! ```json
//! { "400": 12000.0, "1200": 18000.0, "2100": 9000.0 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use traction_core::torque_curve::TorqueCurve;
//!
//! let curve =
//!     TorqueCurve::from_points([(400, 12_000.0), (1200, 18_000.0), (2100, 9_000.0)]).unwrap();
//! assert_eq!(curve.torque_at(800.0).unwrap(), 15_000.0);
//! assert_eq!(curve.torque_at(50.0).unwrap(), 12_000.0);
//! assert_eq!(curve.torque_at(3000.0).unwrap(), 9_000.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Engine torque curve, ascending by RPM.
///
/// Construction rejects empty curves and non-finite or negative torque, so a
/// `TorqueCurve` value is always usable by the interpolator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, f64>", into = "BTreeMap<u32, f64>")]
pub struct TorqueCurve {
    rpms: Vec<f64>,
    torques: Vec<f64>,
}

impl TorqueCurve {
    /// Build a curve from an RPM-keyed map
    pub fn new(points: BTreeMap<u32, f64>) -> CalcResult<Self> {
        if points.is_empty() {
            return Err(CalcError::invalid_curve("Torque curve must contain at least one point"));
        }
        let mut rpms = Vec::with_capacity(points.len());
        let mut torques = Vec::with_capacity(points.len());
        for (rpm, torque) in points {
            if !torque.is_finite() || torque < 0.0 {
                return Err(CalcError::invalid_curve(format!(
                    "Torque at {} RPM must be a finite, non-negative value (got {})",
                    rpm, torque
                )));
            }
            rpms.push(f64::from(rpm));
            torques.push(torque);
        }
        Ok(TorqueCurve { rpms, torques })
    }

    /// Build a curve from `(rpm, torque)` pairs in any order.
    ///
    /// A repeated RPM keeps the last torque given for it.
    pub fn from_points(points: impl IntoIterator<Item = (u32, f64)>) -> CalcResult<Self> {
        Self::new(points.into_iter().collect())
    }

    /// Interpolated torque (N·m) at an engine speed
    pub fn torque_at(&self, rpm: f64) -> CalcResult<f64> {
        interpolate(rpm, &self.rpms, &self.torques)
    }

    /// Largest tabulated torque (N·m)
    pub fn max_torque(&self) -> f64 {
        self.torques.iter().copied().fold(0.0, f64::max)
    }

    /// Number of tabulated points
    pub fn len(&self) -> usize {
        self.rpms.len()
    }

    /// Always false for a constructed curve; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.rpms.is_empty()
    }

    /// Tabulated `(rpm, torque)` points in ascending RPM order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rpms.iter().copied().zip(self.torques.iter().copied())
    }
}

impl TryFrom<BTreeMap<u32, f64>> for TorqueCurve {
    type Error = CalcError;

    fn try_from(points: BTreeMap<u32, f64>) -> Result<Self, Self::Error> {
        TorqueCurve::new(points)
    }
}

impl From<TorqueCurve> for BTreeMap<u32, f64> {
    fn from(curve: TorqueCurve) -> Self {
        curve
            .rpms
            .into_iter()
            .map(|rpm| rpm as u32)
            .zip(curve.torques)
            .collect()
    }
}

/// Linear interpolation over an ascending table, clamped at both ends.
///
/// `rpms` must be ascending and the same length as `torques`. Locating the
/// bracket is a binary search, so the cost is `O(log n)` with no allocation.
///
/// # Errors
///
/// - `InvalidCurve` if the table is empty or the slices differ in length
/// - `OutOfRangeParameter` if `rpm` is NaN
pub fn interpolate(rpm: f64, rpms: &[f64], torques: &[f64]) -> CalcResult<f64> {
    if rpms.is_empty() || torques.is_empty() {
        return Err(CalcError::invalid_curve("Torque curve is empty"));
    }
    if rpms.len() != torques.len() {
        return Err(CalcError::invalid_curve(format!(
            "Torque curve has {} RPM values but {} torque values",
            rpms.len(),
            torques.len()
        )));
    }
    if rpm.is_nan() {
        return Err(CalcError::out_of_range("rpm", "NaN", "Engine speed must be a number"));
    }

    let last = rpms.len() - 1;
    if rpm <= rpms[0] {
        return Ok(torques[0]);
    }
    if rpm >= rpms[last] {
        return Ok(torques[last]);
    }

    // rpms[hi - 1] <= rpm < rpms[hi]
    let hi = rpms.partition_point(|&r| r <= rpm);
    let lo = hi - 1;
    let fraction = (rpm - rpms[lo]) / (rpms[hi] - rpms[lo]);
    Ok(torques[lo] + fraction * (torques[hi] - torques[lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_curve() -> TorqueCurve {
        TorqueCurve::from_points([(400, 12_000.0), (1200, 18_000.0), (2100, 9_000.0)]).unwrap()
    }

    #[test]
    fn test_exact_at_curve_keys() {
        let curve = reference_curve();
        assert_eq!(curve.torque_at(400.0).unwrap(), 12_000.0);
        assert_eq!(curve.torque_at(1200.0).unwrap(), 18_000.0);
        assert_eq!(curve.torque_at(2100.0).unwrap(), 9_000.0);
    }

    #[test]
    fn test_linear_between_points() {
        let curve = reference_curve();
        assert!((curve.torque_at(800.0).unwrap() - 15_000.0).abs() < 1e-9);
        // Halfway down the falling segment
        assert!((curve.torque_at(1650.0).unwrap() - 13_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_outside_domain() {
        let curve = reference_curve();
        assert_eq!(curve.torque_at(0.0).unwrap(), 12_000.0);
        assert_eq!(curve.torque_at(-100.0).unwrap(), 12_000.0);
        assert_eq!(curve.torque_at(5000.0).unwrap(), 9_000.0);
    }

    #[test]
    fn test_stays_within_neighbouring_points() {
        let curve = reference_curve();
        let points: Vec<_> = curve.points().collect();
        for pair in points.windows(2) {
            let (r0, t0) = pair[0];
            let (r1, t1) = pair[1];
            for k in 0..=20 {
                let rpm = r0 + (r1 - r0) * f64::from(k) / 20.0;
                let t = curve.torque_at(rpm).unwrap();
                assert!(t >= t0.min(t1) - 1e-9 && t <= t0.max(t1) + 1e-9);
            }
        }
    }

    #[test]
    fn test_single_point_curve_is_flat() {
        let curve = TorqueCurve::from_points([(1000, 5_000.0)]).unwrap();
        assert_eq!(curve.torque_at(10.0).unwrap(), 5_000.0);
        assert_eq!(curve.torque_at(1000.0).unwrap(), 5_000.0);
        assert_eq!(curve.torque_at(9000.0).unwrap(), 5_000.0);
    }

    #[test]
    fn test_empty_curve_rejected() {
        let err = TorqueCurve::new(BTreeMap::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CURVE");

        let err = interpolate(1000.0, &[], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CURVE");
    }

    #[test]
    fn test_bad_torque_rejected() {
        assert!(TorqueCurve::from_points([(1000, f64::NAN)]).is_err());
        assert!(TorqueCurve::from_points([(1000, -10.0)]).is_err());
    }

    #[test]
    fn test_nan_rpm_rejected() {
        let curve = reference_curve();
        assert!(curve.torque_at(f64::NAN).is_err());
    }

    #[test]
    fn test_unsorted_points_are_ordered() {
        let curve =
            TorqueCurve::from_points([(2100, 9_000.0), (400, 12_000.0), (1200, 18_000.0)]).unwrap();
        assert_eq!(curve, reference_curve());
        assert_eq!(curve.max_torque(), 18_000.0);
    }

    #[test]
    fn test_json_map_roundtrip() {
        let json = r#"{"400": 12000.0, "1200": 18000.0, "2100": 9000.0}"#;
        let curve: TorqueCurve = serde_json::from_str(json).unwrap();
        assert_eq!(curve, reference_curve());

        let out = serde_json::to_string(&curve).unwrap();
        assert!(out.contains("\"1200\":18000.0"));
    }

    #[test]
    fn test_empty_json_map_fails() {
        let result: Result<TorqueCurve, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
