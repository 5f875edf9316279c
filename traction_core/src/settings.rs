//! # Simulation Settings
//!
//! Sweep resolution and search strategy. Cost of an analysis is roughly
//! linear in `slope rows × gear count × speed samples`, so these are the
//! knobs that bound call latency.
//!
//! ## TOML Example
//!
//! ```toml
//! slope_step_percent = 0.25
//! speed_samples = 200
//!
//! [search]
//! strategy = "bisection"
//! tolerance_kmh = 0.01
//! max_iterations = 40
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::grid::slope_steps;
use crate::calculations::search::SpeedSearch;
use crate::constants::{
    DEFAULT_SLOPE_STEP_PERCENT, DEFAULT_SPEED_SAMPLES, MAX_SPEED_SAMPLES, MAX_SWEEP_EVALUATIONS,
};
use crate::errors::{CalcError, CalcResult};

/// Resolution of the performance sweeps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Increment between slope rows (percent grade)
    pub slope_step_percent: f64,

    /// Evenly spaced speed samples per sweep
    pub speed_samples: usize,

    /// Maximum-speed search strategy
    pub search: SpeedSearch,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            slope_step_percent: DEFAULT_SLOPE_STEP_PERCENT,
            speed_samples: DEFAULT_SPEED_SAMPLES,
            search: SpeedSearch::LinearScan,
        }
    }
}

impl SimulationSettings {
    /// Parse settings from TOML; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: SimulationSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.slope_step_percent.is_finite() && self.slope_step_percent > 0.0) {
            return Err(CalcError::out_of_range(
                "slope_step_percent",
                self.slope_step_percent.to_string(),
                "Slope step must be positive",
            ));
        }
        if self.speed_samples < 2 {
            return Err(CalcError::out_of_range(
                "speed_samples",
                self.speed_samples.to_string(),
                "At least two speed samples are needed to span a range",
            ));
        }
        if self.speed_samples > MAX_SPEED_SAMPLES {
            return Err(CalcError::out_of_range(
                "speed_samples",
                self.speed_samples.to_string(),
                format!("At most {} speed samples per sweep", MAX_SPEED_SAMPLES),
            ));
        }
        self.search.validate()
    }

    /// Number of slope rows for an envelope maximum, without building them.
    ///
    /// `None` when the count does not fit in `usize`.
    pub fn slope_row_count(&self, max_slope_percent: f64) -> Option<usize> {
        let steps = (max_slope_percent / self.slope_step_percent + 1e-9).floor();
        if !(steps.is_finite() && steps >= 0.0 && steps < usize::MAX as f64) {
            return None;
        }
        (steps as usize).checked_add(1)
    }

    /// Slope rows analysed for an envelope maximum
    pub fn slope_rows(&self, max_slope_percent: f64) -> Vec<f64> {
        slope_steps(max_slope_percent, self.slope_step_percent)
    }

    /// Upper bound on solver evaluations for a full analysis.
    ///
    /// Counts the curve sweep (both datasets share one pass), the
    /// speed-vs-slope table and the three per-gear snapshot searches. `None`
    /// when the count overflows `usize`.
    pub fn estimated_evaluations(
        &self,
        gear_count: usize,
        max_slope_percent: f64,
    ) -> Option<usize> {
        let slope_rows = self.slope_row_count(max_slope_percent)?;
        let per_search = self.speed_samples.checked_add(self.search.max_refinements())?;
        let curves = slope_rows.checked_mul(gear_count)?.checked_mul(self.speed_samples)?;
        let table = slope_rows.checked_mul(per_search)?;
        let snapshot = gear_count.checked_mul(3)?.checked_mul(per_search)?;
        curves.checked_add(table)?.checked_add(snapshot)
    }

    /// Reject sweeps larger than [`MAX_SWEEP_EVALUATIONS`] before any
    /// allocation; returns the estimate otherwise.
    pub fn check_budget(&self, gear_count: usize, max_slope_percent: f64) -> CalcResult<usize> {
        match self.estimated_evaluations(gear_count, max_slope_percent) {
            Some(count) if count <= MAX_SWEEP_EVALUATIONS => Ok(count),
            estimate => Err(CalcError::out_of_range(
                "estimated_evaluations",
                estimate.map_or_else(|| "overflow".to_string(), |count| count.to_string()),
                format!(
                    "Sweep exceeds {} evaluations; raise slope_step_percent or lower speed_samples",
                    MAX_SWEEP_EVALUATIONS
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SimulationSettings::default();
        assert_eq!(s.slope_step_percent, 0.5);
        assert_eq!(s.speed_samples, 100);
        assert_eq!(s.search, SpeedSearch::LinearScan);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let s = SimulationSettings::from_toml_str("speed_samples = 20").unwrap();
        assert_eq!(s.speed_samples, 20);
        assert_eq!(s.slope_step_percent, 0.5);
    }

    #[test]
    fn test_from_toml_bisection() {
        let text = r#"
            slope_step_percent = 0.25

            [search]
            strategy = "bisection"
            tolerance_kmh = 0.05
            max_iterations = 10
        "#;
        let s = SimulationSettings::from_toml_str(text).unwrap();
        assert_eq!(s.slope_step_percent, 0.25);
        assert_eq!(
            s.search,
            SpeedSearch::Bisection {
                tolerance_kmh: 0.05,
                max_iterations: 10
            }
        );
    }

    #[test]
    fn test_bad_values_rejected() {
        let err = SimulationSettings::from_toml_str("slope_step_percent = 0.0").unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE_PARAMETER");

        let err = SimulationSettings::from_toml_str("speed_samples = 1").unwrap_err();
        assert_eq!(err.field(), Some("speed_samples"));

        let err = SimulationSettings::from_toml_str("speed_samples = \"many\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_estimated_evaluations() {
        let s = SimulationSettings::default();
        // 3 slope rows, 2 gears: curves 3·2·100, table 3·100, snapshot 3·2·100
        assert_eq!(s.estimated_evaluations(2, 1.0), Some(600 + 300 + 600));
        assert_eq!(s.check_budget(2, 1.0).unwrap(), 1500);
    }

    #[test]
    fn test_slope_row_count_matches_rows() {
        let s = SimulationSettings::default();
        assert_eq!(s.slope_row_count(1.0), Some(s.slope_rows(1.0).len()));
        assert_eq!(s.slope_row_count(1.2), Some(3));
        assert_eq!(s.slope_row_count(f64::INFINITY), None);
        assert_eq!(s.slope_row_count(1e300), None);
    }

    #[test]
    fn test_huge_sample_count_rejected() {
        let s = SimulationSettings {
            speed_samples: usize::MAX,
            ..SimulationSettings::default()
        };
        let err = s.validate().unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE_PARAMETER");
        assert_eq!(err.field(), Some("speed_samples"));
        assert_eq!(s.estimated_evaluations(3, 1.0), None);
    }

    #[test]
    fn test_oversized_sweep_rejected() {
        let s = SimulationSettings::default();
        // A 60° slope is a 173% grade: 347 rows at the default step fit
        assert!(s.check_budget(3, 173.2).is_ok());

        let fine = SimulationSettings {
            slope_step_percent: 1e-6,
            ..SimulationSettings::default()
        };
        let err = fine.check_budget(3, 10.0).unwrap_err();
        assert_eq!(err.field(), Some("estimated_evaluations"));

        let err = s.check_budget(3, 1.6e18).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE_PARAMETER");
    }

    #[test]
    fn test_json_defaults_when_empty() {
        let s: SimulationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, SimulationSettings::default());
    }
}
