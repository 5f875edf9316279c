//! # Maximum Sustainable Speed Search
//!
//! Finds the highest speed on a sample grid at which the achievable force
//! still covers resistance. The search only sees a `speed → EquilibriumPoint`
//! closure, so it is independent of the physical model.
//!
//! ## Strategies
//!
//! - [`SpeedSearch::LinearScan`] evaluates every sample and keeps the highest
//!   sustainable one. The answer is quantized to the grid.
//! - [`SpeedSearch::Bisection`] runs the same scan, then bisects between the
//!   best sample and the next (unsustainable) one until the bracket is
//!   narrower than `tolerance_kmh`. The answer is never below the scan's.
//!
//! In both cases no sustainable sample gives 0 km/h.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::solver::EquilibriumPoint;
use crate::constants::{DEFAULT_BISECTION_MAX_ITERATIONS, DEFAULT_BISECTION_TOLERANCE_KMH};
use crate::errors::{CalcError, CalcResult};

/// How the highest sustainable speed is located
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SpeedSearch {
    /// Keep the highest sustainable grid sample
    #[default]
    LinearScan,
    /// Refine the grid answer by bisection
    Bisection {
        /// Stop once the bracket is this narrow (km/h)
        tolerance_kmh: f64,
        /// Hard cap on refinement steps
        max_iterations: u32,
    },
}

/// Result of one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Highest sustainable speed found (km/h), 0 when none
    pub max_speed_kmh: f64,
    /// Solver evaluations spent
    pub evaluations: usize,
}

impl SpeedSearch {
    /// Bisection with default tolerance and iteration cap
    pub fn bisection() -> Self {
        SpeedSearch::Bisection {
            tolerance_kmh: DEFAULT_BISECTION_TOLERANCE_KMH,
            max_iterations: DEFAULT_BISECTION_MAX_ITERATIONS,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let SpeedSearch::Bisection {
            tolerance_kmh,
            max_iterations,
        } = *self
        {
            if !(tolerance_kmh.is_finite() && tolerance_kmh > 0.0) {
                return Err(CalcError::out_of_range(
                    "search.tolerance_kmh",
                    tolerance_kmh.to_string(),
                    "Bisection tolerance must be positive",
                ));
            }
            if max_iterations == 0 {
                return Err(CalcError::out_of_range(
                    "search.max_iterations",
                    "0",
                    "Bisection needs at least one iteration",
                ));
            }
        }
        Ok(())
    }

    /// Largest number of refinement evaluations per search
    pub fn max_refinements(&self) -> usize {
        match *self {
            SpeedSearch::LinearScan => 0,
            SpeedSearch::Bisection { max_iterations, .. } => max_iterations as usize,
        }
    }

    /// Highest speed in `grid` (ascending) at which `evaluate` is sustainable.
    pub fn max_sustainable_speed<F>(
        &self,
        grid: &[f64],
        mut evaluate: F,
    ) -> CalcResult<SearchOutcome>
    where
        F: FnMut(f64) -> CalcResult<EquilibriumPoint>,
    {
        let mut best_index = None;
        for (i, &speed) in grid.iter().enumerate() {
            if evaluate(speed)?.is_sustainable() {
                best_index = Some(i);
            }
        }
        let mut outcome = SearchOutcome {
            max_speed_kmh: best_index.map_or(0.0, |i| grid[i]),
            evaluations: grid.len(),
        };

        if let (
            SpeedSearch::Bisection {
                tolerance_kmh,
                max_iterations,
            },
            Some(i),
        ) = (*self, best_index)
        {
            // The top sample is already the edge of the grid.
            if i + 1 < grid.len() {
                let mut bracket = Bracket::new(grid[i], grid[i + 1]);
                let mut iterations = 0;
                while bracket.width() > tolerance_kmh && iterations < max_iterations {
                    let mid = bracket.midpoint();
                    bracket.shrink(mid, evaluate(mid)?.is_sustainable());
                    iterations += 1;
                }
                outcome.max_speed_kmh = bracket.sustainable;
                outcome.evaluations += iterations as usize;
            }
        }

        debug!(
            max_speed_kmh = outcome.max_speed_kmh,
            evaluations = outcome.evaluations,
            "speed search finished"
        );
        Ok(outcome)
    }
}

/// Sustainable lower end and unsustainable upper end
#[derive(Debug, Clone, Copy)]
struct Bracket {
    sustainable: f64,
    unsustainable: f64,
}

impl Bracket {
    fn new(sustainable: f64, unsustainable: f64) -> Self {
        Bracket {
            sustainable,
            unsustainable,
        }
    }

    fn midpoint(&self) -> f64 {
        0.5 * (self.sustainable + self.unsustainable)
    }

    fn width(&self) -> f64 {
        self.unsustainable - self.sustainable
    }

    fn shrink(&mut self, speed: f64, sustainable: bool) {
        if sustainable {
            self.sustainable = speed;
        } else {
            self.unsustainable = speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::solver::OperatingPoint;

    /// Sustainable strictly below `limit` km/h
    fn threshold_point(speed: f64, limit: f64) -> CalcResult<EquilibriumPoint> {
        Ok(EquilibriumPoint {
            point: OperatingPoint::new(speed, 1.0, 0.0, 0.0),
            engine_rpm: 0.0,
            torque_nm: 0.0,
            power_limited: false,
            generated_n: 100.0,
            adhesion_n: 100.0,
            achievable_n: 100.0,
            locomotive_resistance_n: 0.0,
            trailing_resistance_n: 0.0,
            resistance_n: if speed < limit { 50.0 } else { 150.0 },
        })
    }

    fn grid() -> Vec<f64> {
        (0..=10).map(|i| f64::from(i) * 10.0).collect()
    }

    #[test]
    fn test_linear_scan_quantizes_to_grid() {
        let outcome = SpeedSearch::LinearScan
            .max_sustainable_speed(&grid(), |v| threshold_point(v, 43.0))
            .unwrap();
        assert_eq!(outcome.max_speed_kmh, 40.0);
        assert_eq!(outcome.evaluations, 11);
    }

    #[test]
    fn test_bisection_refines_within_tolerance() {
        let search = SpeedSearch::Bisection {
            tolerance_kmh: 0.01,
            max_iterations: 40,
        };
        let outcome = search.max_sustainable_speed(&grid(), |v| threshold_point(v, 43.0)).unwrap();
        assert!(outcome.max_speed_kmh < 43.0);
        assert!(43.0 - outcome.max_speed_kmh <= 0.01);
        assert!(outcome.evaluations > 11);
    }

    #[test]
    fn test_bisection_respects_iteration_cap() {
        let search = SpeedSearch::Bisection {
            tolerance_kmh: 1e-12,
            max_iterations: 3,
        };
        let outcome = search.max_sustainable_speed(&grid(), |v| threshold_point(v, 43.0)).unwrap();
        assert_eq!(outcome.evaluations, 14);
        // 40..50 → 40..45 → 42.5..45 → 42.5..43.75
        assert_eq!(outcome.max_speed_kmh, 42.5);
    }

    #[test]
    fn test_nothing_sustainable_gives_zero() {
        for search in [SpeedSearch::LinearScan, SpeedSearch::bisection()] {
            let outcome = search
                .max_sustainable_speed(&grid(), |v| threshold_point(v, -1.0))
                .unwrap();
            assert_eq!(outcome.max_speed_kmh, 0.0);
        }
    }

    #[test]
    fn test_whole_grid_sustainable_returns_top() {
        let outcome = SpeedSearch::bisection()
            .max_sustainable_speed(&grid(), |v| threshold_point(v, 1000.0))
            .unwrap();
        assert_eq!(outcome.max_speed_kmh, 100.0);
    }

    #[test]
    fn test_errors_propagate() {
        let result = SpeedSearch::LinearScan
            .max_sustainable_speed(&grid(), |_| Err(CalcError::invalid_curve("boom")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(SpeedSearch::LinearScan.validate().is_ok());
        assert!(SpeedSearch::bisection().validate().is_ok());
        let bad = SpeedSearch::Bisection {
            tolerance_kmh: 0.0,
            max_iterations: 10,
        };
        assert!(bad.validate().is_err());
        let bad = SpeedSearch::Bisection {
            tolerance_kmh: 0.1,
            max_iterations: 0,
        };
        assert!(bad.validate().is_err());
    }
}
