//! Sample grids shared by the sweeps.

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// `count == 1` yields `[start]`; `count == 0` yields nothing. The last
/// element is exactly `end`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Slope rows `0, step, 2·step, …` up to and including `max_slope`.
///
/// Each row is computed as `k·step` rather than accumulated, so rows are
/// reproducible. A tiny tolerance keeps `max_slope` itself when it is an
/// exact multiple of `step` in decimal but not in binary.
pub fn slope_steps(max_slope_percent: f64, step_percent: f64) -> Vec<f64> {
    let count = (max_slope_percent / step_percent + 1e-9).floor() as usize;
    (0..=count).map(|k| k as f64 * step_percent).collect()
}
