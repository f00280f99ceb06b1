//! Trailing moving average with a normal-approximation band.
//!
//! For each point the window is the point itself and up to `window - 1`
//! earlier points; future points are never used, so the band at `i` is final
//! as soon as `values[i]` is known.
//!
//! `upper/lower = mean ± 1.96 · σ` with the population standard deviation of
//! the window. This is a fixed display heuristic, not a prediction interval.

use crate::domain::{AugmentedSeries, ForecastSeries};

/// Default look-back window (one week of daily values).
pub const DEFAULT_WINDOW: usize = 7;

/// Two-sided 95% quantile of the standard normal.
pub const Z_95: f64 = 1.96;

/// Attach trend and band to `series`. A `window` of 0 is treated as 1.
pub fn augment(series: &ForecastSeries, window: usize) -> AugmentedSeries {
    let window = window.max(1);
    let n = series.values.len();

    let mut trend = Vec::with_capacity(n);
    let mut upper_bound = Vec::with_capacity(n);
    let mut lower_bound = Vec::with_capacity(n);

    for i in 0..n {
        let lo = (i + 1).saturating_sub(window);
        let (mean, sd) = mean_and_population_sd(&series.values[lo..=i]);
        trend.push(mean);
        upper_bound.push(mean + Z_95 * sd);
        lower_bound.push(mean - Z_95 * sd);
    }

    AugmentedSeries {
        series: series.clone(),
        trend,
        upper_bound,
        lower_bound,
    }
}

/// Computed on values scaled by the window's largest magnitude so sums of
/// large finite inputs stay finite.
fn mean_and_population_sd(window: &[f64]) -> (f64, f64) {
    let scale = window.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return (0.0, 0.0);
    }

    let len = window.len() as f64;
    let mean = window.iter().map(|v| v / scale).sum::<f64>() / len;
    let variance = window
        .iter()
        .map(|v| (v / scale - mean).powi(2))
        .sum::<f64>()
        / len;
    (mean * scale, variance.sqrt() * scale)
}
