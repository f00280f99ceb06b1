//! Headline figures for a canonical daily forecast.

use chrono::NaiveDate;

use crate::domain::{ForecastSeries, PeriodUnit};
use crate::series::resample;

/// Horizon used for the short-term demand figure.
pub const NEAR_TERM_DAYS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub total: f64,
    /// Mean over calendar-month buckets.
    pub average_monthly: f64,
    pub next_30_days: f64,
    /// Date and value of the largest period (first one on ties).
    pub peak: Option<(NaiveDate, f64)>,
}

pub fn summarize(series: &ForecastSeries) -> ForecastSummary {
    let total = series.values.iter().sum();

    let monthly = resample(series, PeriodUnit::Month);
    let average_monthly = if monthly.is_empty() {
        0.0
    } else {
        monthly.values.iter().sum::<f64>() / monthly.len() as f64
    };

    let next_30_days = series.values.iter().take(NEAR_TERM_DAYS).sum();

    let peak = series
        .values
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .and_then(|(i, v)| series.date_at(i).map(|d| (d, v)));

    ForecastSummary {
        total,
        average_monthly,
        next_30_days,
        peak,
    }
}
