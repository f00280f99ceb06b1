//! Daily → weekly/monthly bucketing.
//!
//! Buckets are sums. Weekly buckets are fixed windows of seven values counted
//! from `start_date`; monthly buckets follow the calendar, so the first bucket
//! is usually partial and later buckets start on the first of the month.

use chrono::{Datelike, Days, NaiveDate};
use tracing::warn;

use crate::domain::{ForecastSeries, PeriodUnit};

const DAYS_PER_WEEK: usize = 7;

/// Aggregate a daily series into `unit`-sized buckets.
///
/// The input is never modified. Series that are already weekly or monthly are
/// returned unchanged: bucketing is lossy, so only the canonical daily series
/// is ever resampled.
pub fn resample(series: &ForecastSeries, unit: PeriodUnit) -> ForecastSeries {
    if series.period_unit == unit {
        return series.clone();
    }
    if series.period_unit != PeriodUnit::Day {
        warn!(
            from = series.period_unit.label(),
            to = unit.label(),
            "refusing to resample an already-bucketed series"
        );
        return series.clone();
    }

    match unit {
        PeriodUnit::Day => series.clone(),
        PeriodUnit::Week => bucketed(series, PeriodUnit::Week, weekly_sums(&series.values), false),
        PeriodUnit::Month => match &series.monthly_aggregates {
            Some(aggregates) if !aggregates.is_empty() => {
                bucketed(series, PeriodUnit::Month, aggregates.clone(), false)
            }
            _ => bucketed(
                series,
                PeriodUnit::Month,
                calendar_month_sums(&series.values, series.start_date),
                true,
            ),
        },
    }
}

fn bucketed(
    series: &ForecastSeries,
    unit: PeriodUnit,
    values: Vec<f64>,
    calendar_aligned: bool,
) -> ForecastSeries {
    ForecastSeries {
        values,
        start_date: series.start_date,
        period_unit: unit,
        end_date: series.end_date,
        analysis: series.analysis.clone(),
        monthly_aggregates: series.monthly_aggregates.clone(),
        dates: None,
        calendar_aligned,
        degraded: series.degraded,
    }
}

/// Sum consecutive groups of seven; the trailing short group is kept.
fn weekly_sums(values: &[f64]) -> Vec<f64> {
    values
        .chunks(DAYS_PER_WEEK)
        .map(|week| week.iter().sum())
        .collect()
}

/// Walk the values day by day and close a bucket whenever the month changes.
fn calendar_month_sums(values: &[f64], start: NaiveDate) -> Vec<f64> {
    let mut out = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    let mut sum = 0.0;
    let mut days_in_bucket = 0usize;

    for (i, &v) in values.iter().enumerate() {
        // Past the end of chrono's calendar every remaining day lands in the open bucket.
        let month = start
            .checked_add_days(Days::new(i as u64))
            .map(|d| (d.year(), d.month()))
            .or(current);

        if current.is_some() && month != current {
            out.push(sum);
            sum = 0.0;
            days_in_bucket = 0;
        }
        current = month;
        sum += v;
        days_in_bucket += 1;
    }

    if days_in_bucket > 0 {
        out.push(sum);
    }
    out
}
