//! Inventory coverage from monthly demand.

use crate::domain::{ForecastSeries, PeriodUnit};
use crate::series::resample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockPosition {
    pub stock_quantity: f64,
    pub reorder_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockCoverage {
    /// Whole months the stock lasts before reaching the reorder threshold.
    pub months_until_reorder: usize,
    /// Units to buy to cover the whole horizon, rounded up.
    pub stock_needed: f64,
    pub total_demand: f64,
}

/// Monthly demand for a series: the service's own rollup when present, else
/// the calendar-month resample.
pub fn monthly_demand(series: &ForecastSeries) -> Vec<f64> {
    resample(series, PeriodUnit::Month).values
}

pub fn coverage(monthly: &[f64], position: StockPosition) -> StockCoverage {
    let mut remaining = position.stock_quantity;
    let mut months_until_reorder = 0;
    for demand in monthly {
        remaining -= demand;
        if remaining <= position.reorder_threshold {
            break;
        }
        months_until_reorder += 1;
    }

    let demand: f64 = monthly.iter().sum();
    StockCoverage {
        months_until_reorder,
        stock_needed: (demand - position.stock_quantity).max(0.0).ceil(),
        total_demand: demand.ceil(),
    }
}
