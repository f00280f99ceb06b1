//! Reporting utilities: summary figures, stock coverage and formatted output.

pub mod format;
pub mod stock;
pub mod summary;

pub use stock::{StockCoverage, StockPosition, coverage, monthly_demand};
pub use summary::{ForecastSummary, summarize};
