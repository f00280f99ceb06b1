//! Fallback forecast used when the live service fails or returns nothing usable.

use chrono::{Days, NaiveDate};

use crate::data::reference::{REFERENCE_ANALYSIS, REFERENCE_VALUES};
use crate::domain::ForecastSeries;

/// Holds one daily dataset and re-anchors it to the requesting day.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackProvider {
    values: Vec<f64>,
    analysis: Option<String>,
}

impl FallbackProvider {
    /// The reference dataset shipped with the crate.
    pub fn reference() -> Self {
        Self::new(REFERENCE_VALUES.to_vec(), Some(REFERENCE_ANALYSIS.to_string()))
    }

    pub fn new(values: Vec<f64>, analysis: Option<String>) -> Self {
        Self { values, analysis }
    }

    /// A provider that substitutes an empty, clearly degraded series.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// The dataset as a degraded daily series starting `today`.
    pub fn get(&self, today: NaiveDate) -> ForecastSeries {
        let end_date = self
            .values
            .len()
            .checked_sub(1)
            .and_then(|last| today.checked_add_days(Days::new(last as u64)));

        ForecastSeries {
            end_date,
            analysis: self.analysis.clone(),
            degraded: true,
            ..ForecastSeries::daily(self.values.clone(), today)
        }
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::reference()
    }
}
