//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held by the session controller between requests
//! - handed to a rendering layer as-is
//! - exported to CSV/JSON for offline inspection

use chrono::{Datelike, Days, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Granularity of a series' values.
///
/// Normalized series are always `Day`; `Week` and `Month` only come out of the
/// resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    #[default]
    #[value(alias = "daily")]
    Day,
    #[value(alias = "weekly")]
    Week,
    #[value(alias = "monthly")]
    Month,
}

impl PeriodUnit {
    pub const ALL: [PeriodUnit; 3] = [PeriodUnit::Day, PeriodUnit::Week, PeriodUnit::Month];

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            PeriodUnit::Day => "daily",
            PeriodUnit::Week => "weekly",
            PeriodUnit::Month => "monthly",
        }
    }
}

/// The canonical forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// One demand/sales estimate per period.
    pub values: Vec<f64>,
    /// Date of `values[0]`.
    pub start_date: NaiveDate,
    pub period_unit: PeriodUnit,
    /// Informational only; never used for indexing.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Commentary from the service, passed through untouched.
    #[serde(default)]
    pub analysis: Option<String>,
    /// Monthly rollup supplied by the service (never empty when present).
    #[serde(default)]
    pub monthly_aggregates: Option<Vec<f64>>,
    /// Per-point date labels supplied by the service.
    ///
    /// Only kept when there is exactly one label per value. They replace the
    /// derived labels for display but are never used for bucketing.
    #[serde(default)]
    pub dates: Option<Vec<String>>,
    /// Monthly buckets after the first start on the first day of their month.
    #[serde(default)]
    pub calendar_aligned: bool,
    /// Values came from the fallback dataset rather than the live service.
    #[serde(default)]
    pub degraded: bool,
}

impl ForecastSeries {
    /// A plain daily series with no metadata.
    pub fn daily(values: Vec<f64>, start_date: NaiveDate) -> Self {
        Self {
            values,
            start_date,
            period_unit: PeriodUnit::Day,
            end_date: None,
            analysis: None,
            monthly_aggregates: None,
            dates: None,
            calendar_aligned: false,
            degraded: false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empty or all-zero: the service produced nothing worth showing.
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Derived date of the `index`-th period.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        match self.period_unit {
            PeriodUnit::Day => self.start_date.checked_add_days(Days::new(index as u64)),
            PeriodUnit::Week => self
                .start_date
                .checked_add_days(Days::new(7 * index as u64)),
            PeriodUnit::Month => {
                let months = Months::new(u32::try_from(index).ok()?);
                if self.calendar_aligned && index > 0 {
                    self.start_date.with_day(1)?.checked_add_months(months)
                } else {
                    self.start_date.checked_add_months(months)
                }
            }
        }
    }

    /// Derived dates, one per value.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.values.len()).map_while(|i| self.date_at(i)).collect()
    }

    /// Display labels: service-supplied labels when they line up, else ISO dates.
    pub fn date_labels(&self) -> Vec<String> {
        if let Some(labels) = &self.dates {
            if labels.len() == self.values.len() {
                return labels.clone();
            }
        }
        self.dates()
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }
}

/// A series plus its trend line and confidence band.
///
/// `trend`, `upper_bound` and `lower_bound` always have `series.len()` elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedSeries {
    pub series: ForecastSeries,
    pub trend: Vec<f64>,
    pub upper_bound: Vec<f64>,
    pub lower_bound: Vec<f64>,
}

/// One display row of an augmented series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub label: String,
    pub value: f64,
    pub trend: f64,
    pub lower: f64,
    pub upper: f64,
}

impl AugmentedSeries {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn rows(&self) -> Vec<SeriesRow> {
        self.series
            .date_labels()
            .into_iter()
            .zip(&self.series.values)
            .zip(&self.trend)
            .zip(self.lower_bound.iter().zip(&self.upper_bound))
            .map(|(((label, &value), &trend), (&lower, &upper))| SeriesRow {
                label,
                value,
                trend,
                lower,
                upper,
            })
            .collect()
    }
}

/// Observable lifecycle of a forecast session.
///
/// A failed fetch is never observable: it settles into `Succeeded` with a
/// degraded series and an advisory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Requesting,
    Succeeded,
}

/// A consistent copy of the controller's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// The canonical daily series, if any has been loaded.
    pub canonical: Option<ForecastSeries>,
    /// Non-blocking message shown alongside degraded data.
    pub advisory: Option<String>,
    /// Last save failure; kept apart from `advisory` because it is not recovered.
    pub save_error: Option<String>,
    pub view: PeriodUnit,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Requesting
    }

    pub fn is_degraded(&self) -> bool {
        self.canonical.as_ref().is_some_and(|s| s.degraded)
    }
}
