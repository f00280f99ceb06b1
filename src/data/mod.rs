//! Forecast sources.
//!
//! - `PredictionService` / `ForecastStore`: the two external collaborators
//! - `http`: blocking HTTP adapters for both
//! - `fallback`: the dataset substituted when the live service fails

use serde_json::Value;

use crate::domain::ForecastSeries;
use crate::error::{ServiceError, StoreError};

pub mod fallback;
pub mod http;
mod reference;

pub use fallback::FallbackProvider;
pub use http::{HttpForecastStore, HttpPredictionClient};

/// The external prediction service.
pub trait PredictionService: Send + Sync {
    /// Compute a fresh forecast for `subject` and return its raw payload.
    fn predict(&self, subject: &str) -> Result<Value, ServiceError>;
}

/// The external forecast storage service.
pub trait ForecastStore: Send + Sync {
    /// Fetch the last saved payload. `Ok(None)` means nothing has been saved yet.
    fn load(&self, subject: &str) -> Result<Option<Value>, StoreError>;

    /// Persist a canonical daily series.
    fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError>;
}

impl<T: PredictionService + ?Sized> PredictionService for Box<T> {
    fn predict(&self, subject: &str) -> Result<Value, ServiceError> {
        (**self).predict(subject)
    }
}

impl<T: ForecastStore + ?Sized> ForecastStore for Box<T> {
    fn load(&self, subject: &str) -> Result<Option<Value>, StoreError> {
        (**self).load(subject)
    }

    fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError> {
        (**self).save(subject, series)
    }
}
