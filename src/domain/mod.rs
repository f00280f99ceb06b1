//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the period granularity enum (`PeriodUnit`)
//! - the canonical series (`ForecastSeries`) and its augmented form (`AugmentedSeries`)
//! - the session state visible to readers (`SessionStatus`, `SessionSnapshot`)
//! - the clock the normalizer and fallback anchor "today" to (`Clock`)

pub mod clock;
pub mod types;

pub use clock::*;
pub use types::*;
