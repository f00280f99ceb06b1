//! Shared "display pipeline" used by the session controller and the CLI.
//!
//! Keeping this in one place avoids re-deriving the displayed series ad hoc:
//! canonical daily series -> resample to the view unit -> trend & band
//!
//! Front-ends only choose the view unit and window; they never hold resampled
//! series as state.

use crate::domain::{AugmentedSeries, ForecastSeries, PeriodUnit, SessionSnapshot};
use crate::report::{ForecastSummary, summarize};
use crate::series::{augment, resample};

/// Resample the canonical series to `view` and attach trend and band.
pub fn display(canonical: &ForecastSeries, view: PeriodUnit, window: usize) -> AugmentedSeries {
    augment(&resample(canonical, view), window)
}

/// Everything a front-end needs to render one session state.
#[derive(Debug, Clone)]
pub struct DisplayOutput {
    pub snapshot: SessionSnapshot,
    pub displayed: Option<AugmentedSeries>,
    pub summary: Option<ForecastSummary>,
}

impl DisplayOutput {
    pub fn from_snapshot(snapshot: SessionSnapshot, window: usize) -> Self {
        let displayed = snapshot
            .canonical
            .as_ref()
            .map(|canonical| display(canonical, snapshot.view, window));
        let summary = snapshot.canonical.as_ref().map(summarize);
        Self {
            snapshot,
            displayed,
            summary,
        }
    }
}
