//! Forecast session controller.
//!
//! Owns the only mutable state in the pipeline: `{status, canonical series,
//! advisory, save error, view}`. Every transition replaces that state under a
//! single write lock, so readers always see a consistent snapshot. While a
//! fetch is in flight no series or advisory is visible.
//!
//! Fetch failures and degenerate payloads are substituted with the fallback
//! dataset plus an advisory message; observers never see a terminal failure.
//! Save failures are the exception: they are returned and recorded separately.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::app::pipeline::display;
use crate::data::{FallbackProvider, ForecastStore, PredictionService};
use crate::domain::{
    AugmentedSeries, Clock, ForecastSeries, PeriodUnit, SessionSnapshot, SessionStatus, SystemClock,
};
use crate::error::StoreError;
use crate::io::payload::normalize;
use crate::series::DEFAULT_WINDOW;

/// How a `request` / `reload_saved` call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The payload was usable and is now the canonical series.
    Live,
    /// The fallback dataset was substituted; `advisory` explains why.
    Fallback { advisory: String },
    /// Another fetch was already running; nothing was done.
    InFlight,
    /// The store holds nothing for this subject; state is unchanged.
    NothingSaved,
}

/// Where a fetch reads its payload from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// The prediction service.
    Live,
    /// The forecast store.
    Saved,
}

pub struct ForecastSession {
    service: Box<dyn PredictionService>,
    store: Box<dyn ForecastStore>,
    fallback: FallbackProvider,
    clock: Box<dyn Clock>,
    window: usize,
    state: RwLock<SessionSnapshot>,
}

impl ForecastSession {
    pub fn new(service: impl PredictionService + 'static, store: impl ForecastStore + 'static) -> Self {
        Self {
            service: Box::new(service),
            store: Box::new(store),
            fallback: FallbackProvider::reference(),
            clock: Box::new(SystemClock),
            window: DEFAULT_WINDOW,
            state: RwLock::new(SessionSnapshot::default()),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackProvider) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Trend/band look-back used for displayed series.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn with_view(self, view: PeriodUnit) -> Self {
        self.write().view = view;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    pub fn fetch(&self, subject: &str, source: FetchSource) -> FetchOutcome {
        match source {
            FetchSource::Live => self.request(subject),
            FetchSource::Saved => self.reload_saved(subject),
        }
    }

    /// Ask the prediction service for a fresh forecast.
    pub fn request(&self, subject: &str) -> FetchOutcome {
        let Some(guard) = self.begin_fetch() else {
            debug!(subject, "prediction already in flight, ignoring request");
            return FetchOutcome::InFlight;
        };

        let fetched = self
            .service
            .predict(subject)
            .map_err(|e| format!("Prediction failed: {e}. Using fallback data."));
        self.settle(guard, subject, FetchSource::Live, fetched)
    }

    /// Show the last saved forecast instead of computing a new one.
    pub fn reload_saved(&self, subject: &str) -> FetchOutcome {
        let Some(guard) = self.begin_fetch() else {
            debug!(subject, "fetch already in flight, ignoring reload");
            return FetchOutcome::InFlight;
        };

        let fetched = match self.store.load(subject) {
            Ok(Some(raw)) => Ok(raw),
            Ok(None) => {
                info!(subject, "no saved forecast");
                // Dropping the guard restores the previous state.
                return FetchOutcome::NothingSaved;
            }
            Err(e) => Err(format!("Loading saved forecast failed: {e}. Using fallback data.")),
        };
        self.settle(guard, subject, FetchSource::Saved, fetched)
    }

    /// Change the displayed granularity. Never re-fetches.
    pub fn set_view_mode(&self, view: PeriodUnit) -> Option<AugmentedSeries> {
        let canonical = {
            let mut state = self.write();
            state.view = view;
            state.canonical.clone()
        };
        canonical.map(|c| display(&c, view, self.window))
    }

    /// The held series resampled to the current view, with trend and band.
    pub fn displayed(&self) -> Option<AugmentedSeries> {
        let (canonical, view) = {
            let state = self.read();
            (state.canonical.clone(), state.view)
        };
        canonical.map(|c| display(&c, view, self.window))
    }

    /// Persist a canonical daily series.
    ///
    /// There is no fallback for saving: failures are returned and recorded in
    /// `save_error`, leaving the advisory channel and the held series untouched.
    /// Fallback data is never persisted, so a reload can't pass it off as live.
    pub fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError> {
        let result = if series.period_unit != PeriodUnit::Day {
            Err(StoreError::NotCanonical(series.period_unit.label()))
        } else if series.degraded {
            Err(StoreError::Degraded)
        } else {
            self.store.save(subject, series)
        };
        self.record_save(subject, result)
    }

    /// Persist the currently held canonical series.
    pub fn save_current(&self, subject: &str) -> Result<(), StoreError> {
        let canonical = self.read().canonical.clone();
        match canonical {
            Some(series) => self.save(subject, &series),
            None => self.record_save(subject, Err(StoreError::NothingToSave)),
        }
    }

    fn record_save(&self, subject: &str, result: Result<(), StoreError>) -> Result<(), StoreError> {
        let mut state = self.write();
        match &result {
            Ok(()) => state.save_error = None,
            Err(e) => {
                error!(subject, error = %e, "saving forecast failed");
                state.save_error = Some(e.to_string());
            }
        }
        result
    }

    fn begin_fetch(&self) -> Option<InFlight<'_>> {
        let mut state = self.write();
        if state.status == SessionStatus::Requesting {
            return None;
        }
        let previous = Prior {
            status: state.status,
            canonical: state.canonical.take(),
            advisory: state.advisory.take(),
        };
        state.status = SessionStatus::Requesting;
        Some(InFlight {
            session: self,
            restore: Some(previous),
        })
    }

    /// The one place a fetch result becomes session state.
    fn settle(
        &self,
        mut guard: InFlight<'_>,
        subject: &str,
        source: FetchSource,
        fetched: Result<Value, String>,
    ) -> FetchOutcome {
        let today = self.clock.today();

        let (series, advisory) = match fetched {
            Ok(raw) => {
                let series = normalize(&raw, today);
                if series.is_degenerate() {
                    let advisory = match source {
                        FetchSource::Live => "Prediction service returned no usable values (empty or all zero). Using fallback data.",
                        FetchSource::Saved => "Saved forecast has no usable values (empty or all zero). Using fallback data.",
                    };
                    warn!(subject, values = series.len(), "degenerate forecast, substituting fallback");
                    (self.fallback.get(today), Some(advisory.to_string()))
                } else {
                    info!(subject, values = series.len(), ?source, "forecast loaded");
                    (series, None)
                }
            }
            Err(advisory) => {
                warn!(subject, ?source, %advisory, "fetch failed, substituting fallback");
                (self.fallback.get(today), Some(advisory))
            }
        };

        let outcome = match &advisory {
            None => FetchOutcome::Live,
            Some(advisory) => FetchOutcome::Fallback {
                advisory: advisory.clone(),
            },
        };

        let mut state = self.write();
        state.status = SessionStatus::Succeeded;
        state.canonical = Some(series);
        state.advisory = advisory;
        guard.restore = None;
        outcome
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The part of the state a fetch clears on entry.
struct Prior {
    status: SessionStatus,
    canonical: Option<ForecastSeries>,
    advisory: Option<String>,
}

/// Marks a fetch in progress; puts the prior state back unless settled.
struct InFlight<'a> {
    session: &'a ForecastSession,
    restore: Option<Prior>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(prior) = self.restore.take() {
            let mut state = self.session.write();
            state.status = prior.status;
            state.canonical = prior.canonical;
            state.advisory = prior.advisory;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, mpsc};
    use std::thread;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::FixedClock;
    use crate::error::ServiceError;
    use crate::io::payload::to_payload;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    struct Scripted(Result<Value, ServiceError>);

    impl PredictionService for Scripted {
        fn predict(&self, _subject: &str) -> Result<Value, ServiceError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<HashMap<String, Value>>,
        fail_load: bool,
        fail_save: bool,
    }

    impl ForecastStore for MemoryStore {
        fn load(&self, subject: &str) -> Result<Option<Value>, StoreError> {
            if self.fail_load {
                return Err(StoreError::Status(502));
            }
            Ok(self.saved.lock().unwrap().get(subject).cloned())
        }

        fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError> {
            if self.fail_save {
                return Err(StoreError::Status(500));
            }
            self.saved
                .lock()
                .unwrap()
                .insert(subject.to_string(), to_payload(series));
            Ok(())
        }
    }

    fn session(service: Scripted, store: MemoryStore) -> ForecastSession {
        ForecastSession::new(service, store)
            .with_clock(FixedClock(today()))
            .with_fallback(FallbackProvider::new(vec![9.0, 8.0, 7.0], Some("fallback".into())))
    }

    /// Put a settled fallback series in place, as a failed earlier fetch would.
    fn hold_fallback(s: &ForecastSession) -> SessionSnapshot {
        let mut state = s.write();
        state.status = SessionStatus::Succeeded;
        state.canonical = Some(s.fallback.get(today()));
        state.advisory = Some("Prediction failed: earlier. Using fallback data.".into());
        state.clone()
    }

    fn live(values: Value) -> Scripted {
        Scripted(Ok(json!({"predictions": values, "start_date": "2019-01-01"})))
    }

    #[test]
    fn starts_idle_without_data() {
        let s = session(live(json!([1.0])), MemoryStore::default());
        let snap = s.snapshot();
        assert_eq!(snap.status, SessionStatus::Idle);
        assert!(snap.canonical.is_none() && s.displayed().is_none());
    }

    #[test]
    fn live_payload_becomes_canonical() {
        let s = session(live(json!([1.0, 2.0, 3.0])), MemoryStore::default());
        assert_eq!(s.request("p-1"), FetchOutcome::Live);

        let snap = s.snapshot();
        assert_eq!(snap.status, SessionStatus::Succeeded);
        assert_eq!(snap.advisory, None);
        let canonical = snap.canonical.unwrap();
        assert_eq!(canonical.values, vec![1.0, 2.0, 3.0]);
        assert!(!canonical.degraded);
    }

    #[test]
    fn service_error_substitutes_fallback_with_advisory() {
        let s = session(Scripted(Err(ServiceError::Status(500))), MemoryStore::default());
        let outcome = s.request("p-1");

        let snap = s.snapshot();
        assert_eq!(snap.status, SessionStatus::Succeeded);
        assert_eq!(
            snap.advisory.as_deref(),
            Some("Prediction failed: HTTP error! status: 500. Using fallback data.")
        );
        assert_eq!(outcome, FetchOutcome::Fallback { advisory: snap.advisory.clone().unwrap() });
        let canonical = snap.canonical.unwrap();
        assert!(canonical.degraded);
        assert_eq!(canonical.values, vec![9.0, 8.0, 7.0]);
        assert_eq!(canonical.start_date, today());
    }

    #[test]
    fn all_zero_payload_substitutes_fallback() {
        let s = session(live(json!([0, 0, 0, 0])), MemoryStore::default());
        assert!(matches!(s.request("p-1"), FetchOutcome::Fallback { .. }));

        let snap = s.snapshot();
        assert!(snap.is_degraded());
        assert!(snap.advisory.unwrap().contains("no usable values"));
    }

    #[test]
    fn live_success_clears_previous_advisory() {
        let s = session(Scripted(Err(ServiceError::Transport("refused".into()))), MemoryStore::default());
        s.request("p-1");
        assert!(s.snapshot().advisory.is_some());

        let s = ForecastSession {
            service: Box::new(live(json!([5.0]))),
            ..s
        };
        assert_eq!(s.request("p-1"), FetchOutcome::Live);
        assert_eq!(s.snapshot().advisory, None);
        assert!(!s.snapshot().is_degraded());
    }

    #[test]
    fn view_mode_resamples_without_refetching() {
        let calls = Arc::new(AtomicUsize::new(0));

        struct Counting(Arc<AtomicUsize>);
        impl PredictionService for Counting {
            fn predict(&self, _subject: &str) -> Result<Value, ServiceError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(json!({"predictions": vec![1.0; 14], "start_date": "2019-01-01"}))
            }
        }

        let s = ForecastSession::new(Counting(calls.clone()), MemoryStore::default())
            .with_clock(FixedClock(today()));
        s.request("p-1");

        let weekly = s.set_view_mode(PeriodUnit::Week).unwrap();
        assert_eq!(weekly.series.values, vec![7.0, 7.0]);
        assert_eq!(weekly.trend.len(), 2);

        let daily = s.set_view_mode(PeriodUnit::Day).unwrap();
        assert_eq!(daily.series.values.len(), 14);
        assert_eq!(s.snapshot().view, PeriodUnit::Day);

        // Canonical stays daily regardless of view.
        s.set_view_mode(PeriodUnit::Month);
        assert_eq!(s.snapshot().canonical.unwrap().period_unit, PeriodUnit::Day);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_request_is_rejected_while_in_flight() {
        struct Gated {
            entered: Mutex<mpsc::Sender<()>>,
            release: Mutex<mpsc::Receiver<()>>,
            calls: AtomicUsize,
        }
        impl PredictionService for Gated {
            fn predict(&self, _subject: &str) -> Result<Value, ServiceError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.entered.lock().unwrap().send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
                Ok(json!([1.0, 2.0]))
            }
        }

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let service = Gated {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
            calls: AtomicUsize::new(0),
        };
        let s = ForecastSession::new(service, MemoryStore::default()).with_clock(FixedClock(today()));
        hold_fallback(&s);
        let s = Arc::new(s);

        let worker = {
            let s = Arc::clone(&s);
            thread::spawn(move || s.request("p-1"))
        };
        entered_rx.recv().unwrap();

        // Nothing from the previous fetch is visible while requesting.
        let in_flight = s.snapshot();
        assert!(in_flight.is_loading());
        assert_eq!(in_flight.canonical, None);
        assert_eq!(in_flight.advisory, None);
        assert_eq!(s.displayed(), None);

        assert_eq!(s.request("p-1"), FetchOutcome::InFlight);
        assert_eq!(s.reload_saved("p-1"), FetchOutcome::InFlight);

        release_tx.send(()).unwrap();
        assert_eq!(worker.join().unwrap(), FetchOutcome::Live);
        let settled = s.snapshot();
        assert_eq!(settled.status, SessionStatus::Succeeded);
        assert_eq!(settled.canonical.unwrap().values, vec![1.0, 2.0]);
        assert_eq!(settled.advisory, None);
    }

    #[test]
    fn panicking_service_restores_previous_state() {
        struct Exploding;
        impl PredictionService for Exploding {
            fn predict(&self, _subject: &str) -> Result<Value, ServiceError> {
                panic!("service client bug");
            }
        }

        let s = ForecastSession::new(Exploding, MemoryStore::default())
            .with_clock(FixedClock(today()))
            .with_fallback(FallbackProvider::new(vec![9.0, 8.0, 7.0], None));
        let before = hold_fallback(&s);

        let result = panic::catch_unwind(AssertUnwindSafe(|| s.request("p-1")));
        assert!(result.is_err());

        let after = s.snapshot();
        assert_ne!(after.status, SessionStatus::Requesting);
        assert_eq!(after, before);
        // A new fetch is accepted again.
        assert_eq!(s.reload_saved("p-1"), FetchOutcome::NothingSaved);
    }

    #[test]
    fn reload_with_nothing_saved_restores_held_series() {
        let s = session(live(json!([1.0])), MemoryStore::default());
        let before = hold_fallback(&s);

        assert_eq!(s.reload_saved("p-1"), FetchOutcome::NothingSaved);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn fallback_data_is_never_saved() {
        let s = session(Scripted(Err(ServiceError::Status(503))), MemoryStore::default());
        assert!(matches!(s.request("p-1"), FetchOutcome::Fallback { .. }));

        assert_eq!(s.save_current("p-1"), Err(StoreError::Degraded));
        assert_eq!(
            s.snapshot().save_error.as_deref(),
            Some("refusing to save fallback data; only live forecasts can be saved")
        );

        // Nothing reached the store, so a reload can't resurface it as live.
        assert_eq!(s.reload_saved("p-1"), FetchOutcome::NothingSaved);
        let snap = s.snapshot();
        assert!(snap.is_degraded());
        assert!(snap.advisory.is_some());
    }

    #[test]
    fn reload_with_nothing_saved_stays_idle() {
        let s = session(live(json!([1.0])), MemoryStore::default());
        assert_eq!(s.reload_saved("p-1"), FetchOutcome::NothingSaved);

        let snap = s.snapshot();
        assert_eq!(snap.status, SessionStatus::Idle);
        assert!(snap.canonical.is_none() && snap.advisory.is_none());
    }

    #[test]
    fn fetch_dispatches_on_source() {
        let s = session(live(json!([1.0, 2.0])), MemoryStore::default());
        assert_eq!(s.fetch("p-1", FetchSource::Saved), FetchOutcome::NothingSaved);
        assert_eq!(s.fetch("p-1", FetchSource::Live), FetchOutcome::Live);
        assert_eq!(s.snapshot().canonical.unwrap().values, vec![1.0, 2.0]);
    }

    #[test]
    fn reload_normalizes_saved_payload() {
        let store = MemoryStore::default();
        store.saved.lock().unwrap().insert(
            "p-1".into(),
            json!({"forecast": {"predictionData": [4.0, 5.0], "startDate": "2020-05-01"}}),
        );
        let s = session(live(json!([1.0])), store);

        assert_eq!(s.reload_saved("p-1"), FetchOutcome::Live);
        let canonical = s.snapshot().canonical.unwrap();
        assert_eq!(canonical.values, vec![4.0, 5.0]);
        assert_eq!(canonical.start_date, NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
    }

    #[test]
    fn reload_failure_substitutes_fallback() {
        let store = MemoryStore {
            fail_load: true,
            ..MemoryStore::default()
        };
        let s = session(live(json!([1.0])), store);
        assert!(matches!(s.reload_saved("p-1"), FetchOutcome::Fallback { .. }));
        assert!(s.snapshot().is_degraded());
    }

    #[test]
    fn save_round_trips_through_reload() {
        let s = session(live(json!([1.5, 2.5])), MemoryStore::default());
        s.request("p-1");
        s.save_current("p-1").unwrap();
        assert_eq!(s.snapshot().save_error, None);

        assert_eq!(s.reload_saved("p-1"), FetchOutcome::Live);
        assert_eq!(s.snapshot().canonical.unwrap().values, vec![1.5, 2.5]);
    }

    #[test]
    fn save_failure_is_visible_and_not_degraded() {
        let store = MemoryStore {
            fail_save: true,
            ..MemoryStore::default()
        };
        let s = session(live(json!([1.0, 2.0])), store);
        s.request("p-1");

        let err = s.save_current("p-1").unwrap_err();
        assert_eq!(err, StoreError::Status(500));

        let snap = s.snapshot();
        assert_eq!(snap.save_error.as_deref(), Some("storage returned status 500"));
        assert_eq!(snap.advisory, None);
        assert!(!snap.is_degraded());
    }

    #[test]
    fn only_daily_series_can_be_saved() {
        let s = session(live(json!(vec![1.0; 14])), MemoryStore::default());
        s.request("p-1");
        let weekly = s.set_view_mode(PeriodUnit::Week).unwrap();

        assert_eq!(s.save("p-1", &weekly.series), Err(StoreError::NotCanonical("weekly")));
        assert!(s.snapshot().save_error.is_some());
    }

    #[test]
    fn saving_without_data_fails_loudly() {
        let s = session(live(json!([1.0])), MemoryStore::default());
        assert_eq!(s.save_current("p-1"), Err(StoreError::NothingToSave));
    }
}
