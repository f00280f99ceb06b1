//! File-backed forecast storage.
//!
//! One JSON file per subject (`<dir>/<subject>.json`) holding the same payload
//! shape the storage service speaks, so reloading goes through the normal
//! payload normalizer.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::data::ForecastStore;
use crate::domain::ForecastSeries;
use crate::error::StoreError;
use crate::io::payload::to_payload;

#[derive(Debug, Clone)]
pub struct FileForecastStore {
    dir: PathBuf,
}

impl FileForecastStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path for a subject. Path separators in the id are replaced so every
    /// subject stays inside `dir`.
    pub fn path_for(&self, subject: &str) -> PathBuf {
        let safe: String = subject
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == ':' { '_' } else { c })
            .collect();
        let safe = if safe.is_empty() || safe.chars().all(|c| c == '.') {
            format!("_{safe}")
        } else {
            safe
        };
        self.dir.join(format!("{safe}.json"))
    }
}

impl ForecastStore for FileForecastStore {
    fn load(&self, subject: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(subject);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved forecast");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to open saved forecast '{}': {e}",
                    path.display()
                )));
            }
        };

        let payload: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            StoreError::Encode(format!("Invalid saved forecast '{}': {e}", path.display()))
        })?;
        Ok(Some(payload))
    }

    fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError::Io(format!("Failed to create store dir '{}': {e}", self.dir.display()))
        })?;

        let path = self.path_for(subject);
        let file = File::create(&path).map_err(|e| {
            StoreError::Io(format!("Failed to create saved forecast '{}': {e}", path.display()))
        })?;

        serde_json::to_writer_pretty(file, &to_payload(series))
            .map_err(|e| StoreError::Encode(format!("Failed to write saved forecast: {e}")))?;

        info!(subject, path = %path.display(), values = series.len(), "forecast saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::io::payload::normalize;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn missing_file_means_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileForecastStore::new(dir.path());
        assert_eq!(store.load("p-1").unwrap(), None);
    }

    #[test]
    fn saved_series_reloads_through_normalizer() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileForecastStore::new(dir.path().join("nested"));

        let mut series = ForecastSeries::daily(vec![4.0, 5.5], NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        series.analysis = Some("ok".into());
        store.save("p-1", &series).unwrap();

        let raw = store.load("p-1").unwrap().unwrap();
        assert_eq!(normalize(&raw, today()), series);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileForecastStore::new(dir.path());
        fs::write(store.path_for("p-1"), "{not json").unwrap();
        assert!(matches!(store.load("p-1"), Err(StoreError::Encode(_))));
    }

    #[test]
    fn subject_ids_cannot_escape_the_dir() {
        let store = FileForecastStore::new("/data");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/data/.._etc_passwd.json"));
        assert_eq!(store.path_for(".."), PathBuf::from("/data/_...json"));
    }
}
