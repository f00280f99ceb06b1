//! Error taxonomy.
//!
//! Fetch-side failures (`ServiceError`, and `StoreError` while loading) are
//! recovered by the session controller and only ever reach the caller as an
//! advisory string. Save-side `StoreError`s and `AppError`s propagate.

use thiserror::Error;

/// Failure talking to the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Failure talking to the forecast storage service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage request failed: {0}")]
    Transport(String),

    #[error("storage returned status {0}")]
    Status(u16),

    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("failed to encode forecast: {0}")]
    Encode(String),

    /// Only canonical daily series may be persisted.
    #[error("refusing to save a {0} series; only daily forecasts can be saved")]
    NotCanonical(&'static str),

    #[error("no forecast is loaded, nothing to save")]
    NothingToSave,

    #[error("refusing to save fallback data; only live forecasts can be saved")]
    Degraded,
}

/// Top-level error for the `forecast` binary.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("prediction service: {0}")]
    Service(#[from] ServiceError),

    #[error("save failed: {0}")]
    Store(#[from] StoreError),

    #[error("output error: {0}")]
    Output(String),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Store(_) => 3,
            AppError::Service(_) | AppError::Output(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_advisory_wording() {
        assert_eq!(ServiceError::Status(503).to_string(), "HTTP error! status: 503");
        assert_eq!(
            StoreError::NotCanonical("weekly").to_string(),
            "refusing to save a weekly series; only daily forecasts can be saved"
        );
        assert_eq!(
            StoreError::Degraded.to_string(),
            "refusing to save fallback data; only live forecasts can be saved"
        );
    }

    #[test]
    fn exit_codes_separate_config_store_and_service() {
        assert_eq!(AppError::Config("x".into()).exit_code(), 2);
        assert_eq!(AppError::from(StoreError::Status(500)).exit_code(), 3);
        assert_eq!(AppError::from(ServiceError::Transport("x".into())).exit_code(), 4);
    }
}
