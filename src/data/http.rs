//! HTTP adapters for the prediction and storage services.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::data::{ForecastStore, PredictionService};
use crate::domain::ForecastSeries;
use crate::error::{AppError, ServiceError, StoreError};
use crate::io::payload::to_payload;

fn build_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))
}

fn with_token(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

/// `POST`s a subject id to the prediction endpoint.
pub struct HttpPredictionClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpPredictionClient {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            url: config.predict_url.clone(),
            token: config.api_token.clone(),
        })
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, subject: &str) -> Result<Value, ServiceError> {
        info!(subject, url = %self.url, "requesting prediction");

        let req = self.client.post(&self.url).json(&json!({ "productId": subject }));
        let resp = with_token(req, self.token.as_deref())
            .send()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ServiceError::Status(resp.status().as_u16()));
        }

        let body: Value = resp
            .json()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        debug!(subject, "prediction payload received");
        Ok(body)
    }
}

/// Reads and writes saved forecasts at `<base_url>/<subject>`.
pub struct HttpForecastStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpForecastStore {
    pub fn new(config: &ServiceConfig, base_url: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            base_url: base_url.into(),
            token: config.api_token.clone(),
        })
    }

    fn subject_url(&self, subject: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), subject)
    }
}

fn check_status(resp: Response) -> Result<Response, StoreError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(StoreError::Status(resp.status().as_u16()))
    }
}

impl ForecastStore for HttpForecastStore {
    fn load(&self, subject: &str) -> Result<Option<Value>, StoreError> {
        let url = self.subject_url(subject);
        debug!(subject, %url, "fetching saved forecast");

        let resp = with_token(self.client.get(&url), self.token.as_deref())
            .send()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: Value = check_status(resp)?
            .json()
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        Ok(match body {
            Value::Null => None,
            other => Some(other),
        })
    }

    fn save(&self, subject: &str, series: &ForecastSeries) -> Result<(), StoreError> {
        let url = self.subject_url(subject);
        let req = self.client.put(&url).json(&to_payload(series));

        let resp = with_token(req, self.token.as_deref())
            .send()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        check_status(resp)?;

        info!(subject, values = series.len(), "forecast saved");
        Ok(())
    }
}
