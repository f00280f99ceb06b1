//! Prediction payload normalization.
//!
//! This module is responsible for turning whatever the prediction service (or
//! the forecast store) hands back into a canonical daily `ForecastSeries`.
//!
//! Design goals:
//! - **Explicit alias tables**: each field lists the names it may appear under,
//!   in priority order; the first alias holding a value of the right shape wins
//! - **Total**: normalization never fails; missing fields fall back to defaults
//! - **Positional**: bad elements are zeroed, not dropped, so derived dates stay aligned

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::domain::{ForecastSeries, PeriodUnit};

const VALUE_KEYS: &[&str] = &["predictions", "predictionData", "output"];
const START_KEYS: &[&str] = &["start_date", "startDate"];
const END_KEYS: &[&str] = &["end_date", "endDate"];
const DATE_LABEL_KEYS: &[&str] = &["dates"];
const ANALYSIS_KEYS: &[&str] = &["analysis"];
const MONTHLY_KEYS: &[&str] = &["monthlyAggregates", "monthly_aggregates"];

/// Saved forecasts are sometimes returned wrapped in one of these keys.
const ENVELOPE_KEYS: &[&str] = &["forecast"];

/// Normalize a raw payload into a canonical daily series.
///
/// `today` is the start date used when the payload carries none.
pub fn normalize(raw: &Value, today: NaiveDate) -> ForecastSeries {
    let fields = match raw {
        // Older service versions answer with a bare array of predictions.
        Value::Array(items) => {
            return ForecastSeries::daily(numeric_values(items), today);
        }
        Value::Object(map) => unwrap_envelope(map),
        other => {
            warn!(kind = json_kind(other), "prediction payload is not an object or array");
            return ForecastSeries::daily(Vec::new(), today);
        }
    };

    let values = first_match(fields, VALUE_KEYS, Value::as_array)
        .map(|items| numeric_values(items))
        .unwrap_or_default();

    let start_date = first_match(fields, START_KEYS, parse_date_value).unwrap_or(today);
    let end_date = first_match(fields, END_KEYS, parse_date_value);

    let dates = first_match(fields, DATE_LABEL_KEYS, |v| date_labels(v, values.len()));

    let analysis = first_match(fields, ANALYSIS_KEYS, |v| match v {
        Value::String(s) => Some(unwrap_analysis(s)),
        Value::Null => None,
        other => Some(other.to_string()),
    });

    let monthly_aggregates = first_match(fields, MONTHLY_KEYS, |v| {
        v.as_array()
            .filter(|items| !items.is_empty())
            .map(|items| numeric_values(items))
    });

    debug!(
        values = values.len(),
        %start_date,
        labels = dates.is_some(),
        monthly = monthly_aggregates.as_ref().map_or(0, Vec::len),
        "normalized prediction payload"
    );

    ForecastSeries {
        values,
        start_date,
        period_unit: PeriodUnit::Day,
        end_date,
        analysis,
        monthly_aggregates,
        dates,
        calendar_aligned: false,
        degraded: false,
    }
}

/// Write a canonical series back into the primary alias names.
///
/// `normalize(&to_payload(s), _)` reproduces `s` for any daily, non-degraded series.
pub fn to_payload(series: &ForecastSeries) -> Value {
    let mut map = Map::new();
    map.insert("predictions".into(), json!(series.values));
    map.insert("start_date".into(), json!(series.start_date.to_string()));
    if let Some(end) = series.end_date {
        map.insert("end_date".into(), json!(end.to_string()));
    }
    if let Some(labels) = &series.dates {
        map.insert("dates".into(), json!(labels));
    }
    if let Some(analysis) = &series.analysis {
        map.insert("analysis".into(), json!(analysis));
    }
    if let Some(monthly) = &series.monthly_aggregates {
        map.insert("monthlyAggregates".into(), json!(monthly));
    }
    Value::Object(map)
}

/// Extract the `response` text from a tagged JSON wrapper.
///
/// The service sometimes returns its commentary as e.g. `json\n{"response": "..."}`.
/// Anything that does not match that shape exactly is returned unchanged.
pub fn unwrap_analysis(raw: &str) -> String {
    try_unwrap_analysis(raw).unwrap_or_else(|| raw.to_string())
}

fn try_unwrap_analysis(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let brace = trimmed.find('{')?;

    let tag = trimmed[..brace].trim().trim_start_matches("```");
    if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return None;
    }

    let body = trimmed[brace..].trim_end().trim_end_matches("```").trim_end();
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("response")? {
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

fn unwrap_envelope(map: &Map<String, Value>) -> &Map<String, Value> {
    if VALUE_KEYS.iter().any(|k| map.contains_key(*k)) {
        return map;
    }
    ENVELOPE_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_object))
        .unwrap_or(map)
}

fn first_match<'a, T>(
    map: &'a Map<String, Value>,
    keys: &[&str],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find_map(extract)
}

fn numeric_values(items: &[Value]) -> Vec<f64> {
    let mut rejected = 0usize;
    let values: Vec<f64> = items
        .iter()
        .map(|item| {
            parse_number(item).unwrap_or_else(|| {
                rejected += 1;
                0.0
            })
        })
        .collect();
    if rejected > 0 {
        warn!(rejected, total = items.len(), "non-numeric prediction values replaced with 0");
    }
    values
}

fn parse_number(item: &Value) -> Option<f64> {
    let v = match item {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    parse_date(value.as_str()?)
}

/// Parse `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn date_labels(value: &Value, expected: usize) -> Option<Vec<String>> {
    let items = value.as_array()?;
    if items.len() != expected || expected == 0 {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
