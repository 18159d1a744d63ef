//! An in-process stand-in for the forecast provider, used by the test suites.
//!
//! The mock answers `GET /v1/forecast` with a deterministic payload built from
//! the requested variable lists, so tests can check exact keys, lengths and
//! timestamps without touching the network.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// First hourly timestamp of every mock series (2025-10-09 08:53:20 UTC).
pub(crate) const HOURLY_START: i64 = 1_760_000_000;
/// Midnight UTC of the first mock day (2025-10-09).
pub(crate) const DAILY_START: i64 = 1_759_968_000;
pub(crate) const INVALID_KEY_REASON: &str = "The supplied API key is invalid.";

#[derive(Debug, Clone, Default)]
pub(crate) struct MockOptions {
    /// Answer this many requests with 503 before serving data.
    pub transient_failures: usize,
    /// The only API key accepted. Any other key gets a 400.
    pub api_key: Option<&'static str>,
    /// Send the hourly block with an empty time axis.
    pub empty_hourly_axis: bool,
}

#[derive(Clone)]
struct MockState {
    options: MockOptions,
    failures_left: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub(crate) struct MockProvider {
    /// Base URL to configure a client with, ending in `/v1`.
    pub base_url: String,
    state: MockState,
}

impl MockProvider {
    pub async fn start() -> Self {
        Self::start_with(MockOptions::default()).await
    }

    pub async fn start_with(options: MockOptions) -> Self {
        let state = MockState {
            failures_left: Arc::new(AtomicUsize::new(options.transient_failures)),
            options,
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/v1/forecast", get(forecast))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider stopped");
        });
        MockProvider {
            base_url: format!("http://{addr}/v1"),
            state,
        }
    }

    /// Query parameters of every request received so far, oldest first.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn forecast(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(query.clone());

    let failing = state
        .failures_left
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream busy").into_response();
    }

    if let Some(key) = query.get("apikey") {
        if state.options.api_key != Some(key.as_str()) {
            let body = json!({"error": true, "reason": INVALID_KEY_REASON});
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    }

    Json(synthetic_forecast(&query, &state.options)).into_response()
}

fn names(query: &HashMap<String, String>, key: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in query.get(key).map(String::as_str).unwrap_or("").split(',') {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn unit_for(name: &str, query: &HashMap<String, String>) -> &'static str {
    let fahrenheit = query.get("temperature_unit").map(String::as_str) == Some("fahrenheit");
    if name.contains("temperature") || name.starts_with("dew_point") {
        if fahrenheit {
            "°F"
        } else {
            "°C"
        }
    } else if name == "sunrise" || name == "sunset" {
        "unixtime"
    } else if name.contains("cloud_cover")
        || name.contains("humidity")
        || name.contains("probability")
    {
        "%"
    } else if name.contains("wind_speed") || name.contains("wind_gusts") {
        "km/h"
    } else if name.contains("direction") {
        "°"
    } else if name.contains("weather_code") {
        "wmo code"
    } else if name.contains("pressure") {
        "hPa"
    } else if name.contains("duration") || name.contains("visibility") {
        "s"
    } else {
        "mm"
    }
}

fn series_value(index: usize, column: usize) -> f64 {
    (index as f64) * 0.5 + (column as f64)
}

fn synthetic_forecast(query: &HashMap<String, String>, options: &MockOptions) -> Value {
    let number = |key: &str| {
        query
            .get(key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let days = query
        .get("forecast_days")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(7);
    let (timezone, abbreviation, offset) = match query.get("timezone").map(String::as_str) {
        Some("America/Toronto") => ("America/Toronto", "EDT", -14_400),
        Some("Europe/Berlin") => ("Europe/Berlin", "CEST", 7_200),
        _ => ("GMT", "GMT", 0),
    };

    let mut body = Map::new();
    body.insert("latitude".into(), json!(number("latitude")));
    body.insert("longitude".into(), json!(number("longitude")));
    body.insert("generationtime_ms".into(), json!(0.0421));
    body.insert("utc_offset_seconds".into(), json!(offset));
    body.insert("timezone".into(), json!(timezone));
    body.insert("timezone_abbreviation".into(), json!(abbreviation));
    body.insert("elevation".into(), json!(74.0));

    let hourly = names(query, "hourly");
    if !hourly.is_empty() {
        let hours = if options.empty_hourly_axis { 0 } else { days * 24 };
        let mut units = Map::new();
        let mut block = Map::new();
        units.insert("time".into(), json!("unixtime"));
        block.insert(
            "time".into(),
            json!((0..hours)
                .map(|i| HOURLY_START + i as i64 * 3_600)
                .collect::<Vec<_>>()),
        );
        for (column, name) in hourly.iter().enumerate() {
            units.insert(name.clone(), json!(unit_for(name, query)));
            block.insert(
                name.clone(),
                json!((0..hours)
                    .map(|i| series_value(i, column))
                    .collect::<Vec<_>>()),
            );
        }
        body.insert("hourly_units".into(), Value::Object(units));
        body.insert("hourly".into(), Value::Object(block));
    }

    let daily = names(query, "daily");
    if !daily.is_empty() {
        let day_starts: Vec<i64> = (0..days).map(|i| DAILY_START + i as i64 * 86_400).collect();
        let mut units = Map::new();
        let mut block = Map::new();
        units.insert("time".into(), json!("unixtime"));
        block.insert("time".into(), json!(day_starts));
        for (column, name) in daily.iter().enumerate() {
            units.insert(name.clone(), json!(unit_for(name, query)));
            let values: Vec<Value> = match name.as_str() {
                "sunrise" => day_starts.iter().map(|t| json!(t + 6 * 3_600 + 1_800)).collect(),
                "sunset" => day_starts.iter().map(|t| json!(t + 18 * 3_600)).collect(),
                _ => (0..days).map(|i| json!(series_value(i, column))).collect(),
            };
            block.insert(name.clone(), Value::Array(values));
        }
        body.insert("daily_units".into(), Value::Object(units));
        body.insert("daily".into(), Value::Object(block));
    }

    let current = names(query, "current");
    if !current.is_empty() {
        let mut units = Map::new();
        let mut block = Map::new();
        units.insert("time".into(), json!("unixtime"));
        units.insert("interval".into(), json!("seconds"));
        block.insert("time".into(), json!(HOURLY_START - HOURLY_START % 900));
        block.insert("interval".into(), json!(900));
        for (column, name) in current.iter().enumerate() {
            units.insert(name.clone(), json!(unit_for(name, query)));
            block.insert(name.clone(), json!(series_value(1, column)));
        }
        body.insert("current_units".into(), Value::Object(units));
        body.insert("current".into(), Value::Object(block));
    }

    Value::Object(body)
}
