use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openmeteo::{
    project, transform_series, Cadence, ForecastParams, RawForecastResponse, DAILY_VARIABLES,
    HOURLY_VARIABLES,
};
use serde_json::{json, Map, Value};

const HOURS: usize = 16 * 24;
const DAYS: usize = 16;

fn columns(names: &[&str], rows: usize, start: i64, step: i64) -> Value {
    let mut block = Map::new();
    block.insert(
        "time".into(),
        json!((0..rows).map(|i| start + i as i64 * step).collect::<Vec<_>>()),
    );
    for (c, name) in names.iter().enumerate() {
        let values: Vec<Value> = (0..rows)
            .map(|i| match i % 17 {
                0 => Value::Null,
                _ => json!(i as f64 * 0.1 + c as f64),
            })
            .collect();
        block.insert(name.to_string(), Value::Array(values));
    }
    Value::Object(block)
}

/// A 16-day forecast with every hourly and daily variable.
fn payload() -> Value {
    json!({
        "latitude": 45.41,
        "longitude": -75.70,
        "elevation": 70.0,
        "generationtime_ms": 1.2,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "hourly": columns(HOURLY_VARIABLES, HOURS, 1_760_000_000, 3_600),
        "daily": columns(DAILY_VARIABLES, DAYS, 1_759_968_000, 86_400),
    })
}

fn bench_forecast(c: &mut Criterion) {
    let body = payload();
    let raw = RawForecastResponse::from_value(body.clone()).expect("valid payload");
    let hourly = raw.hourly.clone().expect("hourly block");
    let request = ForecastParams::builder()
        .latitude(45.41)
        .longitude(-75.70)
        .hourly(HOURLY_VARIABLES.iter().map(|s| s.to_string()).collect())
        .daily(DAILY_VARIABLES.iter().map(|s| s.to_string()).collect())
        .build()
        .validate()
        .expect("valid parameters");

    c.bench_function("transform_series_hourly", |b| {
        b.iter(|| transform_series(black_box(&hourly), Cadence::Hourly))
    });
    c.bench_function("validate_and_project", |b| {
        b.iter(|| {
            let raw = RawForecastResponse::from_value(black_box(body.clone())).expect("valid payload");
            project(&request, raw)
        })
    });
}

criterion_group!(benches, bench_forecast);
criterion_main!(benches);
