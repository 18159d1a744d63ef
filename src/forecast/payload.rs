//! Validation of the provider's raw columnar payload.
//!
//! The schema is derived from the variable catalog: every known variable of a
//! cadence is an optional column, the time axis is mandatory, and anything the
//! catalog does not know about is ignored so newer provider versions keep
//! working.

use crate::forecast::error::PayloadValidationError;
use crate::types::cadence::Cadence;
use log::debug;
use serde_json::{Map, Value};

/// Unit strings keyed by field name, in payload order. Every value is a JSON string.
pub type UnitMap = Map<String, Value>;

/// One named column of a series block. `None` entries were `null` in the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// A validated hourly or daily block: the time axis in Unix seconds plus
/// every catalog column the provider sent, in payload order.
///
/// Columns may be shorter than the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeriesBlock {
    pub time: Vec<f64>,
    pub columns: Vec<RawColumn>,
}

/// A validated current-conditions block.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCurrentBlock {
    pub time: f64,
    pub interval: f64,
    pub values: Vec<(String, f64)>,
}

/// The provider response after structural validation, before reshaping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i64,
    pub generationtime_ms: f64,
    pub hourly: Option<RawSeriesBlock>,
    pub hourly_units: Option<UnitMap>,
    pub daily: Option<RawSeriesBlock>,
    pub daily_units: Option<UnitMap>,
    pub current: Option<RawCurrentBlock>,
    pub current_units: Option<UnitMap>,
}

impl RawForecastResponse {
    /// Validates a decoded response body.
    ///
    /// Fails when a location/timezone field is missing, when a present
    /// cadence block has no time axis, or when a known column has the wrong
    /// shape. Missing columns are not an error: the provider simply did not
    /// return them.
    pub fn from_value(value: Value) -> Result<Self, PayloadValidationError> {
        let Value::Object(root) = value else {
            return Err(PayloadValidationError::NotAnObject);
        };

        let response = RawForecastResponse {
            latitude: required_number(&root, "latitude")?,
            longitude: required_number(&root, "longitude")?,
            elevation: required_number(&root, "elevation")?,
            timezone: required_string(&root, "timezone")?,
            timezone_abbreviation: required_string(&root, "timezone_abbreviation")?,
            utc_offset_seconds: required_integer(&root, "utc_offset_seconds")?,
            generationtime_ms: required_number(&root, "generationtime_ms")?,
            hourly: optional_block(&root, Cadence::Hourly, series_block)?,
            hourly_units: optional_units(&root, Cadence::Hourly)?,
            daily: optional_block(&root, Cadence::Daily, series_block)?,
            daily_units: optional_units(&root, Cadence::Daily)?,
            current: optional_block(&root, Cadence::Current, |value, _| current_block(value))?,
            current_units: optional_units(&root, Cadence::Current)?,
        };

        debug!(
            "Validated forecast payload for ({}, {}): hourly={} daily={} current={}",
            response.latitude,
            response.longitude,
            response.hourly.as_ref().map_or(0, |b| b.columns.len()),
            response.daily.as_ref().map_or(0, |b| b.columns.len()),
            response.current.as_ref().map_or(0, |b| b.values.len()),
        );
        Ok(response)
    }

    /// Parses and validates a raw JSON body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PayloadValidationError> {
        let value = serde_json::from_slice(bytes)
            .map_err(|e| PayloadValidationError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }
}

fn wrong_shape(path: impl Into<String>, expected: &'static str) -> PayloadValidationError {
    PayloadValidationError::WrongShape {
        path: path.into(),
        expected,
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: impl FnOnce() -> String,
) -> Result<&'a Value, PayloadValidationError> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(PayloadValidationError::MissingField(path())),
        Some(value) => Ok(value),
    }
}

fn required_number(root: &Map<String, Value>, key: &str) -> Result<f64, PayloadValidationError> {
    required(root, key, || key.to_string())?
        .as_f64()
        .ok_or_else(|| wrong_shape(key, "a number"))
}

/// Any JSON number with no fractional part, so `3600` and `3600.0` both pass.
fn required_integer(root: &Map<String, Value>, key: &str) -> Result<i64, PayloadValidationError> {
    let value = required(root, key, || key.to_string())?;
    if let Some(integer) = value.as_i64() {
        return Ok(integer);
    }
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
        .ok_or_else(|| wrong_shape(key, "an integer"))
}

fn required_string(root: &Map<String, Value>, key: &str) -> Result<String, PayloadValidationError> {
    required(root, key, || key.to_string())?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_shape(key, "a string"))
}

fn optional_block<T>(
    root: &Map<String, Value>,
    cadence: Cadence,
    parse: impl FnOnce(&Value, Cadence) -> Result<T, PayloadValidationError>,
) -> Result<Option<T>, PayloadValidationError> {
    match root.get(cadence.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value, cadence).map(Some),
    }
}

fn block_object(value: &Value, cadence: Cadence) -> Result<&Map<String, Value>, PayloadValidationError> {
    value
        .as_object()
        .ok_or_else(|| wrong_shape(cadence.as_str(), "an object"))
}

fn series_block(value: &Value, cadence: Cadence) -> Result<RawSeriesBlock, PayloadValidationError> {
    let obj = block_object(value, cadence)?;
    let time_path = || format!("{cadence}.time");

    let time = required(obj, "time", time_path)?
        .as_array()
        .ok_or_else(|| wrong_shape(time_path(), "an array of numbers"))?
        .iter()
        .map(|t| t.as_f64().ok_or_else(|| wrong_shape(time_path(), "an array of numbers")))
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns = Vec::with_capacity(obj.len().saturating_sub(1));
    for (key, column) in obj {
        if key == "time" || !cadence.is_known(key) {
            continue;
        }
        let path = || format!("{cadence}.{key}");
        let expected = "an array of numbers or nulls";
        let values = column
            .as_array()
            .ok_or_else(|| wrong_shape(path(), expected))?
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                other => other.as_f64().map(Some).ok_or_else(|| wrong_shape(path(), expected)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        columns.push(RawColumn {
            name: key.clone(),
            values,
        });
    }

    Ok(RawSeriesBlock { time, columns })
}

fn current_block(value: &Value) -> Result<RawCurrentBlock, PayloadValidationError> {
    let cadence = Cadence::Current;
    let obj = block_object(value, cadence)?;
    let scalar = |key: &str| -> Result<f64, PayloadValidationError> {
        required(obj, key, || format!("{cadence}.{key}"))?
            .as_f64()
            .ok_or_else(|| wrong_shape(format!("{cadence}.{key}"), "a number"))
    };
    let time = scalar("time")?;
    let interval = scalar("interval")?;

    let mut values = Vec::with_capacity(obj.len().saturating_sub(2));
    for (key, value) in obj {
        if key == "time" || key == "interval" || !cadence.is_known(key) {
            continue;
        }
        match value {
            Value::Null => {}
            other => {
                let number = other
                    .as_f64()
                    .ok_or_else(|| wrong_shape(format!("{cadence}.{key}"), "a number or null"))?;
                values.push((key.clone(), number));
            }
        }
    }

    Ok(RawCurrentBlock {
        time,
        interval,
        values,
    })
}

/// Reads a unit block as sent, `time` and `interval` entries included.
fn optional_units(
    root: &Map<String, Value>,
    cadence: Cadence,
) -> Result<Option<UnitMap>, PayloadValidationError> {
    let key = cadence.units_key();
    let Some(value) = root.get(key).filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let units = value
        .as_object()
        .ok_or_else(|| wrong_shape(key, "an object of strings"))?;

    if let Some((name, _)) = units.iter().find(|(_, unit)| !unit.is_string()) {
        return Err(wrong_shape(format!("{key}.{name}"), "a string"));
    }
    Ok(Some(units.clone()))
}
