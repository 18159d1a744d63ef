//! Row-oriented forecast records produced from the provider's columnar blocks.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::iter;
use std::sync::Arc;

/// One time-indexed row of forecast data.
///
/// Every record of a cadence carries the same field names, namely every column
/// the provider returned for that cadence. A field's value is `None` when the
/// provider had no value at this position, either because it sent `null` or
/// because its column was shorter than the time axis.
///
/// Serializes to a flat JSON object: `{"time": <ms>, "<name>": <value|null>, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRecord {
    time: i64,
    names: Arc<[String]>,
    values: Vec<Option<f64>>,
}

impl TimeRecord {
    pub(crate) fn new(time: i64, names: Arc<[String]>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            time,
            names,
            values,
        }
    }

    /// Unix timestamp of this row, in milliseconds.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// The row's timestamp as a UTC datetime, if it is within chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// The value of field `name`.
    ///
    /// Returns `None` both when the field does not exist and when it exists
    /// without a value; use [`TimeRecord::contains`] to tell them apart.
    pub fn get(&self, name: impl AsRef<str>) -> Option<f64> {
        let name = name.as_ref();
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values[i])
    }

    /// Whether this record carries a field called `name` (regardless of its value).
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        self.names.iter().any(|n| n == name)
    }

    /// Field names in payload order, excluding `time`.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// All keys of the record as it serializes, starting with `time`.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        iter::once("time").chain(self.field_names())
    }

    /// `(name, value)` pairs in payload order, excluding `time`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.field_names().zip(self.values.iter().copied())
    }

    /// Number of fields, excluding `time`.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Serialize for TimeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len() + 1))?;
        map.serialize_entry("time", &self.time)?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn record() -> TimeRecord {
        let names: Arc<[String]> = vec!["temperature_2m".to_string(), "cloud_cover".to_string()].into();
        TimeRecord::new(1_760_000_400_000, names, vec![Some(11.5), None])
    }

    #[test]
    fn test_accessors() {
        let record = record();
        assert_eq!(record.time(), 1_760_000_400_000);
        assert_eq!(record.get("temperature_2m"), Some(11.5));
        assert_eq!(record.get("cloud_cover"), None);
        assert!(record.contains("cloud_cover"));
        assert!(!record.contains("rain"));
        assert_eq!(record.len(), 2);
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            ["time", "temperature_2m", "cloud_cover"]
        );
    }

    #[test]
    fn test_datetime() {
        let datetime = record().datetime().unwrap();
        assert_eq!(datetime.year(), 2025);
        assert_eq!(datetime.timestamp_millis(), 1_760_000_400_000);
    }

    #[test]
    fn test_serializes_flat_with_nulls() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(
            value,
            json!({"time": 1_760_000_400_000_i64, "temperature_2m": 11.5, "cloud_cover": null})
        );
    }
}
