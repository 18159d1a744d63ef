//! Assembly of the final [`ForecastResponse`] from a validated payload.

use crate::forecast::params::ForecastRequest;
use crate::forecast::payload::{RawForecastResponse, RawSeriesBlock, UnitMap};
use crate::forecast::transform::{transform_current, transform_series};
use crate::types::cadence::Cadence;
use crate::types::record::TimeRecord;
use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Data for one cadence together with its unit strings. The two always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    pub data: T,
    pub units: UnitMap,
}

/// Hourly or daily rows.
pub type SeriesSection = Section<Vec<TimeRecord>>;
/// The single current-conditions row.
pub type CurrentSection = Section<TimeRecord>;

/// A forecast reshaped into rows.
///
/// The location and timezone fields are always present. Each cadence section
/// is present only when that cadence was requested with at least one variable
/// *and* the provider returned it with a non-empty time axis; otherwise it is
/// absent entirely (never an empty list).
///
/// Serializes to a flat JSON object in which a present section contributes
/// both `<cadence>` and `<cadence>_units` keys and an absent one contributes
/// neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i64,
    /// Time the provider spent generating the response.
    pub generationtime_ms: f64,
    pub hourly: Option<SeriesSection>,
    pub daily: Option<SeriesSection>,
    pub current: Option<CurrentSection>,
}

impl ForecastResponse {
    pub fn hourly(&self) -> Option<&[TimeRecord]> {
        self.hourly.as_ref().map(|s| s.data.as_slice())
    }

    pub fn hourly_units(&self) -> Option<&UnitMap> {
        self.hourly.as_ref().map(|s| &s.units)
    }

    pub fn daily(&self) -> Option<&[TimeRecord]> {
        self.daily.as_ref().map(|s| s.data.as_slice())
    }

    pub fn daily_units(&self) -> Option<&UnitMap> {
        self.daily.as_ref().map(|s| &s.units)
    }

    pub fn current(&self) -> Option<&TimeRecord> {
        self.current.as_ref().map(|s| &s.data)
    }

    pub fn current_units(&self) -> Option<&UnitMap> {
        self.current.as_ref().map(|s| &s.units)
    }

    /// Whether the section for `cadence` is present.
    pub fn has_section(&self, cadence: Cadence) -> bool {
        match cadence {
            Cadence::Hourly => self.hourly.is_some(),
            Cadence::Daily => self.daily.is_some(),
            Cadence::Current => self.current.is_some(),
        }
    }
}

impl Serialize for ForecastResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections = [
            self.hourly.is_some(),
            self.daily.is_some(),
            self.current.is_some(),
        ];
        let len = 7 + 2 * sections.iter().filter(|present| **present).count();

        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("latitude", &self.latitude)?;
        map.serialize_entry("longitude", &self.longitude)?;
        map.serialize_entry("elevation", &self.elevation)?;
        map.serialize_entry("timezone", &self.timezone)?;
        map.serialize_entry("timezone_abbreviation", &self.timezone_abbreviation)?;
        map.serialize_entry("utc_offset_seconds", &self.utc_offset_seconds)?;
        map.serialize_entry("generationtime_ms", &self.generationtime_ms)?;
        if let Some(section) = &self.hourly {
            map.serialize_entry(Cadence::Hourly.as_str(), &section.data)?;
            map.serialize_entry(Cadence::Hourly.units_key(), &section.units)?;
        }
        if let Some(section) = &self.daily {
            map.serialize_entry(Cadence::Daily.as_str(), &section.data)?;
            map.serialize_entry(Cadence::Daily.units_key(), &section.units)?;
        }
        if let Some(section) = &self.current {
            map.serialize_entry(Cadence::Current.as_str(), &section.data)?;
            map.serialize_entry(Cadence::Current.units_key(), &section.units)?;
        }
        map.end()
    }
}

/// Reshapes a validated payload into the response for `request`.
///
/// A section the provider returned but the request did not ask for is
/// dropped, as is a requested section whose time axis came back empty.
pub fn project(request: &ForecastRequest, raw: RawForecastResponse) -> ForecastResponse {
    let hourly = series_section(
        request,
        Cadence::Hourly,
        raw.hourly.as_ref(),
        raw.hourly_units,
    );
    let daily = series_section(request, Cadence::Daily, raw.daily.as_ref(), raw.daily_units);
    let current = match raw.current {
        Some(block) if request.is_requested(Cadence::Current) => Some(Section {
            data: transform_current(&block),
            units: raw.current_units.unwrap_or_default(),
        }),
        other => {
            log_omitted(request, Cadence::Current, other.is_some());
            None
        }
    };

    ForecastResponse {
        latitude: raw.latitude,
        longitude: raw.longitude,
        elevation: raw.elevation,
        timezone: raw.timezone,
        timezone_abbreviation: raw.timezone_abbreviation,
        utc_offset_seconds: raw.utc_offset_seconds,
        generationtime_ms: raw.generationtime_ms,
        hourly,
        daily,
        current,
    }
}

fn series_section(
    request: &ForecastRequest,
    cadence: Cadence,
    block: Option<&RawSeriesBlock>,
    units: Option<UnitMap>,
) -> Option<SeriesSection> {
    match block {
        Some(block) if request.is_requested(cadence) && !block.time.is_empty() => Some(Section {
            data: transform_series(block, cadence),
            units: units.unwrap_or_default(),
        }),
        other => {
            log_omitted(request, cadence, other.is_some());
            None
        }
    }
}

fn log_omitted(request: &ForecastRequest, cadence: Cadence, returned: bool) {
    match (request.is_requested(cadence), returned) {
        (true, false) => debug!("Provider returned no {} data; omitting section", cadence),
        (true, true) => debug!("Provider returned an empty {} time axis; omitting section", cadence),
        (false, true) => debug!("Dropping unrequested {} data from provider", cadence),
        (false, false) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::params::ForecastParams;
    use serde_json::{json, Value};

    fn request(hourly: &[&str], daily: &[&str], current: &[&str]) -> ForecastRequest {
        let list = |names: &[&str]| -> Option<Vec<String>> {
            Some(names.iter().map(|s| s.to_string()).collect())
        };
        ForecastParams {
            latitude: 45.4112,
            longitude: -75.6981,
            hourly: list(hourly),
            daily: list(daily),
            current: list(current),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn payload() -> Value {
        json!({
            "latitude": 45.41,
            "longitude": -75.70,
            "elevation": 70.0,
            "generationtime_ms": 0.05,
            "utc_offset_seconds": 0,
            "timezone": "GMT",
            "timezone_abbreviation": "GMT",
            "hourly_units": {"time": "unixtime", "temperature_2m": "°C", "cloud_cover": "%"},
            "hourly": {
                "time": [1_760_000_000, 1_760_003_600],
                "temperature_2m": [10.1, 10.4],
                "cloud_cover": [40, 55]
            },
            "daily_units": {"time": "unixtime", "temperature_2m_max": "°C"},
            "daily": {"time": [1_760_000_000], "temperature_2m_max": [15.2]},
            "current_units": {"time": "unixtime", "interval": "seconds", "temperature_2m": "°C"},
            "current": {"time": 1_760_000_000, "interval": 900, "temperature_2m": 10.0}
        })
    }

    fn raw(value: Value) -> RawForecastResponse {
        RawForecastResponse::from_value(value).unwrap()
    }

    #[test]
    fn test_requested_sections_are_present() {
        let response = project(
            &request(&["temperature_2m", "cloud_cover"], &["temperature_2m_max"], &[]),
            raw(payload()),
        );
        let hourly = response.hourly().unwrap();
        assert_eq!(hourly.len(), 2);
        assert_eq!(
            hourly[0].keys().collect::<Vec<_>>(),
            ["time", "temperature_2m", "cloud_cover"]
        );
        assert_eq!(
            response.hourly_units().unwrap().keys().collect::<Vec<_>>(),
            ["time", "temperature_2m", "cloud_cover"]
        );
        assert_eq!(response.hourly_units().unwrap()["time"], "unixtime");
        assert_eq!(response.daily().unwrap()[0].get("temperature_2m_max"), Some(15.2));
        // returned by the provider but not requested
        assert!(!response.has_section(Cadence::Current));
        assert!(response.current_units().is_none());
    }

    #[test]
    fn test_serialized_keys_follow_sections() {
        let response = project(
            &request(&["temperature_2m", "cloud_cover"], &["temperature_2m_max"], &[]),
            raw(payload()),
        );
        let value = serde_json::to_value(&response).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "latitude",
                "longitude",
                "elevation",
                "timezone",
                "timezone_abbreviation",
                "utc_offset_seconds",
                "generationtime_ms",
                "hourly",
                "hourly_units",
                "daily",
                "daily_units"
            ]
        );
        assert!(value.get("current").is_none());
        assert!(value.get("current_units").is_none());
        assert_eq!(value["hourly"][1]["time"], json!(1_760_003_600_000_i64));
    }

    #[test]
    fn test_empty_time_axis_omits_section() {
        let mut value = payload();
        value["hourly"] = json!({"time": [], "temperature_2m": []});
        let response = project(&request(&["temperature_2m"], &[], &[]), raw(value));
        assert!(response.hourly.is_none());
        assert!(response.hourly_units().is_none());
    }

    #[test]
    fn test_requested_but_not_returned() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("daily");
        let response = project(&request(&[], &["temperature_2m_max"], &[]), raw(value));
        assert!(!response.has_section(Cadence::Daily));
        assert!(!response.has_section(Cadence::Hourly));
    }

    #[test]
    fn test_missing_units_block_still_yields_pair() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("current_units");
        let response = project(&request(&[], &[], &["temperature_2m"]), raw(value));
        assert_eq!(response.current().unwrap().time(), 1_760_000_000_000);
        assert!(response.current_units().unwrap().is_empty());
    }

    #[test]
    fn test_current_units_keep_interval() {
        let response = project(&request(&[], &[], &["temperature_2m"]), raw(payload()));
        assert_eq!(
            response.current_units().unwrap().keys().collect::<Vec<_>>(),
            ["time", "interval", "temperature_2m"]
        );
        assert_eq!(response.current_units().unwrap()["interval"], "seconds");
    }
}
