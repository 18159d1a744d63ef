//! Outbound request parameters: the caller-facing [`ForecastParams`], their
//! validation into an immutable [`ForecastRequest`], and the query string
//! derived from it.

use crate::forecast::error::{Constraint, ParameterValidationError, ParameterViolation};
use crate::types::cadence::Cadence;
use crate::types::units::{PrecipitationUnit, TemperatureUnit, WindSpeedUnit};
use crate::types::variables::{CurrentVariable, DailyVariable, HourlyVariable, Variable};
use bon::Builder;
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MAX_FORECAST_DAYS: u8 = 16;
pub const MAX_PAST_DAYS: u8 = 92;

/// The provider is always asked for Unix-second timestamps; the transform relies on it.
const TIME_FORMAT: &str = "unixtime";

/// Unvalidated forecast parameters, as a caller or a deserialized document provides them.
///
/// Nothing is checked until [`ForecastParams::validate`] runs. Variable lists
/// keep their order, and duplicates are passed through as given.
///
/// # Examples
///
/// ```
/// use openmeteo::ForecastParams;
///
/// let params = ForecastParams::builder()
///     .latitude(45.4112)
///     .longitude(-75.6981)
///     .hourly(vec!["temperature_2m".into(), "cloud_cover".into()])
///     .daily(vec!["temperature_2m_max".into()])
///     .build();
///
/// let request = params.validate().expect("valid parameters");
/// assert_eq!(request.hourly().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
pub struct ForecastParams {
    pub latitude: f64,
    pub longitude: f64,
    #[builder(into)]
    pub timezone: Option<String>,
    #[builder(into)]
    pub temperature_unit: Option<String>,
    #[builder(into)]
    pub wind_speed_unit: Option<String>,
    #[builder(into)]
    pub precipitation_unit: Option<String>,
    pub forecast_days: Option<i64>,
    pub past_days: Option<i64>,
    pub hourly: Option<Vec<String>>,
    pub daily: Option<Vec<String>>,
    pub current: Option<Vec<String>>,
}

impl ForecastParams {
    /// Reads parameters from a JSON document.
    ///
    /// A document that does not have the parameter shape at all (wrong types,
    /// missing coordinates) fails here with a single `Malformed` violation on
    /// field `$`; range and catalog checks are left to [`ForecastParams::validate`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, ParameterValidationError> {
        serde_json::from_value(value).map_err(|e| {
            ParameterValidationError::single("$", Constraint::Malformed(e.to_string()))
        })
    }

    /// Checks every field and returns the normalized request.
    ///
    /// All checks run; the error lists every violation found, not just the first.
    pub fn validate(&self) -> Result<ForecastRequest, ParameterValidationError> {
        let mut violations = Vec::new();

        check_coordinate("latitude", self.latitude, 90.0, &mut violations);
        check_coordinate("longitude", self.longitude, 180.0, &mut violations);

        let temperature_unit = parse_choice::<TemperatureUnit>(
            "temperature_unit",
            self.temperature_unit.as_deref(),
            TemperatureUnit::ALLOWED,
            &mut violations,
        );
        let wind_speed_unit = parse_choice::<WindSpeedUnit>(
            "wind_speed_unit",
            self.wind_speed_unit.as_deref(),
            WindSpeedUnit::ALLOWED,
            &mut violations,
        );
        let precipitation_unit = parse_choice::<PrecipitationUnit>(
            "precipitation_unit",
            self.precipitation_unit.as_deref(),
            PrecipitationUnit::ALLOWED,
            &mut violations,
        );

        let forecast_days = check_days(
            "forecast_days",
            self.forecast_days,
            MAX_FORECAST_DAYS,
            &mut violations,
        );
        let past_days = check_days("past_days", self.past_days, MAX_PAST_DAYS, &mut violations);

        let hourly = parse_variables::<HourlyVariable>(self.hourly.as_deref(), &mut violations);
        let daily = parse_variables::<DailyVariable>(self.daily.as_deref(), &mut violations);
        let current = parse_variables::<CurrentVariable>(self.current.as_deref(), &mut violations);

        if !violations.is_empty() {
            debug!(
                "Rejected forecast parameters with {} violation(s)",
                violations.len()
            );
            return Err(ParameterValidationError::new(violations));
        }

        Ok(ForecastRequest {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            temperature_unit,
            wind_speed_unit,
            precipitation_unit,
            forecast_days,
            past_days,
            hourly,
            daily,
            current,
        })
    }
}

fn check_coordinate(field: &str, value: f64, bound: f64, violations: &mut Vec<ParameterViolation>) {
    let constraint = if !value.is_finite() {
        Constraint::NotFinite
    } else if !(-bound..=bound).contains(&value) {
        Constraint::OutOfRange {
            min: -bound,
            max: bound,
        }
    } else {
        return;
    };
    violations.push(ParameterViolation {
        field: field.to_string(),
        constraint,
    });
}

fn check_days(
    field: &str,
    value: Option<i64>,
    max: u8,
    violations: &mut Vec<ParameterViolation>,
) -> Option<u8> {
    let value = value?;
    match u8::try_from(value) {
        Ok(days) if days <= max => Some(days),
        _ => {
            violations.push(ParameterViolation {
                field: field.to_string(),
                constraint: Constraint::OutOfRange {
                    min: 0.0,
                    max: f64::from(max),
                },
            });
            None
        }
    }
}

fn parse_choice<T: FromStr>(
    field: &str,
    value: Option<&str>,
    allowed: &'static [&'static str],
    violations: &mut Vec<ParameterViolation>,
) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(choice) => Some(choice),
        Err(_) => {
            violations.push(ParameterViolation {
                field: field.to_string(),
                constraint: Constraint::NotOneOf { allowed },
            });
            None
        }
    }
}

fn parse_variables<V: Variable>(
    names: Option<&[String]>,
    violations: &mut Vec<ParameterViolation>,
) -> Vec<V> {
    let Some(names) = names else {
        return Vec::new();
    };
    let mut variables = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        match name.parse::<V>() {
            Ok(variable) => variables.push(variable),
            Err(_) => violations.push(ParameterViolation {
                field: format!("{}[{i}]", V::CADENCE),
                constraint: Constraint::UnknownVariable {
                    cadence: V::CADENCE,
                },
            }),
        }
    }
    variables
}

/// Validated, immutable forecast request.
///
/// Only obtainable through [`ForecastParams::validate`], so every value in it
/// is in range and every variable is in its cadence's catalog. An absent
/// variable list and an empty one are the same thing here.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
    temperature_unit: Option<TemperatureUnit>,
    wind_speed_unit: Option<WindSpeedUnit>,
    precipitation_unit: Option<PrecipitationUnit>,
    forecast_days: Option<u8>,
    past_days: Option<u8>,
    hourly: Vec<HourlyVariable>,
    daily: Vec<DailyVariable>,
    current: Vec<CurrentVariable>,
}

impl ForecastRequest {
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn temperature_unit(&self) -> Option<TemperatureUnit> {
        self.temperature_unit
    }

    pub fn wind_speed_unit(&self) -> Option<WindSpeedUnit> {
        self.wind_speed_unit
    }

    pub fn precipitation_unit(&self) -> Option<PrecipitationUnit> {
        self.precipitation_unit
    }

    pub fn forecast_days(&self) -> Option<u8> {
        self.forecast_days
    }

    pub fn past_days(&self) -> Option<u8> {
        self.past_days
    }

    pub fn hourly(&self) -> &[HourlyVariable] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailyVariable] {
        &self.daily
    }

    pub fn current(&self) -> &[CurrentVariable] {
        &self.current
    }

    /// Whether at least one variable of `cadence` was requested.
    pub fn is_requested(&self, cadence: Cadence) -> bool {
        match cadence {
            Cadence::Hourly => !self.hourly.is_empty(),
            Cadence::Daily => !self.daily.is_empty(),
            Cadence::Current => !self.current.is_empty(),
        }
    }

    /// The query string pairs for this request, in a fixed order.
    ///
    /// Scalars pass through as-is, `timeformat=unixtime` is always present,
    /// and each non-empty variable list becomes one comma-joined parameter
    /// named after its cadence. Empty lists contribute nothing.
    pub fn query_pairs(&self, api_key: Option<&str>) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
        ];
        if let Some(timezone) = &self.timezone {
            pairs.push(("timezone", timezone.clone()));
        }
        if let Some(unit) = self.temperature_unit {
            pairs.push(("temperature_unit", unit.to_string()));
        }
        if let Some(unit) = self.wind_speed_unit {
            pairs.push(("wind_speed_unit", unit.to_string()));
        }
        if let Some(unit) = self.precipitation_unit {
            pairs.push(("precipitation_unit", unit.to_string()));
        }
        if let Some(days) = self.forecast_days {
            pairs.push(("forecast_days", days.to_string()));
        }
        if let Some(days) = self.past_days {
            pairs.push(("past_days", days.to_string()));
        }
        pairs.push(("timeformat", TIME_FORMAT.to_string()));
        if let Some(key) = api_key {
            pairs.push(("apikey", key.to_string()));
        }
        push_variables(&mut pairs, &self.hourly);
        push_variables(&mut pairs, &self.daily);
        push_variables(&mut pairs, &self.current);
        pairs
    }
}

fn push_variables<V: Variable>(pairs: &mut Vec<(&'static str, String)>, variables: &[V]) {
    if variables.is_empty() {
        return;
    }
    let joined = variables
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(",");
    pairs.push((V::CADENCE.as_str(), joined));
}
