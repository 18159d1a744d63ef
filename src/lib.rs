//! A typed client for the Open-Meteo forecast API.
//!
//! The provider answers in columns (one array per variable). This crate
//! validates requests against the known variable catalog before sending them,
//! checks the shape of what comes back, and turns every cadence block into a
//! list of time-indexed rows with millisecond timestamps.

mod clients;
mod error;
mod forecast;
mod open_meteo;
mod transport;
mod types;

#[cfg(test)]
mod test_support;

pub use error::OpenMeteoError;
pub use open_meteo::*;

pub use clients::forecast_query::ForecastQuery;

pub use types::cadence::Cadence;
pub use types::record::TimeRecord;
pub use types::units::{PrecipitationUnit, TemperatureUnit, UnknownUnit, WindSpeedUnit};
pub use types::variables::{
    CurrentVariable, DailyVariable, HourlyVariable, UnknownVariable, Variable, CURRENT_VARIABLES,
    DAILY_VARIABLES, HOURLY_VARIABLES,
};

pub use forecast::error::{
    Constraint, ParameterValidationError, ParameterViolation, PayloadValidationError,
};
pub use forecast::params::{ForecastParams, ForecastRequest, MAX_FORECAST_DAYS, MAX_PAST_DAYS};
pub use forecast::payload::{
    RawColumn, RawCurrentBlock, RawForecastResponse, RawSeriesBlock, UnitMap,
};
pub use forecast::response::{project, CurrentSection, ForecastResponse, Section, SeriesSection};
pub use forecast::transform::{
    seconds_to_millis, transform_current, transform_series, UNIX_TIMESTAMP_FIELDS,
};
pub use forecast::typed::{Absent, Requested, SectionState, TypedForecast};

pub use transport::error::TransportError;
pub use transport::http::HttpTransport;
pub use transport::{
    resolve_base_url, CUSTOMER_API_URL, DEFAULT_RETRY_LIMIT, DEFAULT_TIMEOUT, FORECAST_PATH,
    FREE_API_URL,
};
