//! The closed vocabulary of forecast variables, one table per [`Cadence`].
//!
//! Each table below is the single source of truth for its cadence: the
//! `*_VARIABLES` name list used to validate requests and to build the raw
//! payload schema, and the typed enum offered to callers who know their
//! variable set at compile time, are both generated from it.
//!
//! The vocabulary is append-only. Names are case-sensitive wire identifiers
//! and are never renamed between versions.

use crate::types::cadence::Cadence;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name a variable of the expected cadence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is not a known {cadence} variable")]
pub struct UnknownVariable {
    pub cadence: Cadence,
    pub name: String,
}

/// Common behaviour of [`HourlyVariable`], [`DailyVariable`] and [`CurrentVariable`].
pub trait Variable:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr<Err = UnknownVariable> + 'static
{
    /// The cadence whose catalog this variable belongs to.
    const CADENCE: Cadence;
    /// Every variable of the cadence, in catalog order.
    const ALL: &'static [Self];

    /// The wire name of the variable, as used in query strings and payload keys.
    fn as_str(&self) -> &'static str;
}

macro_rules! variable_catalog {
    (
        $(#[$meta:meta])*
        $enum_name:ident, $list_name:ident, $cadence:expr;
        $( $variant:ident => $name:literal, )+
    ) => {
        #[doc = concat!("Wire names of every [`", stringify!($enum_name), "`], in catalog order.")]
        pub const $list_name: &[&str] = &[$($name),+];

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl Variable for $enum_name {
            const CADENCE: Cadence = $cadence;
            const ALL: &'static [Self] = &[$($enum_name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $name,)+
                }
            }
        }

        impl FromStr for $enum_name {
            type Err = UnknownVariable;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($enum_name::$variant),)+
                    _ => Err(UnknownVariable {
                        cadence: $cadence,
                        name: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $enum_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $enum_name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Serialize for $enum_name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $enum_name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

variable_catalog! {
    /// A variable that can be requested at hourly resolution.
    HourlyVariable, HOURLY_VARIABLES, Cadence::Hourly;
    Temperature2m => "temperature_2m",
    RelativeHumidity2m => "relative_humidity_2m",
    DewPoint2m => "dew_point_2m",
    ApparentTemperature => "apparent_temperature",
    PrecipitationProbability => "precipitation_probability",
    Precipitation => "precipitation",
    Rain => "rain",
    Showers => "showers",
    Snowfall => "snowfall",
    SnowDepth => "snow_depth",
    WeatherCode => "weather_code",
    PressureMsl => "pressure_msl",
    SurfacePressure => "surface_pressure",
    CloudCover => "cloud_cover",
    CloudCoverLow => "cloud_cover_low",
    CloudCoverMid => "cloud_cover_mid",
    CloudCoverHigh => "cloud_cover_high",
    Visibility => "visibility",
    Evapotranspiration => "evapotranspiration",
    Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
    VapourPressureDeficit => "vapour_pressure_deficit",
    WindSpeed10m => "wind_speed_10m",
    WindSpeed80m => "wind_speed_80m",
    WindSpeed120m => "wind_speed_120m",
    WindSpeed180m => "wind_speed_180m",
    WindDirection10m => "wind_direction_10m",
    WindDirection80m => "wind_direction_80m",
    WindDirection120m => "wind_direction_120m",
    WindDirection180m => "wind_direction_180m",
    WindGusts10m => "wind_gusts_10m",
    Temperature80m => "temperature_80m",
    Temperature120m => "temperature_120m",
    Temperature180m => "temperature_180m",
    SoilTemperature0cm => "soil_temperature_0cm",
    SoilTemperature6cm => "soil_temperature_6cm",
    SoilTemperature18cm => "soil_temperature_18cm",
    SoilTemperature54cm => "soil_temperature_54cm",
    SoilMoisture0To1cm => "soil_moisture_0_1cm",
    SoilMoisture1To3cm => "soil_moisture_1_3cm",
    SoilMoisture3To9cm => "soil_moisture_3_9cm",
    SoilMoisture9To27cm => "soil_moisture_9_27cm",
    SoilMoisture27To81cm => "soil_moisture_27_81cm",
}

variable_catalog! {
    /// A variable that can be requested as a daily aggregate.
    DailyVariable, DAILY_VARIABLES, Cadence::Daily;
    WeatherCode => "weather_code",
    Temperature2mMax => "temperature_2m_max",
    Temperature2mMin => "temperature_2m_min",
    ApparentTemperatureMax => "apparent_temperature_max",
    ApparentTemperatureMin => "apparent_temperature_min",
    Sunrise => "sunrise",
    Sunset => "sunset",
    DaylightDuration => "daylight_duration",
    SunshineDuration => "sunshine_duration",
    UvIndexMax => "uv_index_max",
    UvIndexClearSkyMax => "uv_index_clear_sky_max",
    RainSum => "rain_sum",
    ShowersSum => "showers_sum",
    SnowfallSum => "snowfall_sum",
    PrecipitationSum => "precipitation_sum",
    PrecipitationHours => "precipitation_hours",
    PrecipitationProbabilityMax => "precipitation_probability_max",
    WindSpeed10mMax => "wind_speed_10m_max",
    WindGusts10mMax => "wind_gusts_10m_max",
    WindDirection10mDominant => "wind_direction_10m_dominant",
    ShortwaveRadiationSum => "shortwave_radiation_sum",
    Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
}

variable_catalog! {
    /// A variable that can be requested for the current conditions.
    CurrentVariable, CURRENT_VARIABLES, Cadence::Current;
    Temperature2m => "temperature_2m",
    RelativeHumidity2m => "relative_humidity_2m",
    ApparentTemperature => "apparent_temperature",
    IsDay => "is_day",
    Precipitation => "precipitation",
    Rain => "rain",
    Showers => "showers",
    Snowfall => "snowfall",
    WeatherCode => "weather_code",
    CloudCover => "cloud_cover",
    PressureMsl => "pressure_msl",
    SurfacePressure => "surface_pressure",
    WindSpeed10m => "wind_speed_10m",
    WindDirection10m => "wind_direction_10m",
    WindGusts10m => "wind_gusts_10m",
}

impl DailyVariable {
    /// Whether the provider reports this variable as a Unix timestamp in seconds.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, DailyVariable::Sunrise | DailyVariable::Sunset)
    }
}
