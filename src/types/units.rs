//! Unit selectors accepted by the forecast endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a unit string is not one of the accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not one of {allowed:?}")]
pub struct UnknownUnit {
    pub value: String,
    pub allowed: &'static [&'static str],
}

macro_rules! unit_selector {
    (
        $(#[$meta:meta])*
        $enum_name:ident { $( $(#[$vmeta:meta])* $variant:ident => $name:literal, )+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $enum_name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl $enum_name {
            /// Every accepted wire value, in declaration order.
            pub const ALLOWED: &'static [&'static str] = &[$($name),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $name,)+
                }
            }
        }

        impl FromStr for $enum_name {
            type Err = UnknownUnit;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($enum_name::$variant),)+
                    _ => Err(UnknownUnit {
                        value: s.to_string(),
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }

        impl fmt::Display for $enum_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

unit_selector! {
    /// Unit for temperature variables. The provider defaults to Celsius.
    TemperatureUnit {
        Celsius => "celsius",
        Fahrenheit => "fahrenheit",
    }
}

unit_selector! {
    /// Unit for wind speed variables. The provider defaults to km/h.
    WindSpeedUnit {
        /// Kilometres per hour.
        Kmh => "kmh",
        /// Metres per second.
        Ms => "ms",
        /// Miles per hour.
        Mph => "mph",
        /// Knots.
        Kn => "kn",
    }
}

unit_selector! {
    /// Unit for precipitation variables. The provider defaults to millimetres.
    PrecipitationUnit {
        Mm => "mm",
        Inch => "inch",
    }
}
