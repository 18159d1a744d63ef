//! Defines the three reporting cadences of the forecast API and the
//! catalog lookups attached to each of them.

use crate::types::variables::{CURRENT_VARIABLES, DAILY_VARIABLES, HOURLY_VARIABLES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static HOURLY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HOURLY_VARIABLES.iter().copied().collect());
static DAILY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DAILY_VARIABLES.iter().copied().collect());
static CURRENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CURRENT_VARIABLES.iter().copied().collect());

/// The reporting granularity of a block of forecast data.
///
/// Each cadence has its own closed catalog of variables, its own query
/// parameter, and its own pair of sections in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// One value per hour, returned as a time series.
    Hourly,
    /// One aggregate per day, returned as a time series.
    Daily,
    /// A single instantaneous snapshot.
    Current,
}

impl Cadence {
    pub const ALL: [Cadence; 3] = [Cadence::Hourly, Cadence::Daily, Cadence::Current];

    /// Name of the query parameter and of the data section for this cadence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Hourly => "hourly",
            Cadence::Daily => "daily",
            Cadence::Current => "current",
        }
    }

    /// Name of the section holding the unit strings for this cadence.
    pub fn units_key(&self) -> &'static str {
        match self {
            Cadence::Hourly => "hourly_units",
            Cadence::Daily => "daily_units",
            Cadence::Current => "current_units",
        }
    }

    /// Every legal variable name for this cadence, in catalog order.
    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            Cadence::Hourly => HOURLY_VARIABLES,
            Cadence::Daily => DAILY_VARIABLES,
            Cadence::Current => CURRENT_VARIABLES,
        }
    }

    /// Constant-time catalog membership test. Case-sensitive.
    pub fn is_known(&self, name: &str) -> bool {
        let set = match self {
            Cadence::Hourly => &*HOURLY_SET,
            Cadence::Daily => &*DAILY_SET,
            Cadence::Current => &*CURRENT_SET,
        };
        set.contains(name)
    }

    /// Whether the payload for this cadence is a time series (as opposed to a single snapshot).
    pub fn is_series(&self) -> bool {
        !matches!(self, Cadence::Current)
    }
}

/// Formats a `Cadence` using its query parameter name.
///
/// # Examples
///
/// ```
/// use openmeteo::Cadence;
///
/// assert_eq!(Cadence::Hourly.to_string(), "hourly");
/// assert_eq!(format!("{}", Cadence::Current), "current");
/// ```
impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
