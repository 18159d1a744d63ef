//! Compile-time view of which sections a response carries.
//!
//! [`TypedForecast<H, D, C>`] mirrors the runtime projection rule in its type
//! parameters: a cadence marked [`Requested`] has accessors that return its
//! data directly, a cadence marked [`Absent`] has none. The typed value is
//! only ever built from a runtime [`ForecastResponse`] after checking that
//! every requested section is really there, so the types never claim more
//! than the data holds.

use crate::forecast::error::PayloadValidationError;
use crate::forecast::payload::UnitMap;
use crate::forecast::response::{CurrentSection, ForecastResponse, SeriesSection};
use crate::types::cadence::Cadence;
use crate::types::record::TimeRecord;

/// Marks a cadence that was requested with at least one variable.
#[derive(Debug, Clone, Copy)]
pub struct Requested;

/// Marks a cadence that was not requested.
#[derive(Debug, Clone, Copy)]
pub struct Absent;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Requested {}
    impl Sealed for super::Absent {}
}

/// Section presence at the type level. Implemented by [`Requested`] and [`Absent`] only.
pub trait SectionState: sealed::Sealed {
    /// Whether the cadence was requested.
    const REQUESTED: bool;
    /// What the typed response stores for a section in this state.
    type Slot<T: std::fmt::Debug + Clone>: std::fmt::Debug + Clone;

    #[doc(hidden)]
    fn take<T: std::fmt::Debug + Clone>(
        section: Option<T>,
        cadence: Cadence,
    ) -> Result<Self::Slot<T>, PayloadValidationError>;
}

impl SectionState for Requested {
    const REQUESTED: bool = true;
    type Slot<T: std::fmt::Debug + Clone> = T;

    fn take<T: std::fmt::Debug + Clone>(
        section: Option<T>,
        cadence: Cadence,
    ) -> Result<T, PayloadValidationError> {
        section.ok_or(PayloadValidationError::MissingSection(cadence))
    }
}

impl SectionState for Absent {
    const REQUESTED: bool = false;
    type Slot<T: std::fmt::Debug + Clone> = ();

    fn take<T: std::fmt::Debug + Clone>(
        _section: Option<T>,
        _cadence: Cadence,
    ) -> Result<(), PayloadValidationError> {
        Ok(())
    }
}

/// A forecast whose section presence is known at compile time.
///
/// Obtained from [`crate::ForecastQuery::call`]. The location fields are
/// public; section data is reached through accessors that exist only for the
/// requested cadences:
///
/// ```compile_fail
/// # use openmeteo::{TypedForecast, Absent, Requested};
/// fn daily_of(forecast: &TypedForecast<Requested, Absent, Absent>) {
///     // daily was not requested, so there is no `daily()` to call
///     let _ = forecast.daily();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TypedForecast<H: SectionState, D: SectionState, C: SectionState> {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i64,
    pub generationtime_ms: f64,
    hourly: H::Slot<SeriesSection>,
    daily: D::Slot<SeriesSection>,
    current: C::Slot<CurrentSection>,
}

impl<H: SectionState, D: SectionState, C: SectionState> TypedForecast<H, D, C> {
    /// Checks `response` against the requested shape.
    ///
    /// Fails with [`PayloadValidationError::MissingSection`] when a requested
    /// cadence has no section, e.g. because the provider returned an empty
    /// time axis for it.
    pub fn from_response(response: ForecastResponse) -> Result<Self, PayloadValidationError> {
        Ok(Self {
            hourly: H::take(response.hourly, Cadence::Hourly)?,
            daily: D::take(response.daily, Cadence::Daily)?,
            current: C::take(response.current, Cadence::Current)?,
            latitude: response.latitude,
            longitude: response.longitude,
            elevation: response.elevation,
            timezone: response.timezone,
            timezone_abbreviation: response.timezone_abbreviation,
            utc_offset_seconds: response.utc_offset_seconds,
            generationtime_ms: response.generationtime_ms,
        })
    }
}

impl<D: SectionState, C: SectionState> TypedForecast<Requested, D, C> {
    pub fn hourly(&self) -> &[TimeRecord] {
        &self.hourly.data
    }

    pub fn hourly_units(&self) -> &UnitMap {
        &self.hourly.units
    }
}

impl<H: SectionState, C: SectionState> TypedForecast<H, Requested, C> {
    pub fn daily(&self) -> &[TimeRecord] {
        &self.daily.data
    }

    pub fn daily_units(&self) -> &UnitMap {
        &self.daily.units
    }
}

impl<H: SectionState, D: SectionState> TypedForecast<H, D, Requested> {
    pub fn current(&self) -> &TimeRecord {
        &self.current.data
    }

    pub fn current_units(&self) -> &UnitMap {
        &self.current.units
    }
}
