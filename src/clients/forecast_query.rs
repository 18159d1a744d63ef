//! Provides [`ForecastQuery`], the typed request builder obtained via [`OpenMeteo::query()`].
//!
//! Each call to `.hourly()`, `.daily()` or `.current()` moves the matching
//! type parameter from [`Absent`] to [`Requested`], so the [`TypedForecast`]
//! returned by `.call()` only exposes the sections that were asked for.

use crate::error::OpenMeteoError;
use crate::forecast::error::{Constraint, ParameterValidationError, ParameterViolation};
use crate::forecast::params::ForecastParams;
use crate::forecast::typed::{Absent, Requested, SectionState, TypedForecast};
use crate::open_meteo::{LatLon, OpenMeteo};
use crate::types::cadence::Cadence;
use crate::types::units::{PrecipitationUnit, TemperatureUnit, WindSpeedUnit};
use crate::types::variables::{CurrentVariable, DailyVariable, HourlyVariable, Variable};
use std::marker::PhantomData;

/// A forecast request under construction.
///
/// `H`, `D` and `C` record whether hourly, daily and current data were
/// requested. Setters can be chained in any order; nothing is validated or
/// sent until [`ForecastQuery::call`].
#[derive(Debug, Clone)]
pub struct ForecastQuery<'a, H: SectionState, D: SectionState, C: SectionState> {
    client: &'a OpenMeteo,
    params: ForecastParams,
    sections: PhantomData<(H, D, C)>,
}

impl<'a> ForecastQuery<'a, Absent, Absent, Absent> {
    pub(crate) fn new(client: &'a OpenMeteo, location: LatLon) -> Self {
        Self {
            client,
            params: ForecastParams {
                latitude: location.0,
                longitude: location.1,
                ..Default::default()
            },
            sections: PhantomData,
        }
    }
}

fn names<V: Variable>(variables: impl IntoIterator<Item = V>) -> Option<Vec<String>> {
    Some(
        variables
            .into_iter()
            .map(|v| v.as_str().to_string())
            .collect(),
    )
}

impl<'a, H: SectionState, D: SectionState, C: SectionState> ForecastQuery<'a, H, D, C> {
    /// IANA timezone name, or `auto` to use the location's own timezone.
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.params.timezone = Some(timezone.into());
        self
    }

    pub fn temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.params.temperature_unit = Some(unit.to_string());
        self
    }

    pub fn wind_speed_unit(mut self, unit: WindSpeedUnit) -> Self {
        self.params.wind_speed_unit = Some(unit.to_string());
        self
    }

    pub fn precipitation_unit(mut self, unit: PrecipitationUnit) -> Self {
        self.params.precipitation_unit = Some(unit.to_string());
        self
    }

    /// Number of forecast days, 0 to 16.
    pub fn forecast_days(mut self, days: u8) -> Self {
        self.params.forecast_days = Some(days.into());
        self
    }

    /// Number of past days to include, 0 to 92.
    pub fn past_days(mut self, days: u8) -> Self {
        self.params.past_days = Some(days.into());
        self
    }

    /// Requests hourly data. Replaces any earlier hourly list.
    pub fn hourly(
        self,
        variables: impl IntoIterator<Item = HourlyVariable>,
    ) -> ForecastQuery<'a, Requested, D, C> {
        let hourly = names(variables);
        let mut query = self.retype();
        query.params.hourly = hourly;
        query
    }

    /// Requests daily data. Replaces any earlier daily list.
    pub fn daily(
        self,
        variables: impl IntoIterator<Item = DailyVariable>,
    ) -> ForecastQuery<'a, H, Requested, C> {
        let daily = names(variables);
        let mut query = self.retype();
        query.params.daily = daily;
        query
    }

    /// Requests current conditions. Replaces any earlier current list.
    pub fn current(
        self,
        variables: impl IntoIterator<Item = CurrentVariable>,
    ) -> ForecastQuery<'a, H, D, Requested> {
        let current = names(variables);
        let mut query = self.retype();
        query.params.current = current;
        query
    }

    /// The parameters collected so far.
    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    fn retype<H2: SectionState, D2: SectionState, C2: SectionState>(
        self,
    ) -> ForecastQuery<'a, H2, D2, C2> {
        ForecastQuery {
            client: self.client,
            params: self.params,
            sections: PhantomData,
        }
    }

    /// Validates the parameters, fetches the forecast and checks it against
    /// the requested sections.
    ///
    /// # Errors
    ///
    /// * [`OpenMeteoError::Parameter`] if a parameter is out of range or a
    ///   requested cadence was given an empty variable list. Nothing is sent.
    /// * [`OpenMeteoError::Transport`] if the request fails.
    /// * [`OpenMeteoError::Payload`] if the answer is malformed or lacks a
    ///   requested section.
    pub async fn call(self) -> Result<TypedForecast<H, D, C>, OpenMeteoError> {
        let request = self.params.validate()?;

        let empty: Vec<ParameterViolation> = [
            (Cadence::Hourly, H::REQUESTED),
            (Cadence::Daily, D::REQUESTED),
            (Cadence::Current, C::REQUESTED),
        ]
        .into_iter()
        .filter(|(cadence, requested)| *requested && !request.is_requested(*cadence))
        .map(|(cadence, _)| ParameterViolation {
            field: cadence.as_str().to_string(),
            constraint: Constraint::Empty,
        })
        .collect();
        if !empty.is_empty() {
            return Err(ParameterValidationError::new(empty).into());
        }

        let response = self.client.fetch_request(&request).await?;
        Ok(TypedForecast::from_response(response)?)
    }
}
