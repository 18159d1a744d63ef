//! This module provides the main entry point for requesting forecasts.
//! Requests are described either with an untyped [`ForecastParams`] value or
//! with the typed [`ForecastQuery`] chain started by [`OpenMeteo::query`].

use crate::clients::forecast_query::ForecastQuery;
use crate::error::OpenMeteoError;
use crate::forecast::params::{ForecastParams, ForecastRequest};
use crate::forecast::payload::RawForecastResponse;
use crate::forecast::response::{project, ForecastResponse};
use crate::forecast::typed::Absent;
use crate::transport::http::HttpTransport;
use crate::transport::{resolve_base_url, FORECAST_PATH};
use bon::bon;
use log::debug;
use std::time::Duration;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use openmeteo::LatLon;
///
/// let ottawa = LatLon(45.4112, -75.6981);
/// assert_eq!(ottawa.0, 45.4112); // Latitude
/// assert_eq!(ottawa.1, -75.6981); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The client for the forecast service.
///
/// Holds one HTTP transport (and with it one connection pool) plus the
/// optional API key. Build it once and pass it to whatever needs forecasts;
/// concurrent calls through the same instance need no coordination.
///
/// # Examples
///
/// ```rust
/// # use openmeteo::{OpenMeteo, OpenMeteoError, FREE_API_URL, CUSTOMER_API_URL};
/// # fn run() -> Result<(), OpenMeteoError> {
/// // Free endpoint, default timeout and retries
/// let client = OpenMeteo::new()?;
/// assert_eq!(client.base_url(), FREE_API_URL);
///
/// // An API key switches to the customer endpoint
/// let customer = OpenMeteo::builder().api_key("my-key").build()?;
/// assert_eq!(customer.base_url(), CUSTOMER_API_URL);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    transport: HttpTransport,
    api_key: Option<String>,
}

#[bon]
impl OpenMeteo {
    /// Creates a client from options, through the `OpenMeteo::builder()` chain.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.base_url(impl Into<String>)`: Overrides the endpoint, e.g. for a
    ///   self-hosted instance. Always wins over the endpoint implied by the key.
    /// * `.api_key(impl Into<String>)`: Sent as `apikey` with every request and
    ///   selects the customer endpoint unless `base_url` is set.
    /// * `.timeout(Duration)`: Per-attempt timeout. Defaults to 30 seconds.
    /// * `.max_retries(u32)`: Retries of transient failures. Defaults to 2.
    /// * `.http_client(reqwest::Client)`: Reuse an existing client and its pool.
    ///
    /// # Errors
    ///
    /// Returns [`OpenMeteoError::Transport`] if the HTTP client cannot be built.
    #[builder(start_fn = builder, finish_fn = build)]
    #[doc(hidden)]
    pub fn from_options(
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] api_key: Option<String>,
        timeout: Option<Duration>,
        max_retries: Option<u32>,
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, OpenMeteoError> {
        let base_url = resolve_base_url(base_url.as_deref(), api_key.as_deref());
        debug!("Configuring forecast client for {}", base_url);
        let transport = HttpTransport::new(base_url, timeout, max_retries, http_client)?;
        Ok(Self { transport, api_key })
    }

    /// Creates a client for the free endpoint with default settings.
    pub fn new() -> Result<Self, OpenMeteoError> {
        Self::builder().build()
    }

    /// The endpoint this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Validates `params`, fetches the forecast and reshapes it into rows.
    ///
    /// Nothing is sent when validation fails. The returned response carries a
    /// section for each cadence that was requested with at least one variable
    /// and came back with data.
    ///
    /// # Errors
    ///
    /// * [`OpenMeteoError::Parameter`] if any parameter is invalid.
    /// * [`OpenMeteoError::Transport`] if the request fails, including non-2xx
    ///   answers after retries.
    /// * [`OpenMeteoError::Payload`] if the provider's answer has the wrong shape.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openmeteo::{ForecastParams, OpenMeteo, OpenMeteoError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenMeteoError> {
    /// let client = OpenMeteo::new()?;
    /// let params = ForecastParams::builder()
    ///     .latitude(45.4112)
    ///     .longitude(-75.6981)
    ///     .hourly(vec!["temperature_2m".into(), "cloud_cover".into()])
    ///     .daily(vec!["temperature_2m_max".into()])
    ///     .build();
    ///
    /// let forecast = client.forecast(&params).await?;
    /// for row in forecast.hourly().unwrap_or_default().iter().take(3) {
    ///     println!("{:?} {:?}", row.datetime(), row.get("temperature_2m"));
    /// }
    /// assert!(forecast.current().is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn forecast(&self, params: &ForecastParams) -> Result<ForecastResponse, OpenMeteoError> {
        let request = params.validate()?;
        self.fetch_request(&request).await
    }

    /// Like [`OpenMeteo::forecast`], for parameters given as a JSON document.
    pub async fn forecast_json(
        &self,
        params: serde_json::Value,
    ) -> Result<ForecastResponse, OpenMeteoError> {
        let params = ForecastParams::from_json(params)?;
        self.forecast(&params).await
    }

    /// Starts a typed query for `location`.
    ///
    /// Which sections the result carries is tracked in its type: only the
    /// cadences given to `.hourly()`, `.daily()` or `.current()` get accessors.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openmeteo::{OpenMeteo, LatLon, HourlyVariable, DailyVariable, OpenMeteoError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenMeteoError> {
    /// let client = OpenMeteo::new()?;
    /// let forecast = client
    ///     .query(LatLon(52.52, 13.41))
    ///     .timezone("Europe/Berlin")
    ///     .hourly([HourlyVariable::Temperature2m])
    ///     .daily([DailyVariable::Sunrise, DailyVariable::Sunset])
    ///     .call()
    ///     .await?;
    ///
    /// println!("{} hourly rows", forecast.hourly().len());
    /// println!("first sunrise: {:?}", forecast.daily()[0].get("sunrise"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn query(&self, location: LatLon) -> ForecastQuery<'_, Absent, Absent, Absent> {
        ForecastQuery::new(self, location)
    }

    pub(crate) async fn fetch_request(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, OpenMeteoError> {
        let query = request.query_pairs(self.api_key.as_deref());
        let body = self.transport.get_json(FORECAST_PATH, &query).await?;
        let raw = RawForecastResponse::from_value(body)?;
        Ok(project(request, raw))
    }
}
