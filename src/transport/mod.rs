//! HTTP access to the forecast service: endpoint selection, timeouts and retries.

pub mod error;
pub mod http;

use std::time::Duration;

/// The free public endpoint.
pub const FREE_API_URL: &str = "https://api.open-meteo.com/v1";
/// The commercial endpoint, used automatically when an API key is configured.
pub const CUSTOMER_API_URL: &str = "https://customer-api.open-meteo.com/v1";
/// Path of the forecast resource below the base URL.
pub const FORECAST_PATH: &str = "forecast";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Retries after the first attempt, so three attempts in total.
pub const DEFAULT_RETRY_LIMIT: u32 = 2;
/// First retry delay; doubles with every further attempt.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(300);

pub(crate) const RETRY_STATUS_CODES: [u16; 7] = [408, 413, 429, 500, 502, 503, 504];

/// Picks the base URL for a client.
///
/// An explicit override always wins. Without one, supplying an API key selects
/// the customer endpoint and no key selects the free endpoint.
pub fn resolve_base_url(base_url: Option<&str>, api_key: Option<&str>) -> String {
    match (base_url, api_key) {
        (Some(url), _) => url.trim_end_matches('/').to_string(),
        (None, Some(_)) => CUSTOMER_API_URL.to_string(),
        (None, None) => FREE_API_URL.to_string(),
    }
}
