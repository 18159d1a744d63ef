//! The request-validate-reshape pipeline of the forecast endpoint.
//!
//! Everything in here is synchronous and free of I/O: parameters are
//! validated into a [`params::ForecastRequest`], the provider's body is
//! validated into a [`payload::RawForecastResponse`], and
//! [`response::project`] turns the two into the final response.

pub mod error;
pub mod params;
pub mod payload;
pub mod response;
pub mod transform;
pub mod typed;
