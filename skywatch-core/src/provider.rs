use crate::model::WeatherSnapshot;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Why a fetch for current conditions failed.
///
/// Only `NotFound` is meaningful to the user as its own category; the search
/// view folds every other variant into one generic failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider does not know the requested city (HTTP 404).
    #[error("city '{0}' was not found")]
    NotFound(String),

    /// The request could not be sent or the transport failed mid-flight.
    #[error("request to weather provider failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status other than 404.
    #[error("weather provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read or decoded.
    #[error("failed to parse weather provider response: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// Source of current weather conditions, keyed by city name. The provider
/// performs its own geocoding of the raw query.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;
}
