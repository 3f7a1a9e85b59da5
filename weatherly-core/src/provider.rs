use crate::model::WeatherReading;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Classified failure outcome of a weather lookup.
///
/// Every provider error lands in exactly one of these; none propagate as
/// plain transport errors past this boundary.
#[derive(Debug, Error)]
pub enum Fault {
    /// The provider reports no match for the requested place.
    #[error("city not found")]
    NotFound,

    /// The credential was rejected.
    #[error("invalid or expired API key")]
    Unauthorized,

    /// No credential is configured at all.
    #[error("no API key configured")]
    CredentialMissing,

    /// Any other non-success status or transport failure.
    #[error("network or server failure: {0}")]
    NetworkOrServer(String),
}

/// A weather data source. One attempt per call, no retries; failures are
/// surfaced to the caller immediately as a [`Fault`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn by_city(&self, city: &str) -> Result<WeatherReading, Fault>;
    async fn by_coords(&self, lat: f64, lon: f64) -> Result<WeatherReading, Fault>;
}
