use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const IP_API_URL: &str = "https://ipapi.co/json/";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Classified failure outcome of a device-position request.
#[derive(Debug, Clone, Error)]
pub enum GeoFault {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location information unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location error: {0}")]
    Other(String),
}

/// One-shot position source. Capability absence is modeled by the controller
/// holding no locator at all, not by a fault.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn position(&self) -> Result<(f64, f64), GeoFault>;
}

/// Coarse position resolved from the machine's public IP address.
#[derive(Debug, Default)]
pub struct IpLocator {
    http: reqwest::Client,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[async_trait]
impl Locator for IpLocator {
    async fn position(&self) -> Result<(f64, f64), GeoFault> {
        let res = self
            .http
            .get(IP_API_URL)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GeoFault::Timeout
                } else {
                    GeoFault::Other(err.to_string())
                }
            })?;

        let status = res.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeoFault::PermissionDenied);
        }
        if !status.is_success() {
            return Err(GeoFault::Unavailable);
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|err| GeoFault::Other(err.to_string()))?;

        match (parsed.latitude, parsed.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(GeoFault::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_coordinates_parses() {
        let parsed: IpApiResponse = serde_json::from_str(r#"{"error": true}"#).unwrap();
        assert_eq!(parsed.latitude, None);
        assert_eq!(parsed.longitude, None);
    }

    #[test]
    fn response_with_coordinates_parses() {
        let parsed: IpApiResponse =
            serde_json::from_str(r#"{"latitude": 48.85, "longitude": 2.35, "city": "Paris"}"#)
                .unwrap();
        assert_eq!(parsed.latitude, Some(48.85));
        assert_eq!(parsed.longitude, Some(2.35));
    }
}
