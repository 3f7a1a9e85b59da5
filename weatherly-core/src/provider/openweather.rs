use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{config::Config, model::WeatherReading};

use super::{Fault, WeatherProvider};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

// OpenWeather occasionally omits visibility; the documented maximum is 10 km.
const DEFAULT_VISIBILITY_M: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
    http: Client,
}

impl OpenWeather {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Build the provider from config, failing with `CredentialMissing` when
    /// no API key is available from the environment or the config file.
    pub fn from_config(config: &Config) -> Result<Self, Fault> {
        let api_key = config.resolved_api_key().ok_or(Fault::CredentialMissing)?;
        Ok(Self::new(api_key))
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<WeatherReading, Fault> {
        tracing::debug!(?params, "requesting current weather");

        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("appid", self.api_key.clone()));
        query.push(("units", "metric".to_string()));

        let res = self
            .http
            .get(BASE_URL)
            .query(&query)
            .send()
            .await
            .map_err(|err| Fault::NetworkOrServer(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%status, "provider returned non-success status");
            return Err(classify_status(status));
        }

        let parsed: OwCurrentResponse = res
            .json()
            .await
            .map_err(|err| Fault::NetworkOrServer(format!("malformed provider response: {err}")))?;

        Ok(parsed.into())
    }
}

fn classify_status(status: StatusCode) -> Fault {
    match status {
        StatusCode::NOT_FOUND => Fault::NotFound,
        StatusCode::UNAUTHORIZED => Fault::Unauthorized,
        _ => Fault::NetworkOrServer(format!("provider returned status {status}")),
    }
}

#[async_trait]
impl WeatherProvider for OpenWeather {
    async fn by_city(&self, city: &str) -> Result<WeatherReading, Fault> {
        self.fetch(&[("q", city.to_string())]).await
    }

    async fn by_coords(&self, lat: f64, lon: f64) -> Result<WeatherReading, Fault> {
        self.fetch(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(raw: OwCurrentResponse) -> Self {
        let (condition_main, condition_description) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "unknown conditions".to_string()));

        WeatherReading {
            city_name: raw.name,
            country_code: raw.sys.country.unwrap_or_default(),
            observed_at: DateTime::from_timestamp(raw.dt, 0).unwrap_or_else(Utc::now),
            temp_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            temp_min_c: raw.main.temp_min,
            temp_max_c: raw.main.temp_max,
            condition_main,
            condition_description,
            humidity_pct: raw.main.humidity,
            wind_speed_ms: raw.wind.speed,
            wind_deg: raw.wind.deg,
            wind_gust_ms: raw.wind.gust,
            pressure_hpa: raw.main.pressure,
            visibility_m: raw.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            sunrise_epoch: raw.sys.sunrise,
            sunset_epoch: raw.sys.sunset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "Paris",
        "dt": 1756500000,
        "sys": { "country": "FR", "sunrise": 1756440000, "sunset": 1756488000 },
        "main": {
            "temp": 15.0, "feels_like": 14.0,
            "temp_min": 12.3, "temp_max": 17.8,
            "humidity": 63, "pressure": 1014
        },
        "weather": [ { "main": "Clear", "description": "clear sky" } ],
        "wind": { "speed": 3.5, "deg": 310, "gust": 6.1 },
        "visibility": 10000
    }"#;

    #[test]
    fn status_classification() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Fault::NotFound
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED),
            Fault::Unauthorized
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Fault::NetworkOrServer(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            Fault::NetworkOrServer(_)
        ));
    }

    #[test]
    fn payload_maps_to_reading() {
        let raw: OwCurrentResponse = serde_json::from_str(FIXTURE).unwrap();
        let reading = WeatherReading::from(raw);

        assert_eq!(reading.city_name, "Paris");
        assert_eq!(reading.country_code, "FR");
        assert_eq!(reading.temp_c, 15.0);
        assert_eq!(reading.feels_like_c, 14.0);
        assert_eq!(reading.condition_main, "Clear");
        assert_eq!(reading.condition_description, "clear sky");
        assert_eq!(reading.humidity_pct, 63);
        assert_eq!(reading.wind_deg, 310.0);
        assert_eq!(reading.wind_gust_ms, Some(6.1));
        assert_eq!(reading.pressure_hpa, 1014);
        assert_eq!(reading.visibility_m, 10_000);
        assert_eq!(reading.sunrise_epoch, 1756440000);
        assert_eq!(reading.observed_at.timestamp(), 1756500000);
    }

    #[test]
    fn sparse_payload_gets_defaults() {
        let sparse = r#"{
            "name": "Somewhere",
            "dt": 1756500000,
            "sys": {},
            "main": {
                "temp": 1.0, "feels_like": -2.0,
                "temp_min": 0.0, "temp_max": 2.0,
                "humidity": 80, "pressure": 990
            },
            "weather": [],
            "wind": { "speed": 1.0 }
        }"#;

        let raw: OwCurrentResponse = serde_json::from_str(sparse).unwrap();
        let reading = WeatherReading::from(raw);

        assert_eq!(reading.country_code, "");
        assert_eq!(reading.condition_main, "Unknown");
        assert_eq!(reading.wind_deg, 0.0);
        assert_eq!(reading.wind_gust_ms, None);
        assert_eq!(reading.visibility_m, DEFAULT_VISIBILITY_M);
        assert_eq!(reading.sunrise_epoch, 0);
    }
}
