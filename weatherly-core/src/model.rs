use chrono::{DateTime, Utc};

/// One normalized snapshot of weather conditions for a place and moment.
///
/// Constructed once from a provider response and never mutated; the app
/// controller holds the current reading in a single slot, overwritten by each
/// successful lookup. All temperatures are Celsius; unit conversion happens in
/// the display mapper.
#[derive(Debug, Clone)]
pub struct WeatherReading {
    pub city_name: String,
    pub country_code: String,
    pub observed_at: DateTime<Utc>,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub wind_deg: f64,
    pub wind_gust_ms: Option<f64>,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
}
