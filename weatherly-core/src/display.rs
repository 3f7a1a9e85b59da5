use chrono::{DateTime, Local};

use crate::model::WeatherReading;
use crate::units::{Unit, celsius_to_fahrenheit};

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const DEFAULT_ICON: &str = "🌤️";

/// Every render-ready string for one reading under one unit.
///
/// `background_class` is a single token, so at most one weather class is ever
/// active; the renderer replaces the whole value rather than accumulating.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub city_label: String,
    pub date_line: String,
    pub icon: &'static str,
    pub condition: String,
    pub description: String,
    pub temps: TempStrings,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: &'static str,
    pub wind_gust: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub background_class: String,
}

/// The unit-dependent subset, recomputed alone on a unit toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempStrings {
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
}

/// Map a reading to display values. Temperatures are converted then rounded;
/// wind, pressure and visibility stay metric-derived regardless of unit.
pub fn to_display(reading: &WeatherReading, unit: Unit) -> DisplayModel {
    DisplayModel {
        city_label: format!("{}, {}", reading.city_name, reading.country_code),
        date_line: reading
            .observed_at
            .with_timezone(&Local)
            .format("%A, %B %-d, %Y")
            .to_string(),
        icon: weather_icon(&reading.condition_main),
        condition: reading.condition_main.clone(),
        description: reading.condition_description.clone(),
        temps: temperature_strings(reading, unit),
        humidity: format!("{}%", reading.humidity_pct),
        wind_speed: format!("{:.1} km/h", reading.wind_speed_ms * 3.6),
        wind_direction: wind_direction(reading.wind_deg),
        wind_gust: reading
            .wind_gust_ms
            .map(|gust| format!("{:.1} km/h", gust * 3.6))
            .unwrap_or_else(|| "N/A".to_string()),
        pressure: format!("{} hPa", reading.pressure_hpa),
        visibility: format!("{:.1} km", f64::from(reading.visibility_m) / 1000.0),
        sunrise: format_epoch_time(reading.sunrise_epoch),
        sunset: format_epoch_time(reading.sunset_epoch),
        background_class: background_class(&reading.condition_main),
    }
}

/// The four temperature-dependent fields only, for unit-toggle re-render.
pub fn temperature_strings(reading: &WeatherReading, unit: Unit) -> TempStrings {
    TempStrings {
        temperature: format_temp(reading.temp_c, unit),
        feels_like: format_temp(reading.feels_like_c, unit),
        temp_min: format_temp(reading.temp_min_c, unit),
        temp_max: format_temp(reading.temp_max_c, unit),
    }
}

fn format_temp(celsius: f64, unit: Unit) -> String {
    let value = match unit {
        Unit::Celsius => celsius,
        Unit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    format!("{}{}", round_half_up(value), unit.label())
}

/// Compass point for a wind bearing; any input is equivalent mod 360.
pub fn wind_direction(deg: f64) -> &'static str {
    let index = round_half_up(deg / 45.0).rem_euclid(8) as usize;
    WIND_DIRECTIONS[index]
}

fn weather_icon(condition_main: &str) -> &'static str {
    match condition_main {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" | "Haze" => "🌫️",
        "Smoke" | "Dust" | "Sand" | "Ash" | "Squall" => "💨",
        "Tornado" => "🌪️",
        _ => DEFAULT_ICON,
    }
}

fn background_class(condition_main: &str) -> String {
    format!("weather-{}", condition_main.to_lowercase())
}

fn format_epoch_time(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.with_timezone(&Local).format("%I:%M %p").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Half-up rounding, matching the displayed-temperature convention
/// (e.g. 57.2 rounds to 57, 57.5 rounds to 58, -17.5 rounds to -17).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
