//! Core library for the `weatherly` terminal client.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather client and its fault taxonomy
//! - The display mapper, preference store and session controller
//!
//! It is used by `weatherly-cli`, but can also be reused by other binaries or services.

pub mod app;
pub mod config;
pub mod display;
pub mod locate;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod recent;
pub mod store;
pub mod units;

pub use app::{ActionResult, App, DEFAULT_CITY, Phase, fault_messages, geo_fault_messages};
pub use config::Config;
pub use display::{DisplayModel, TempStrings, to_display, wind_direction};
pub use locate::{GeoFault, IpLocator, Locator};
pub use model::WeatherReading;
pub use prefs::{Preferences, Theme};
pub use provider::{Fault, WeatherProvider, openweather::OpenWeather};
pub use recent::RecentSearches;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use units::{Unit, celsius_to_fahrenheit};
