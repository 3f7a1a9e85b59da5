use std::sync::Arc;

use crate::display::{self, DisplayModel, TempStrings};
use crate::locate::{GeoFault, Locator};
use crate::model::WeatherReading;
use crate::prefs::{Preferences, Theme};
use crate::provider::{Fault, WeatherProvider};
use crate::recent::RecentSearches;
use crate::units::Unit;

/// City looked up when no last-searched city is stored.
pub const DEFAULT_CITY: &str = "London";

/// Visible state of the session: exactly one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Display,
    Error { title: String, message: String },
}

/// Outcome of one user action, for the rendering surface to apply.
#[derive(Debug)]
pub enum ActionResult {
    /// Full display refresh plus a transient success notice.
    Rendered { view: DisplayModel, notice: String },
    /// Transient notice only; the visible state is unchanged.
    Notice(String),
    /// Blocking error panel with remediation text.
    Failed { title: String, message: String },
}

/// Session controller: owns the single current reading, the preferences and
/// the phase, and drives every state transition.
///
/// All lookup methods take `&mut self`, so a second lookup cannot start while
/// one is in flight; the exclusive borrow sequences requests structurally.
pub struct App {
    provider: Box<dyn WeatherProvider>,
    locator: Option<Arc<dyn Locator>>,
    prefs: Preferences,
    current: Option<WeatherReading>,
    phase: Phase,
}

impl App {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        locator: Option<Arc<dyn Locator>>,
        prefs: Preferences,
    ) -> Self {
        Self {
            provider,
            locator,
            prefs,
            current: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn unit(&self) -> Unit {
        self.prefs.unit()
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    pub fn recent(&self) -> &RecentSearches {
        self.prefs.recent()
    }

    pub fn current(&self) -> Option<&WeatherReading> {
        self.current.as_ref()
    }

    /// Display model for the current reading under the current unit, if any.
    pub fn view(&self) -> Option<DisplayModel> {
        self.current
            .as_ref()
            .map(|reading| display::to_display(reading, self.prefs.unit()))
    }

    /// Startup path: look up the stored last city, else the default city.
    pub async fn startup(&mut self) -> ActionResult {
        let city = self
            .prefs
            .last_city()
            .unwrap_or(DEFAULT_CITY)
            .to_string();
        self.lookup_city(&city).await
    }

    /// Search action. Empty or whitespace-only input yields a transient
    /// notice with no state transition and no network call.
    pub async fn search(&mut self, input: &str) -> ActionResult {
        let city = input.trim();
        if city.is_empty() {
            return ActionResult::Notice("Please enter a city name".to_string());
        }
        self.lookup_city(city).await
    }

    /// Locate action. Without a locator this is a transient notice; position
    /// faults become error states keyed by the fault subkind.
    pub async fn locate(&mut self) -> ActionResult {
        let Some(locator) = self.locator.clone() else {
            return ActionResult::Notice(
                "Geolocation is not supported on this device".to_string(),
            );
        };

        self.phase = Phase::Loading;
        match locator.position().await {
            Ok((lat, lon)) => match self.provider.by_coords(lat, lon).await {
                Ok(reading) => {
                    // The resolved place joins the recents, but the
                    // last-city slot keeps whatever was searched by name.
                    let city = reading.city_name.clone();
                    self.prefs.record_recent(&city);
                    self.finish_display(reading, "Weather data loaded for your location")
                }
                Err(fault) => self.fail(fault_messages(&fault)),
            },
            Err(fault) => self.fail(geo_fault_messages(&fault)),
        }
    }

    /// Retry action: re-run the search for a non-empty input, else re-run
    /// the last-city startup path.
    pub async fn retry(&mut self, input: &str) -> ActionResult {
        if input.trim().is_empty() {
            self.startup().await
        } else {
            self.search(input).await
        }
    }

    /// Flip the unit, persist it, and recompute only the
    /// temperature-dependent fields when a reading exists. No network call.
    pub fn toggle_unit(&mut self) -> Option<TempStrings> {
        let unit = self.prefs.toggle_unit();
        self.current
            .as_ref()
            .map(|reading| display::temperature_strings(reading, unit))
    }

    /// Flip the theme and persist it.
    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.toggle_theme()
    }

    async fn lookup_city(&mut self, city: &str) -> ActionResult {
        self.phase = Phase::Loading;
        match self.provider.by_city(city).await {
            Ok(reading) => {
                self.prefs.record_recent(city);
                self.prefs.set_last_city(city);
                let notice = format!("Weather data loaded for {}", reading.city_name);
                self.finish_display(reading, &notice)
            }
            Err(fault) => self.fail(fault_messages(&fault)),
        }
    }

    fn finish_display(&mut self, reading: WeatherReading, notice: &str) -> ActionResult {
        let view = display::to_display(&reading, self.prefs.unit());
        self.current = Some(reading);
        self.phase = Phase::Display;
        ActionResult::Rendered {
            view,
            notice: notice.to_string(),
        }
    }

    fn fail(&mut self, (title, message): (String, String)) -> ActionResult {
        self.phase = Phase::Error {
            title: title.clone(),
            message: message.clone(),
        };
        ActionResult::Failed { title, message }
    }
}

/// Title and human-readable message for a lookup fault.
pub fn fault_messages(fault: &Fault) -> (String, String) {
    let (title, message) = match fault {
        Fault::NotFound => (
            "Unable to Fetch Weather",
            "City not found. Please check the spelling and try again.".to_string(),
        ),
        Fault::Unauthorized => (
            "Unable to Fetch Weather",
            "Invalid or expired API key. Run `weatherly configure` to replace it.".to_string(),
        ),
        Fault::CredentialMissing => (
            "API Key Needed",
            "No API key configured. Grab a free key at openweathermap.org/api, \
             then run `weatherly configure` to get started."
                .to_string(),
        ),
        Fault::NetworkOrServer(_) => (
            "Unable to Fetch Weather",
            "Failed to fetch weather data. Please try again.".to_string(),
        ),
    };
    (title.to_string(), message)
}

/// Title and human-readable message for a position fault.
pub fn geo_fault_messages(fault: &GeoFault) -> (String, String) {
    let detail = match fault {
        GeoFault::PermissionDenied => "Please allow location access.",
        GeoFault::Unavailable => "Location information unavailable.",
        GeoFault::Timeout => "Location request timed out.",
        GeoFault::Other(_) => "An unknown error occurred.",
    };
    (
        "Location Error".to_string(),
        format!("Unable to get your location. {detail}"),
    )
}
