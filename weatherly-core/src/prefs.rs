use crate::recent::RecentSearches;
use crate::store::KeyValueStore;
use crate::units::Unit;

pub const UNIT_KEY: &str = "weatherly_unit";
pub const THEME_KEY: &str = "weatherly_theme";
pub const LAST_CITY_KEY: &str = "weatherly_last_city";
pub const RECENT_KEY: &str = "weatherly_recent";

/// Visual theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Typed facade over the key-value store for session preferences.
///
/// Loaded once at startup; every mutation writes through to the store
/// immediately. A failed write is logged and otherwise best-effort.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
    unit: Unit,
    theme: Theme,
    last_city: Option<String>,
    recent: RecentSearches,
}

impl Preferences {
    /// Load preferences, applying defaults for absent keys. `os_dark_hint`
    /// stands in for the platform dark-mode signal and only matters when no
    /// theme has been stored yet.
    pub fn load(store: Box<dyn KeyValueStore>, os_dark_hint: bool) -> Self {
        let unit = store
            .get(UNIT_KEY)
            .as_deref()
            .and_then(Unit::parse)
            .unwrap_or_default();

        let theme = store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(if os_dark_hint { Theme::Dark } else { Theme::Light });

        let last_city = store.get(LAST_CITY_KEY).filter(|city| !city.is_empty());

        let recent = store
            .get(RECENT_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .map(RecentSearches::from_cities)
            .unwrap_or_default();

        Self {
            store,
            unit,
            theme,
            last_city,
            recent,
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn toggle_unit(&mut self) -> Unit {
        self.unit = self.unit.toggled();
        self.persist(UNIT_KEY, self.unit.as_str());
        self.unit
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist(THEME_KEY, self.theme.as_str());
        self.theme
    }

    pub fn set_last_city(&mut self, city: &str) {
        self.last_city = Some(city.to_string());
        self.persist(LAST_CITY_KEY, city);
    }

    pub fn record_recent(&mut self, city: &str) {
        self.recent.record(city);
        match serde_json::to_string(self.recent.cities()) {
            Ok(json) => self.persist(RECENT_KEY, &json),
            Err(err) => tracing::warn!(%err, "failed to serialize recent searches"),
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::warn!(key, %err, "failed to persist preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn seeded(entries: &[(&str, &str)]) -> Box<MemoryStore> {
        let mut store = MemoryStore::new();
        for (key, value) in entries {
            store.set(key, value).unwrap();
        }
        Box::new(store)
    }

    #[test]
    fn defaults_apply_when_store_is_empty() {
        let prefs = Preferences::load(Box::new(MemoryStore::new()), false);

        assert_eq!(prefs.unit(), Unit::Celsius);
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.last_city(), None);
        assert!(prefs.recent().is_empty());
    }

    #[test]
    fn dark_hint_applies_only_without_stored_theme() {
        let prefs = Preferences::load(Box::new(MemoryStore::new()), true);
        assert_eq!(prefs.theme(), Theme::Dark);

        let prefs = Preferences::load(seeded(&[(THEME_KEY, "light")]), true);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn stored_values_are_loaded() {
        let prefs = Preferences::load(
            seeded(&[
                (UNIT_KEY, "fahrenheit"),
                (THEME_KEY, "dark"),
                (LAST_CITY_KEY, "Paris"),
                (RECENT_KEY, r#"["Paris","London"]"#),
            ]),
            false,
        );

        assert_eq!(prefs.unit(), Unit::Fahrenheit);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.last_city(), Some("Paris"));
        assert_eq!(prefs.recent().cities(), ["Paris", "London"]);
    }

    #[test]
    fn garbage_stored_values_fall_back_to_defaults() {
        let prefs = Preferences::load(
            seeded(&[(UNIT_KEY, "kelvin"), (RECENT_KEY, "not json")]),
            false,
        );

        assert_eq!(prefs.unit(), Unit::Celsius);
        assert!(prefs.recent().is_empty());
    }

    /// Store handle that stays observable after being moved into `Preferences`.
    #[derive(Clone, Default)]
    struct SharedStore(std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn mutations_write_through() {
        let store = SharedStore::default();
        let mut prefs = Preferences::load(Box::new(store.clone()), false);

        prefs.toggle_unit();
        prefs.toggle_theme();
        prefs.set_last_city("Kyiv");
        prefs.record_recent("Kyiv");

        assert_eq!(store.get(UNIT_KEY).as_deref(), Some("fahrenheit"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(store.get(LAST_CITY_KEY).as_deref(), Some("Kyiv"));
        assert_eq!(store.get(RECENT_KEY).as_deref(), Some(r#"["Kyiv"]"#));
    }

    #[test]
    fn toggling_unit_twice_restores_it() {
        let mut prefs = Preferences::load(Box::new(MemoryStore::new()), false);

        prefs.toggle_unit();
        assert_eq!(prefs.unit(), Unit::Fahrenheit);
        prefs.toggle_unit();
        assert_eq!(prefs.unit(), Unit::Celsius);
    }
}
