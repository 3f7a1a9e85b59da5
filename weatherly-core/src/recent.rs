/// Upper bound on the recent-searches list.
pub const MAX_RECENT: usize = 5;

/// Bounded, deduplicated, most-recent-first list of searched city names.
///
/// No two entries compare equal case-insensitively; re-recording an existing
/// city moves it to the front with the new casing instead of duplicating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    cities: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored list, re-applying the invariants in case the
    /// stored data was edited by hand.
    pub fn from_cities(cities: Vec<String>) -> Self {
        let mut list = Self::new();
        for city in cities.iter().rev() {
            list.record(city);
        }
        list
    }

    /// Remove any case-insensitive duplicate, prepend, truncate to the bound.
    pub fn record(&mut self, city: &str) {
        let lowered = city.to_lowercase();
        self.cities.retain(|c| c.to_lowercase() != lowered);
        self.cities.insert(0, city.to_string());
        self.cities.truncate(MAX_RECENT);
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_same_city_twice_keeps_one_entry() {
        let mut list = RecentSearches::new();
        list.record("paris");
        list.record("Paris");

        assert_eq!(list.cities(), ["Paris"]);
    }

    #[test]
    fn re_searching_moves_to_front() {
        let mut list = RecentSearches::new();
        list.record("London");
        list.record("Kyiv");
        list.record("london");

        assert_eq!(list.cities(), ["london", "Kyiv"]);
    }

    #[test]
    fn six_distinct_cities_drop_the_oldest() {
        let mut list = RecentSearches::new();
        for city in ["Oslo", "Lima", "Cairo", "Tokyo", "Quito", "Dakar"] {
            list.record(city);
        }

        assert_eq!(list.cities(), ["Dakar", "Quito", "Tokyo", "Cairo", "Lima"]);
    }

    #[test]
    fn from_cities_preserves_order_and_bound() {
        let stored = vec![
            "A".to_string(),
            "B".to_string(),
            "a".to_string(),
            "C".to_string(),
            "D".to_string(),
            "E".to_string(),
            "F".to_string(),
        ];
        let list = RecentSearches::from_cities(stored);

        assert_eq!(list.cities(), ["A", "B", "C", "D", "E"]);
    }
}
