/// Temperature unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
        }
    }

    /// Symbol appended to displayed temperatures.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    /// Parse a stored preference value; unknown strings yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "celsius" => Some(Unit::Celsius),
            "fahrenheit" => Some(Unit::Fahrenheit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_and_boiling_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Unit::Celsius.toggled().toggled(), Unit::Celsius);
        assert_eq!(Unit::Fahrenheit.toggled().toggled(), Unit::Fahrenheit);
    }

    #[test]
    fn parse_roundtrip() {
        for unit in [Unit::Celsius, Unit::Fahrenheit] {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(Unit::parse("kelvin"), None);
    }
}
