use std::collections::BTreeMap;

use chrono_tz::Tz;

/// City queried when nothing else has been selected yet.
pub const DEFAULT_CITY: &str = "Mumbai";

/// A city that is always shown in the panel footer, with the zone used for its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCity {
    pub name: &'static str,
    pub timezone: Tz,
}

impl ReferenceCity {
    pub const fn new(name: &'static str, timezone: Tz) -> Self {
        Self { name, timezone }
    }
}

/// The fixed footer cities, in display order.
pub const REFERENCE_CITIES: [ReferenceCity; 8] = [
    ReferenceCity::new("New York", chrono_tz::America::New_York),
    ReferenceCity::new("London", chrono_tz::Europe::London),
    ReferenceCity::new("Tokyo", chrono_tz::Asia::Tokyo),
    ReferenceCity::new("Sydney", chrono_tz::Australia::Sydney),
    ReferenceCity::new("Paris", chrono_tz::Europe::Paris),
    ReferenceCity::new("Mumbai", chrono_tz::Asia::Kolkata),
    ReferenceCity::new("Moscow", chrono_tz::Europe::Moscow),
    ReferenceCity::new("Cape Town", chrono_tz::Africa::Johannesburg),
];

/// Current conditions for one city as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Provider condition label, e.g. "Clear" or "Rain".
    pub condition: String,
    pub temperature_c: f64,
}

impl WeatherObservation {
    pub fn new(condition: impl Into<String>, temperature_c: f64) -> Self {
        Self {
            condition: condition.into(),
            temperature_c,
        }
    }
}

/// Reference-city name -> observation for one refresh cycle.
pub type AggregatedTable = BTreeMap<String, WeatherObservation>;

/// Reference-city name -> formatted local time for one refresh cycle.
pub type LocalTimeTable = BTreeMap<String, String>;
