use chrono::{DateTime, Utc};

use crate::model::{LocalTimeTable, ReferenceCity};

/// Source of "now" for the local-time table.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `hh:mm AM/PM` in the city's own zone.
pub fn local_time(city: &ReferenceCity, now: DateTime<Utc>) -> String {
    now.with_timezone(&city.timezone).format("%I:%M %p").to_string()
}

/// One entry per reference city, keyed by city name.
pub fn local_time_table(cities: &[ReferenceCity], now: DateTime<Utc>) -> LocalTimeTable {
    cities
        .iter()
        .map(|city| (city.name.to_string(), local_time(city, now)))
        .collect()
}
