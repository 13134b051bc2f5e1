use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A validated city lookup. The city is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub fn new(city: &str) -> Result<Self, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::InvalidInput);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Current conditions for one city, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city_name: String,
    pub temperature_celsius: f64,
    pub humidity_percent: u8,
    pub icon_code: String,
}

/// One successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub city: String,
    pub observed_at: DateTime<Local>,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Searched: {} at {}",
            self.city,
            self.observed_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
