//! Display-side state: turns readings into display strings and keeps the search history.
//!
//! Nothing in here performs I/O. The owner feeds fetch results in and renders what comes out.

use chrono::{DateTime, Local, NaiveTime, TimeZone, Timelike};
use std::collections::VecDeque;

use crate::{
    error::FetchError,
    model::{HistoryEntry, WeatherReading},
};

/// Rendering-ready projection of a [`WeatherReading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub title: String,
    pub temperature: String,
    pub humidity: String,
    pub icon_url: String,
}

/// Whether a lookup is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
}

/// Cosmetic time-of-day classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daypart {
    Day,
    Night,
}

impl Daypart {
    /// `Day` for local times in [06:00, 18:00), `Night` otherwise.
    pub fn from_time(time: NaiveTime) -> Self {
        if (6..18).contains(&time.hour()) {
            Daypart::Day
        } else {
            Daypart::Night
        }
    }

    pub fn now() -> Self {
        daypart(&Local::now())
    }

    /// Background color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Daypart::Day => "#87CEFA",
            Daypart::Night => "#483D8B",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Daypart::Day => "day",
            Daypart::Night => "night",
        }
    }
}

/// Classify the wall-clock time of `now` in its own time zone.
pub fn daypart<Tz: TimeZone>(now: &DateTime<Tz>) -> Daypart {
    Daypart::from_time(now.time())
}

/// Owns the search history and the fetch phase.
///
/// History is newest first and grows without bound for the lifetime of the instance.
/// It is not synchronized; a single owner must apply every update.
#[derive(Debug, Clone)]
pub struct PresentationState {
    icon_base_url: String,
    history: VecDeque<HistoryEntry>,
    phase: Phase,
}

impl PresentationState {
    pub fn new(icon_base_url: &str) -> Self {
        Self {
            icon_base_url: icon_base_url.trim_end_matches('/').to_string(),
            history: VecDeque::new(),
            phase: Phase::Idle,
        }
    }

    pub fn apply(&self, reading: &WeatherReading) -> DisplayModel {
        DisplayModel {
            title: format!("Weather in {}", reading.city_name),
            temperature: format!("Temperature: {} °C", reading.temperature_celsius),
            humidity: format!("Humidity: {}%", reading.humidity_percent),
            icon_url: format!("{}/{}@2x.png", self.icon_base_url, reading.icon_code),
        }
    }

    /// Prepend a history entry. Repeated cities are recorded every time.
    pub fn record_history(&mut self, city: &str, now: DateTime<Local>) {
        self.history.push_front(HistoryEntry {
            city: city.to_string(),
            observed_at: now,
        });
    }

    /// Newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Enter `Fetching`. Returns `false` if a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.phase == Phase::Fetching {
            return false;
        }
        self.phase = Phase::Fetching;
        true
    }

    /// Finish a fetch for `city` and return to `Idle`.
    ///
    /// Success yields a display model and a history entry; failure changes nothing else.
    pub fn complete(
        &mut self,
        city: &str,
        result: Result<WeatherReading, FetchError>,
        now: DateTime<Local>,
    ) -> Result<DisplayModel, FetchError> {
        self.phase = Phase::Idle;

        let reading = result?;
        let model = self.apply(&reading);
        self.record_history(city.trim(), now);
        Ok(model)
    }
}
