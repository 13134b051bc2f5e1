use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{WeatherQuery, WeatherReading},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Source of current weather for a city.
///
/// Implementations hold only read-only configuration, so a single instance may be
/// shared between callers.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError>;

    /// Validate `city` and look it up. Blank input fails before any request is made.
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let query = WeatherQuery::new(city)?;
        self.get_weather(&query).await
    }
}
