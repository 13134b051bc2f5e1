use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::Config,
    error::FetchError,
    model::{WeatherQuery, WeatherReading},
};

use super::WeatherProvider;

/// Current-weather client for the OpenWeather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build a client from loaded configuration. Fails if no API key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;

        Self::new(api_key.to_owned(), &config.base_url, config.timeout())
            .context("Failed to build HTTP client")
    }

    #[tracing::instrument(skip(self, query), fields(city = %query.city()))]
    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/weather", self.base_url);
        tracing::debug!(%url, "Requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        // Read the full body so the connection goes back to the pool on every path.
        let body = res.text().await?;
        tracing::debug!(%status, "Received provider response");

        if status != StatusCode::OK {
            tracing::info!(%status, body = %truncate_body(&body), "Provider rejected request");
            return Err(FetchError::ProviderError(status.as_u16()));
        }

        let reading = parse_current(&body).inspect_err(|err| {
            tracing::warn!(error = %err, body = %truncate_body(&body), "Malformed provider payload");
        })?;

        tracing::info!(
            city = %reading.city_name,
            temp = reading.temperature_celsius,
            "Weather data fetched"
        );

        Ok(reading)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError> {
        self.fetch_current(query).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Parse a current-weather body. Any missing or mistyped field rejects the whole body.
pub fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    if parsed.main.humidity > 100 {
        return Err(FetchError::MalformedResponse(format!(
            "humidity out of range: {}",
            parsed.main.humidity
        )));
    }

    let icon_code = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.icon)
        .ok_or_else(|| FetchError::MalformedResponse("empty weather list".to_string()))?;

    Ok(WeatherReading {
        city_name: parsed.name,
        temperature_celsius: parsed.main.temp,
        humidity_percent: parsed.main.humidity,
        icon_code,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
