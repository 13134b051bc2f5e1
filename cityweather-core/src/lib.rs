//! Core library for the `cityweather` lookup tool.
//!
//! This crate defines:
//! - Configuration loading (file + environment)
//! - The weather provider abstraction and the OpenWeather client
//! - Shared domain models and the fetch error taxonomy
//! - Presentation state: display strings, search history, daypart
//! - A background worker that delivers fetch results over a channel
//!
//! It is used by `cityweather-cli`, but holds no terminal or GUI code of its own.

pub mod config;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod worker;

pub use config::Config;
pub use error::FetchError;
pub use model::{HistoryEntry, WeatherQuery, WeatherReading};
pub use presentation::{Daypart, DisplayModel, Phase, PresentationState, daypart};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use worker::{FetchCompleted, FetchWorker};
