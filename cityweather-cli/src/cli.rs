use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::sync::Arc;

use cityweather_core::{
    Config, Daypart, FetchWorker, OpenWeatherClient, PresentationState, WeatherProvider,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather by city name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optionally a different API base URL).
    Configure {
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,
    },

    /// Prompt for cities repeatedly and keep a search history for the session.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { base_url } => configure(base_url),
            Command::Show { city } => show(&Config::load()?, &city).await,
            Command::Interactive => interactive(&Config::load()?).await,
        }
    }
}

fn configure(base_url: Option<String>) -> Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    if let Some(url) = base_url {
        config.base_url = url;
    }

    tracing::debug!(path = %path.display(), "Saving configuration");
    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(config: &Config, city: &str) -> Result<()> {
    let client = OpenWeatherClient::from_config(config)?;
    let mut state = PresentationState::new(&config.icon_base_url);

    state.begin_fetch();
    let result = client.fetch(city).await;

    match state.complete(city, result, Local::now()) {
        Ok(model) => {
            println!("{}", render::display(&model, Daypart::now()));
            Ok(())
        }
        Err(err) => {
            let message = err.user_message();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

async fn interactive(config: &Config) -> Result<()> {
    let provider: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherClient::from_config(config)?);
    let mut worker = FetchWorker::spawn(provider);
    let mut state = PresentationState::new(&config.icon_base_url);

    println!("Enter a city name (Esc or Ctrl-C to quit).");

    while let Some(city) = prompt_city().await? {
        if !state.begin_fetch() {
            continue;
        }
        worker.submit(city).await?;

        let Some(done) = worker.next_completed().await else {
            bail!("Fetch worker stopped unexpectedly");
        };

        match state.complete(&done.city, done.result, Local::now()) {
            Ok(model) => println!("{}", render::display(&model, Daypart::now())),
            Err(err) => println!("{}", render::error(&done.city, &err)),
        }
        println!("{}\n", render::history(state.history()));
    }

    worker.shutdown().await
}

/// Ask for a city off the async runtime. `None` when the user quits.
async fn prompt_city() -> Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("City:").with_placeholder("Enter city name").prompt()
    })
    .await?;

    match answer {
        Ok(city) => Ok(Some(city)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city name"),
    }
}
