use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use skycast_core::{Config, IpGeolocator, WeatherClient, provider_from_config};

use crate::render::ConsoleRenderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Current weather and UV index in your terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default place.
    Configure,

    /// Show current weather for a place.
    Show {
        /// Place name, e.g. "London" or "Kyiv,UA".
        place: String,
    },

    /// Show current weather for wherever this machine appears to be.
    Here,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { place }) => show(&place).await,
            Some(Command::Here) => here().await,
            None => {
                // No arguments: behave like the app opening on its default place.
                let config = Config::load()?;
                let place = config.default_place().to_string();
                tracing::debug!("No place given, falling back to {place}");
                show(&place).await
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:").prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }
    config.set_api_key(api_key.to_string());

    let place = Text::new("Default place (leave blank for London):").prompt()?;
    if !place.trim().is_empty() {
        config.set_default_place(place.trim().to_string());
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

fn build_client(config: &Config) -> Result<WeatherClient> {
    let provider = provider_from_config(config)?;

    Ok(WeatherClient::new(
        provider,
        Box::new(IpGeolocator::new()),
        Box::new(ConsoleRenderer),
    ))
}

async fn show(place: &str) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    client.show_city(place).await;

    Ok(())
}

async fn here() -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;

    client.show_current_location().await;

    Ok(())
}
