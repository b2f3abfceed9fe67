use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use weatherstack_core::{
    Config, Credential, WeatherRequest, WeatherResult, fetch_weather, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Parser)]
#[command(name = "weatherstack", version, about = "Current weather from weatherstack")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store the API key and default request timeout.
    Configure,

    /// Show current temperature and humidity for a city.
    Show {
        /// City or place name, e.g. "New York".
        city: String,

        /// weatherstack access key; overrides the configured one.
        #[arg(long, env = "WEATHERSTACK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Time budget for the request in milliseconds; overrides the configured one.
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the result as a JSON object instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, api_key, timeout_ms, json } => {
                show(city, api_key, timeout_ms, json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherstack API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Shown on your weatherstack account dashboard")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    if !config.is_configured() {
        return Err(anyhow!("API key cannot be empty"));
    }

    let timeout_ms = CustomType::<u64>::new("Request timeout (ms):")
        .with_default(config.timeout().as_millis() as u64)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()
        .context("Failed to read timeout")?;

    if timeout_ms == 0 {
        return Err(anyhow!("Timeout must be greater than zero"));
    }
    config.timeout_ms = Some(timeout_ms);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(
    city: String,
    api_key: Option<String>,
    timeout_ms: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let timeout = timeout_ms.map(Duration::from_millis).unwrap_or_else(|| config.timeout());

    let credential = api_key.map(Credential::new).or_else(|| config.take_credential()).ok_or_else(
        || {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weatherstack configure` or set WEATHERSTACK_API_KEY."
            )
        },
    )?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, cancelling request");
            on_ctrl_c.cancel();
        }
    });

    debug!(%city, timeout_ms = timeout.as_millis() as u64, "fetching current weather");

    let request = WeatherRequest {
        credential: Some(credential),
        location: Some(city.clone()),
        timeout,
    };
    let outcome = fetch_weather(provider.as_ref(), request, &cancel).await;
    ctrl_c.abort();

    let weather = outcome.with_context(|| format!("Failed to fetch weather for '{city}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&weather)?);
    } else {
        print!("{}", format_human(&city, &weather));
    }

    Ok(())
}

fn format_human(city: &str, weather: &WeatherResult) -> String {
    format!(
        "Current weather in {city}:\n  Temperature: {} °F\n  Humidity:    {} %\n",
        weather.temperature(),
        weather.humidity(),
    )
}
