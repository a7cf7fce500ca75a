use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, SearchSession, SubmitError, docs::render_api_docs, provider_from_config, render,
};
use inquire::{Password, PasswordDisplayMode};

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather lookup")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive search prompt with a live date banner (default).
    Search,

    /// Look up one city and print the result.
    Show {
        /// City name: letters, spaces, hyphens and apostrophes.
        city: String,
    },

    /// Store a WeatherAPI.com key in the config file.
    Configure,

    /// Print the WeatherAPI reference.
    Docs,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Search);
        let config = Config::load()?;

        match command {
            Command::Search => {
                let provider = provider_from_config(&config)?;
                app::run_interactive(provider.into()).await?;
            }
            Command::Show { city } => {
                let provider = provider_from_config(&config)?;
                let mut session = SearchSession::new();

                // Failures are already reflected in the session state.
                match session.search(provider.as_ref(), &city).await {
                    Ok(_) | Err(SubmitError::Invalid(_)) => {}
                    Err(err @ SubmitError::InFlight) => return Err(err.into()),
                }
                println!("{}", render(session.state()));
            }
            Command::Configure => configure(config)?,
            Command::Docs => println!("{}", render_api_docs(config.base_url())),
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get a free key at https://www.weatherapi.com/")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;
    println!("Saved API key to {}", path.display());

    Ok(())
}
