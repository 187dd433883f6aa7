use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use lookup_core::{Config, LookupView, ProviderId, render};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "lookup", version, about = "Current weather and a photo for any city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, "openweather" or "unsplash".
        provider: String,
    },

    /// Look up a single city and print the result.
    Show {
        /// City name, sent to the providers as typed.
        city: String,
    },

    /// Keep prompting for cities until Esc or Ctrl-C (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure { provider } => {
                configure(&provider)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => show(city).await,
            Command::Interactive => {
                interactive().await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_view() -> anyhow::Result<LookupView> {
    let config = Config::load()?;
    debug!(
        openweather = config.is_provider_configured(ProviderId::OpenWeather),
        unsplash = config.is_provider_configured(ProviderId::Unsplash),
        stale = ?config.view.stale,
        "configuration loaded"
    );
    Ok(LookupView::from_config(&config))
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    // Environment overrides are not persisted.
    let mut config = Config::load_file()?;

    let key = Password::new(&format!("{id} API key:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key for '{id}' must not be empty");
    }

    config.upsert_provider_api_key(id, key.to_string());
    config.save()?;

    println!(
        "Saved {id} credentials to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(city: String) -> anyhow::Result<ExitCode> {
    let mut view = load_view()?;
    view.set_query(city);
    view.submit().await;

    print!("{}", render(view.state()));

    if view.state().error.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn interactive() -> anyhow::Result<()> {
    let mut view = load_view()?;

    loop {
        let answer = Text::new("City:")
            .with_placeholder("Enter city name...")
            .with_initial_value(&view.state().query)
            .prompt();

        let query = match answer {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        view.set_query(query);
        let Some(submission) = view.begin() else {
            continue;
        };

        println!("{}", render(view.state()).submit.label);
        let outcome = view.lookup().run(&submission).await;
        view.settle(submission, outcome);

        println!();
        print!("{}", render(view.state()));
        println!();
    }

    Ok(())
}
