use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;
use weatherly_core::{
    App, Config, FileStore, IpLocator, Locator, OpenWeather, Preferences, fault_messages,
};

use crate::ui;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherly", version, about = "Current weather in your terminal")]
pub struct Cli {
    /// Without a subcommand an interactive session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; falls back to the last searched city.
        city: Option<String>,
    },

    /// Show current weather for this device's position (by IP).
    Locate,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => {
                let Some(mut app) = boot()? else {
                    return Ok(());
                };
                ui::loading();
                let result = match city {
                    Some(city) => app.search(&city).await,
                    None => app.startup().await,
                };
                ui::apply(&app, result);
                Ok(())
            }
            Some(Command::Locate) => {
                let Some(mut app) = boot()? else {
                    return Ok(());
                };
                ui::loading();
                let result = app.locate().await;
                ui::apply(&app, result);
                Ok(())
            }
            None => interactive().await,
        }
    }
}

/// Prompt for and store the provider credential.
fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Assemble the session. Returns `None` after rendering the credential
/// error panel, so the caller exits without a crash.
fn boot() -> Result<Option<App>> {
    let config = Config::load()?;
    let provider = match OpenWeather::from_config(&config) {
        Ok(provider) => provider,
        Err(fault) => {
            let (title, message) = fault_messages(&fault);
            ui::error_panel(&title, &message);
            return Ok(None);
        }
    };

    let store = FileStore::open()?;
    let prefs = Preferences::load(Box::new(store), ui::os_prefers_dark());
    let locator: Arc<dyn Locator> = Arc::new(IpLocator::new());

    Ok(Some(App::new(Box::new(provider), Some(locator), prefs)))
}

async fn interactive() -> Result<()> {
    let Some(mut app) = boot()? else {
        return Ok(());
    };

    ui::loading();
    let result = app.startup().await;
    ui::apply(&app, result);

    // The retry action re-runs whatever the user typed last.
    let mut last_input = String::new();

    loop {
        let mut options = vec!["Search city".to_string()];
        for city in app.recent().cities() {
            options.push(format!("Recent: {city}"));
        }
        options.push("Use my location".to_string());
        options.push(format!("Switch to {}", app.unit().toggled().label()));
        options.push(format!("Switch to {} theme", app.theme().toggled().as_str()));
        options.push("Retry".to_string());
        options.push("Quit".to_string());

        let Some(choice) = Select::new("What next?", options).prompt_skippable()? else {
            break;
        };

        let result = if choice == "Search city" {
            let input = Text::new("City:").prompt_skippable()?.unwrap_or_default();
            last_input = input.clone();
            // Empty input stays a notice, never a loading state.
            if !input.trim().is_empty() {
                ui::loading();
            }
            Some(app.search(&input).await)
        } else if let Some(city) = choice.strip_prefix("Recent: ") {
            let city = city.to_string();
            last_input = city.clone();
            ui::loading();
            Some(app.search(&city).await)
        } else if choice == "Use my location" {
            ui::loading();
            Some(app.locate().await)
        } else if choice == "Retry" {
            ui::loading();
            Some(app.retry(&last_input).await)
        } else if choice.ends_with("theme") {
            let theme = app.toggle_theme();
            ui::toast(&format!("Switched to {} theme", theme.as_str()));
            None
        } else if let Some(label) = choice.strip_prefix("Switch to ") {
            match app.toggle_unit() {
                Some(temps) => ui::render_temps(&temps),
                None => ui::toast(&format!("Temperatures will show in {label}")),
            }
            None
        } else {
            break;
        };

        if let Some(result) = result {
            ui::apply(&app, result);
        }
    }

    Ok(())
}
