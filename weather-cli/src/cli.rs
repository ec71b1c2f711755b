use std::{io::Write, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use weather_panel_core::{
    Config, Event, Panel, PanelView, REFERENCE_CITIES, SystemClock, provider::provider_from_config,
    view::INPUT_PROMPT,
};

use crate::render::render;

const DEFAULT_LOG_LEVEL: Level = Level::WARN;
const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;
const QUIT: &str = ":q";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-panel",
    version,
    about = "Current weather for a city of your choice and eight world cities"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[arg(long, global = true, default_value_t = DEFAULT_LOG_LEVEL)]
    pub log_level: Level,

    /// Base URL of the OpenWeather API; overrides the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Timeout for each weather request, in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MILLIS)]
    pub timeout_millis: u64,

    /// Print plain text without colours.
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default city.
    Configure,

    /// Fetch everything once and print the panel.
    Show {
        /// City to look up; defaults to the configured city.
        city: Option<String>,
    },

    /// Interactive panel: type a city name and press enter to switch, `:q` to quit.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match &self.command {
            Command::Configure => configure(),
            Command::Show { city } => self.show(city.as_deref()).await,
            Command::Watch => self.watch().await,
        }
    }

    fn panel(&self, city: Option<&str>) -> anyhow::Result<Panel> {
        let config = Config::load()?;
        let timeout = Duration::from_millis(self.timeout_millis);
        let provider = provider_from_config(&config, self.api_url.as_deref(), timeout)?;

        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(config.default_city())
            .to_string();

        Ok(Panel::new(
            city,
            Arc::new(provider),
            Arc::new(SystemClock),
            &REFERENCE_CITIES,
        ))
    }

    fn draw(&self, panel: &Panel) -> anyhow::Result<()> {
        let view = PanelView::from_state(panel.state(), &REFERENCE_CITIES);
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", render(&view, !self.no_color)).context("Failed to write panel")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(())
    }

    async fn show(&self, city: Option<&str>) -> anyhow::Result<()> {
        let mut panel = self.panel(city)?;
        panel.start();
        panel.settle().await;
        self.draw(&panel)
    }

    async fn watch(&self) -> anyhow::Result<()> {
        let mut panel = self.panel(None)?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        panel.start();
        self.draw(&panel)?;
        eprintln!("{INPUT_PROMPT} (`{QUIT}` to quit):");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    if line.trim() == QUIT {
                        break;
                    }
                    if panel.dispatch(Event::InputChanged(line)) {
                        self.draw(&panel)?;
                    }
                }
                changed = panel.next_event() => {
                    match changed {
                        Some(true) => self.draw(&panel)?,
                        Some(false) => {}
                        None => break,
                    }
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
