use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use skywatch_core::{Config, OpenWeatherProvider, Phase, SearchController, WeatherProvider};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "City weather search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key credential.
    Configure,

    /// Show current weather for a city and exit.
    Show {
        /// City name; the provider resolves it to a location.
        city: String,
    },

    /// Interactive search prompt. Enter triggers a search, Esc quits.
    Search,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let provider = provider_from_config()?;
                search_once(&provider, &city).await
            }
            Command::Search => {
                let provider = provider_from_config()?;
                search_loop(&provider).await
            }
        }
    }
}

fn provider_from_config() -> Result<OpenWeatherProvider> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;

    Ok(OpenWeatherProvider::new(api_key.to_owned()))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

/// One full search cycle: commit the query, fetch, render the outcome.
async fn search_once(provider: &dyn WeatherProvider, city: &str) -> Result<()> {
    let mut controller = SearchController::new();
    controller.input_changed(city);

    if let Some(ticket) = controller.search_requested() {
        println!("Fetching weather data, please wait...");
        let outcome = provider.current_weather(ticket.query()).await;
        controller.resolve(&ticket, outcome);
    }

    for line in render_lines(&controller) {
        println!("{line}");
    }

    Ok(())
}

/// The prompt is the input field: typed text is the raw input, Enter is the
/// search trigger, Esc tears the view down.
async fn search_loop(provider: &dyn WeatherProvider) -> Result<()> {
    let mut controller = SearchController::new();

    loop {
        let text = Text::new("City:")
            .with_help_message("Enter searches, Esc quits")
            .prompt_skippable()?;

        let Some(text) = text else {
            controller.teardown();
            break;
        };

        controller.input_changed(&text);
        if let Some(ticket) = controller.search_requested() {
            println!("Fetching weather data, please wait...");
            let outcome = provider.current_weather(ticket.query()).await;
            controller.resolve(&ticket, outcome);
        }

        for line in render_lines(&controller) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Map the controller's phase to output lines. Idle renders nothing.
fn render_lines(controller: &SearchController) -> Vec<String> {
    match controller.phase() {
        Phase::Idle => Vec::new(),
        Phase::Loading => vec!["Fetching weather data, please wait...".to_string()],
        Phase::Failed(failure) => vec![failure.message.clone()],
        Phase::Ready(snapshot) => vec![
            snapshot.location_line(),
            format!("Temperature: {}", snapshot.temperature_line()),
            format!("Feels like: {}", snapshot.feels_like_line()),
            format!("Weather: {} ({})", snapshot.description, snapshot.icon_url()),
        ],
    }
}
