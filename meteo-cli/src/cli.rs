use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use meteo_core::{
    App, Config, FileStore, SearchHistoryStore, SearchOutcome, WeatherApi, WeatherPipeline,
    provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather and a 3-day forecast for a city.
    Show {
        /// City name; typos of well-known cities are corrected.
        /// Defaults to the last city looked up.
        city: Option<String>,

        /// Print the rendered fields as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List recently searched cities, newest first.
    History,

    /// Forget all recently searched cities.
    ClearHistory,

    /// Interactively set the default city and language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city, json } => {
                let app = build_app(&config)?;
                show(&app, city, json).await?;
            }
            Command::History => {
                let app = build_app(&config)?;
                let history = app.history();
                if history.is_empty() {
                    println!("История поиска пуста");
                }
                for city in history {
                    println!("{city}");
                }
            }
            Command::ClearHistory => {
                build_app(&config)?.clear_history();
                println!("История поиска очищена");
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn build_app(config: &Config) -> anyhow::Result<App<Box<dyn WeatherApi>, FileStore>> {
    let store = FileStore::new(Config::state_file_path()?);
    tracing::debug!(path = %store.path().display(), "using state file");

    let pipeline = WeatherPipeline::new(
        provider_from_config(config),
        config.corrector(),
        SearchHistoryStore::new(store),
    );

    Ok(App::new(pipeline, config.default_city.clone()))
}

async fn show(
    app: &App<Box<dyn WeatherApi>, FileStore>,
    city: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let city = city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| app.initial_city());

    match app.search(&city).await {
        SearchOutcome::Rendered(view) => {
            if json {
                let out = serde_json::to_string_pretty(&view)
                    .context("Failed to serialize weather view")?;
                println!("{out}");
            } else {
                println!("{view}");
                println!();
                println!("История: {}", app.history().join(", "));
            }
            Ok(())
        }
        SearchOutcome::Failed(message) => bail!(message),
        SearchOutcome::Superseded => bail!("Lookup for '{city}' was superseded"),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city)?;

    let language = Text::new("Language for place names (two-letter code):")
        .with_default(&config.language)
        .prompt()
        .context("Failed to read language")?;
    config.set_language(&language)?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_takes_optional_city_and_json_flag() {
        let cli = Cli::try_parse_from(["meteo", "show", "Osh", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city.as_deref(), Some("Osh"));
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["meteo", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show { city: None, json: false }));
    }

    #[test]
    fn history_subcommands_parse() {
        let cli = Cli::try_parse_from(["meteo", "clear-history"]).unwrap();
        assert!(matches!(cli.command, Command::ClearHistory));

        let cli = Cli::try_parse_from(["meteo", "history"]).unwrap();
        assert!(matches!(cli.command, Command::History));
    }
}
