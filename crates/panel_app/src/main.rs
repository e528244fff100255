mod platform;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use panel_core::{Msg, SearchForm, WHOLE_COUNTRY_SENTINEL};
use panel_logging::LogDestination;
use platform::config::{PanelConfig, DEFAULT_CONFIG_FILENAME};

#[derive(Debug, Parser)]
#[command(name = "panel")]
#[command(about = "Control panel for the 2GIS lead search backend")]
struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,
    /// Backend root, e.g. http://localhost:5000.
    #[arg(long)]
    base_url: Option<String>,
    /// Where panel.html and downloaded spreadsheets go.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a search and follow it until the results are downloaded.
    Search(SearchArgs),
    /// Follow a search that is already running on the backend.
    Watch,
    /// Download the spreadsheet of the last finished search.
    Download,
    /// Reset the backend job and the panel.
    Reset,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Defaults to the configured country.
    #[arg(long)]
    country: Option<String>,
    #[arg(long, conflicts_with = "whole_country")]
    city: Option<String>,
    /// Search every configured city of the country.
    #[arg(long)]
    whole_country: bool,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    max_results: Option<String>,
}

impl SearchArgs {
    fn into_form(self, default_country: &str) -> SearchForm {
        let city = if self.whole_country {
            WHOLE_COUNTRY_SENTINEL.to_string()
        } else {
            self.city.unwrap_or_default()
        };
        SearchForm {
            country: self.country.unwrap_or_else(|| default_country.to_string()),
            city,
            category: self.category.unwrap_or_default(),
            max_results: self.max_results.unwrap_or_default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    panel_logging::initialize(
        LogDestination::Both(PathBuf::from(panel_logging::DEFAULT_LOG_FILE)),
        level,
    );

    let mut config = PanelConfig::load(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let initial = match cli.command {
        Command::Search(args) => vec![
            Msg::FormChanged(args.into_form(&config.default_country)),
            Msg::SearchSubmitted,
        ],
        Command::Watch => vec![Msg::WatchRequested],
        Command::Download => vec![Msg::DownloadClicked],
        Command::Reset => vec![Msg::ResetClicked],
    };

    platform::run_app(config, initial)
}
