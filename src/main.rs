mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod logging;
mod opener;
mod projection;
mod report;
mod session;
mod snapshot;
mod stats;
mod ui;
mod variant;
mod view_model;
mod workers;

use crate::config::{Config, Overrides, Settings, get_config_path};
use crate::consts::cli_consts::API_URL_ENV_VAR;
use crate::environment::Environment;
use crate::projection::project;
use crate::report::render_report;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::stats::error::StatsError;
use crate::stats::error_handler::ErrorHandler;
use crate::stats::{StatsClient, StatsSource};
use crate::variant::DashboardVariant;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        /// Base URL of the CrisisTruth backend
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Seconds between refreshes
        #[arg(long, value_name = "SECONDS")]
        refresh_secs: Option<u64>,

        /// Dashboard presentation
        #[arg(long, value_enum)]
        variant: Option<DashboardVariant>,

        /// Print refreshes to the console instead of drawing the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Paint the variant's background colour
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Fetch the dashboard statistics once and print them
    Snapshot {
        /// Base URL of the CrisisTruth backend
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Truncation and labels to apply
        #[arg(long, value_enum)]
        variant: Option<DashboardVariant>,

        /// Print the normalized snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Manage the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save settings used when no flag overrides them
    Set {
        /// Base URL of the CrisisTruth backend
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Seconds between refreshes
        #[arg(long, value_name = "SECONDS")]
        refresh_secs: Option<u64>,

        /// Dashboard presentation
        #[arg(long, value_enum)]
        variant: Option<DashboardVariant>,
    },
    /// Print the saved configuration and the effective settings
    Show,
    /// Delete the saved configuration
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Start {
            api_url,
            refresh_secs,
            variant,
            headless,
            with_background,
        } => {
            let overrides = Overrides {
                api_url,
                refresh_secs,
                variant,
            };
            let settings = load_settings(&config_path, &overrides)?;
            start(settings, headless, with_background).await
        }
        Command::Snapshot {
            api_url,
            variant,
            json,
        } => {
            let overrides = Overrides {
                api_url,
                variant,
                ..Overrides::default()
            };
            let settings = load_settings(&config_path, &overrides)?;
            snapshot(settings, json).await
        }
        Command::Config { action } => configure(&config_path, action),
    }
}

/// Resolves settings from flags, the environment and the config file.
fn load_settings(config_path: &Path, overrides: &Overrides) -> Result<Settings, Box<dyn Error>> {
    if let Some(url) = &overrides.api_url {
        validate_api_url(url)?;
    }
    let config = Config::load_or_default(config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    let env_api_url = std::env::var(API_URL_ENV_VAR).ok();
    Ok(Settings::resolve(overrides, env_api_url.as_deref(), &config))
}

fn validate_api_url(url: &str) -> Result<(), Box<dyn Error>> {
    url.parse::<Environment>()
        .map(|_| ())
        .map_err(|_| format!("Invalid API URL '{}': expected http:// or https://", url).into())
}

/// Starts the dashboard.
///
/// # Arguments
/// * `settings` - Resolved base URL, refresh interval and variant.
/// * `headless` - Print refreshes to stdout instead of running the TUI.
/// * `with_background` - Paint the variant's background colour.
async fn start(
    settings: Settings,
    headless: bool,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    let session = setup_session(settings)?;
    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, with_background).await
    }
}

/// One fetch, printed as a report or as JSON.
async fn snapshot(settings: Settings, json: bool) -> Result<(), Box<dyn Error>> {
    let client = StatsClient::new(settings.environment.clone())?;
    let snapshot = match client.fetch_dashboard_stats().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            if matches!(&e, StatsError::Reqwest(inner) if inner.is_connect()) {
                cli_messages::print_friendly_error_header(&client.environment().api_url());
            }
            let summary = ErrorHandler::new().summarize(&e);
            print_cmd_error!("Failed to fetch dashboard statistics.", "{}", summary);
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_report(&project(Some(&snapshot), settings.variant), settings.variant));
    }
    Ok(())
}

fn configure(config_path: &Path, action: ConfigAction) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Set {
            api_url,
            refresh_secs,
            variant,
        } => {
            if let Some(url) = &api_url {
                validate_api_url(url)?;
            }
            if refresh_secs == Some(0) {
                return Err(Box::from("--refresh-secs must be at least 1"));
            }
            if api_url.is_none() && refresh_secs.is_none() && variant.is_none() {
                print_cmd_warn!(
                    "Nothing to save",
                    "pass --api-url, --refresh-secs or --variant"
                );
                return Ok(());
            }
            let mut config = Config::load_or_default(config_path)?;
            config.merge(api_url, refresh_secs, variant);
            config
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load_or_default(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            let env_api_url = std::env::var(API_URL_ENV_VAR).ok();
            let settings = Settings::resolve(&Overrides::default(), env_api_url.as_deref(), &config);
            print_cmd_info!(
                "Effective settings",
                "api_url={} refresh_secs={} variant={}",
                settings.environment.api_url(),
                settings.refresh_interval.as_secs(),
                settings.variant
            );
            Ok(())
        }
        ConfigAction::Reset => {
            Config::clear(config_path)?;
            print_cmd_success!("Configuration cleared", "{}", config_path.display());
            Ok(())
        }
    }
}
