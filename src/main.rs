use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use stayscope::api::AppState;
use stayscope::{NearbyService, StayScopeConfig, StayScopeError, logging, web};

/// Hotels in Seoul and the tourist attractions around them
#[derive(Debug, Parser)]
#[command(name = "stayscope", version, about)]
struct Cli {
    /// Configuration file (defaults to ~/.config/stayscope/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for stayscope
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the hotels from the tourism API
    Hotels,
    /// Attractions within a radius of a hotel
    Nearby {
        /// Exact hotel name as listed by `stayscope hotels`
        #[arg(long)]
        hotel: String,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what each feed loaded
    Sources,
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<StayScopeError>() {
                Some(error) => eprintln!("{}", error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = StayScopeConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    if config.hotels.service_key.is_none() {
        tracing::warn!(
            "No tourism API service key configured (hotels.service_key or STAYSCOPE_HOTELS__SERVICE_KEY); the hotel list will be empty"
        );
    }

    let service = NearbyService::from_config(&config).context("Failed to set up data feeds")?;

    match cli.command {
        Command::Hotels => {
            let hotels = service.hotels().await;
            if hotels.is_empty() {
                return Err(StayScopeError::empty_feed("hotel list").into());
            }
            for hotel in &hotels {
                println!("{}  ({})", hotel.label(), hotel.coordinates.format_coordinates());
            }
        }
        Command::Nearby {
            hotel,
            radius,
            json,
        } => {
            let radius_m = radius.unwrap_or_else(|| f64::from(config.search.default_radius_m));
            config.search.check_radius(radius_m)?;

            let report = service.nearby(&hotel, radius_m).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_table());
            }
        }
        Command::Sources => {
            let overview = service.sources().await;
            let feeds = std::iter::once(&overview.hotel_feed).chain(&overview.attraction_feeds);
            for feed in feeds {
                match &feed.error {
                    Some(error) => println!("{}: failed ({})", feed.label, error),
                    None => println!(
                        "{}: {} loaded, {} dropped",
                        feed.label, feed.loaded, feed.dropped
                    ),
                }
            }
            println!("cache ttl: {} s", overview.cache_ttl_seconds);
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let state = AppState {
                service: Arc::new(service),
                search: config.search.clone(),
            };
            web::run(state, port).await?;
        }
    }

    Ok(())
}
