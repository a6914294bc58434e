//! EchoSlice CLI
//!
//! Plays a bounded clip of a video with loop and caption toggles, and keeps a
//! small catalog of study clips with spaced-repetition review scheduling.
//!
//! # Usage
//!
//! ```bash
//! echoslice clips
//! echoslice play --clip-id 1 --autoplay --duration 60
//! echoslice play --video-id Ks-_Mh1QhMc --start 1:50 --end 2:20 --no-loop
//! echoslice review --clip-id 1 --score 4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use echoslice::adapters::TomlConfigAdapter;
use echoslice::app::DefaultAppContainer;
use echoslice::cli::{commands, Cli, Commands};
use echoslice::config_initialization::initialize_configuration;
use echoslice::utils::logging::{init_logging, LoggingConfig};

/// Main entry point for the EchoSlice CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::new(&cli.log_level, cli.log_format)?;
    init_logging(&logging);

    info!("Starting EchoSlice");

    let config_port = TomlConfigAdapter::new();
    let config = initialize_configuration(&config_port, &cli).await?;
    let container = DefaultAppContainer::new(config)?;

    match cli.command {
        Commands::Play(args) => {
            info!("Executing play command");
            commands::play(args, &container).await?;
        }
        Commands::Clips(args) => {
            info!("Executing clips command");
            commands::clips(args, &container)?;
        }
        Commands::Review(args) => {
            info!("Executing review command");
            commands::review(args, &container)?;
        }
    }

    info!("EchoSlice completed successfully");
    Ok(())
}
