//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::TomlConfigAdapter;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::ports::ConfigPort;

/// Build the configuration following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration(config_port: &dyn ConfigPort, cli: &Cli) -> Result<AppConfig> {
    info!("Initializing configuration hierarchy");

    let mut config = load_config_file(config_port, cli.config.as_deref()).await?;

    let env_overrides = config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, cli)?;
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    Ok(config)
}

/// An explicit path must load; otherwise the first default path found wins
async fn load_config_file(config_port: &dyn ConfigPort, explicit: Option<&str>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return config_port
            .load_config(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path));
    }

    for path in TomlConfigAdapter::default_config_paths() {
        if path.exists() {
            let path = path.to_string_lossy().to_string();
            return config_port
                .load_config(&path)
                .await
                .with_context(|| format!("Failed to load configuration from {}", path));
        }
    }

    info!("No configuration file found, using defaults");
    Ok(config_port.load_default_config().await)
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Result<usize> {
    let mut applied = 0;

    if let Some(poll_interval_ms) = cli.poll_interval_ms {
        info!("CLI override: poll_interval_ms = {}", poll_interval_ms);
        config.player.poll_interval_ms = poll_interval_ms;
        applied += 1;
    }

    config.validate()?;
    Ok(applied)
}
