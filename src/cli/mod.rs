//! CLI module for EchoSlice
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

use crate::config::{ENV_CONFIG_PATH, ENV_LOG_LEVEL};
use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

pub use args::{ClipsArgs, PlayArgs, ReviewArgs};

/// EchoSlice clip player
///
/// Plays a bounded window of a video, looping or stopping at the end, and
/// schedules spaced-repetition reviews of study clips.
#[derive(Parser, Debug)]
#[command(name = "echoslice")]
#[command(about = "EchoSlice - Replay a bounded clip of a video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true, env = ENV_LOG_LEVEL)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Configuration file
    #[arg(long, global = true, env = ENV_CONFIG_PATH)]
    pub config: Option<String>,

    /// Boundary poll interval in milliseconds
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a clip, reading control commands from stdin
    Play(args::PlayArgs),
    /// List the configured clips
    Clips(args::ClipsArgs),
    /// Record a review score for a clip and show the next review date
    Review(args::ReviewArgs),
}
