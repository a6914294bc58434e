//! Command-line argument definitions

use clap::Args;

/// Arguments for the play command
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Play a clip from the catalog
    #[arg(long, conflicts_with_all = ["video_id", "start", "end"])]
    pub clip_id: Option<u64>,

    /// Video to play when not using the catalog
    #[arg(long, requires_all = ["start", "end"])]
    pub video_id: Option<String>,

    /// Clip start (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Clip end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Stop at the clip end instead of looping
    #[arg(long)]
    pub no_loop: bool,

    /// Start with captions off
    #[arg(long)]
    pub no_captions: bool,

    /// Play from the start as soon as the player is ready
    #[arg(long)]
    pub autoplay: bool,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,
}

/// Arguments for the clips command
#[derive(Args, Debug)]
pub struct ClipsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Clip being reviewed
    #[arg(long)]
    pub clip_id: u64,

    /// Recall score from 1 (forgot) to 5 (perfect)
    #[arg(long, allow_negative_numbers = true)]
    pub score: i64,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
