//! EchoSlice clip player library
//!
//! Drives an embeddable video player so that playback stays inside a bounded
//! clip window: play always restarts from the clip start, and a periodic
//! boundary monitor loops back or pauses when the clip end is reached.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{ClipController, ControllerSettings, PlayerApi, PollOutcome};
pub use config::AppConfig;
pub use domain::errors::DomainError;
pub use domain::model::{
    ClipSpec, ControlLabels, ControllerPhase, KeyEvent, KeyOutcome, MountPoint, PlaybackState,
    PlayerCommand, TimeSpec,
};
pub use error::{EchoSliceError, EchoSliceResult};
