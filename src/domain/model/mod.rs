// Domain models - Clip, playback and catalog types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Player module that renders captions
pub const CAPTIONS_MODULE: &str = "captions";

/// Option key selecting the caption track inside the captions module
pub const CAPTION_TRACK_OPTION: &str = "track";

/// Caption language used when nothing else is configured
pub const DEFAULT_CAPTION_LANGUAGE: &str = "en";

/// Key code of the play-from-start shortcut
pub const SHORTCUT_KEY_CODE: &str = "Space";

/// Cadence of the boundary monitor
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse `123.45`, `MM:SS(.ms)` or `HH:MM:SS(.ms)`
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!("Time is not finite: {}", trimmed)));
            }
            if seconds < 0.0 {
                return Err(DomainError::BadArgs("Time cannot be negative".to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let seconds_of = |part: &str| -> Result<f64, DomainError> {
            let value = part
                .parse::<f64>()
                .map_err(|_| DomainError::BadArgs(format!("Invalid seconds: {}", part)))?;
            if !(0.0..60.0).contains(&value) {
                return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
            }
            Ok(value)
        };
        let whole_of = |part: &str, what: &str| -> Result<u32, DomainError> {
            part.parse::<u32>()
                .map_err(|_| DomainError::BadArgs(format!("Invalid {}: {}", what, part)))
        };

        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = whole_of(minutes, "minutes")?;
                let seconds = seconds_of(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = whole_of(hours, "hours")?;
                let minutes = whole_of(minutes, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
                }
                let seconds = seconds_of(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time format: {}. Supported formats: seconds (e.g., 110), MM:SS.ms (e.g., 1:50.5), HH:MM:SS.ms (e.g., 0:01:50)",
                trimmed
            ))),
        }
    }

    /// Format as `M:SS.mmm` or `H:MM:SS.mmm`
    pub fn format_hms(&self) -> String {
        let total_millis = (self.seconds * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis / 60_000) % 60;
        let seconds = (total_millis / 1000) % 60;
        let millis = total_millis % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, millis)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// A bounded `[start_sec, end_sec)` window of one video.
///
/// Only constructible through [`ClipSpec::new`], so `0 <= start_sec < end_sec`
/// holds for every value, deserialized ones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClipBounds")]
pub struct ClipSpec {
    video_id: String,
    start_sec: f64,
    end_sec: f64,
}

/// Unchecked wire form of a clip
#[derive(Deserialize)]
struct ClipBounds {
    video_id: String,
    start_sec: f64,
    end_sec: f64,
}

impl TryFrom<ClipBounds> for ClipSpec {
    type Error = DomainError;

    fn try_from(bounds: ClipBounds) -> Result<Self, Self::Error> {
        ClipSpec::new(bounds.video_id, bounds.start_sec, bounds.end_sec)
    }
}

impl ClipSpec {
    /// Create a clip, enforcing `0 <= start_sec < end_sec`
    pub fn new(video_id: impl Into<String>, start_sec: f64, end_sec: f64) -> Result<Self, DomainError> {
        let video_id = video_id.into();
        if video_id.trim().is_empty() {
            return Err(DomainError::InvalidClip("video id cannot be empty".to_string()));
        }
        if !start_sec.is_finite() || !end_sec.is_finite() {
            return Err(DomainError::InvalidTimeRange(
                "clip boundaries must be finite".to_string(),
            ));
        }
        if start_sec < 0.0 {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) cannot be negative",
                start_sec
            )));
        }
        if start_sec >= end_sec {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) must be less than end ({})",
                start_sec, end_sec
            )));
        }

        Ok(Self {
            video_id,
            start_sec,
            end_sec,
        })
    }

    pub fn from_times(video_id: impl Into<String>, start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        Self::new(video_id, start.as_seconds(), end.as_seconds())
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn start_sec(&self) -> f64 {
        self.start_sec
    }

    pub fn end_sec(&self) -> f64 {
        self.end_sec
    }

    pub fn duration(&self) -> f64 {
        self.end_sec - self.start_sec
    }

    /// True once playback has reached or passed the end boundary
    pub fn is_past_end(&self, position: f64) -> bool {
        position >= self.end_sec
    }
}

impl fmt::Display for ClipSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {}]",
            self.video_id,
            TimeSpec::from_seconds(self.start_sec),
            TimeSpec::from_seconds(self.end_sec)
        )
    }
}

/// Runtime flags behind the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_captions_on: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_looping: true,
            is_captions_on: true,
        }
    }
}

impl PlaybackState {
    pub fn with_preferences(is_looping: bool, is_captions_on: bool) -> Self {
        Self {
            is_playing: false,
            is_looping,
            is_captions_on,
        }
    }
}

/// Controller lifecycle as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerPhase {
    /// No player handle yet
    Unbound,
    BoundPaused,
    BoundPlaying,
}

impl ControllerPhase {
    pub fn from_parts(bound: bool, state: &PlaybackState) -> Self {
        match (bound, state.is_playing) {
            (false, _) => ControllerPhase::Unbound,
            (true, false) => ControllerPhase::BoundPaused,
            (true, true) => ControllerPhase::BoundPlaying,
        }
    }
}

impl fmt::Display for ControllerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerPhase::Unbound => "unbound",
            ControllerPhase::BoundPaused => "paused",
            ControllerPhase::BoundPlaying => "playing",
        };
        f.write_str(name)
    }
}

/// Labels shown on the control buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub play: String,
    pub pause: String,
    pub looping: String,
    pub captions: String,
}

impl ControlLabels {
    pub fn for_state(state: &PlaybackState) -> Self {
        Self {
            play: "Play from start".to_string(),
            pause: "Pause".to_string(),
            looping: format!("Loop: {}", on_off(state.is_looping)),
            captions: format!("CC: {}", on_off(state.is_captions_on)),
        }
    }

    pub fn as_vec(&self) -> Vec<&str> {
        vec![
            self.play.as_str(),
            self.pause.as_str(),
            self.looping.as_str(),
            self.captions.as_str(),
        ]
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

/// Region of the page the player renders into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub id: String,
}

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// A mount point with no id is treated as absent
    pub fn is_present(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Options handed to the player factory on construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerOptions {
    pub video_id: String,
    pub width: u32,
    pub height: u32,
    pub controls: bool,
    pub cc_load_policy: bool,
    pub cc_lang_pref: String,
}

/// Element holding keyboard focus when a key is pressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTarget {
    pub tag_name: Option<String>,
    pub content_editable: bool,
}

impl FocusTarget {
    /// Focus on the page body
    pub fn none() -> Self {
        Self::default()
    }

    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            content_editable: false,
        }
    }

    pub fn content_editable(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            content_editable: true,
        }
    }

    /// Input, textarea or any contenteditable region
    pub fn accepts_text(&self) -> bool {
        if self.content_editable {
            return true;
        }
        matches!(
            self.tag_name.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("input") | Some("textarea")
        )
    }
}

/// Key-down event delivered to the global shortcut listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: String,
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(code: impl Into<String>, target: FocusTarget) -> Self {
        Self {
            code: code.into(),
            target,
        }
    }

    pub fn space() -> Self {
        Self::new(SHORTCUT_KEY_CODE, FocusTarget::none())
    }
}

/// What the listener did with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled { prevent_default: bool },
}

/// One command as received by a player handle
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    SeekTo { seconds: f64, allow_seek_ahead: bool },
    Play,
    Pause,
    LoadModule(String),
    UnloadModule(String),
    SetOption {
        module: String,
        key: String,
        value: serde_json::Value,
    },
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerCommand::SeekTo {
                seconds,
                allow_seek_ahead,
            } => write!(f, "seekTo({}, {})", seconds, allow_seek_ahead),
            PlayerCommand::Play => f.write_str("playVideo()"),
            PlayerCommand::Pause => f.write_str("pauseVideo()"),
            PlayerCommand::LoadModule(name) => write!(f, "loadModule({:?})", name),
            PlayerCommand::UnloadModule(name) => write!(f, "unloadModule({:?})", name),
            PlayerCommand::SetOption { module, key, value } => {
                write!(f, "setOption({:?}, {:?}, {})", module, key, value)
            }
        }
    }
}

/// Catalog entry as stored in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub id: u64,
    pub video_id: String,
    pub start_sec: f64,
    pub end_sec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ClipEntry {
    pub fn to_spec(&self) -> Result<ClipSpec, DomainError> {
        ClipSpec::new(self.video_id.clone(), self.start_sec, self.end_sec)
            .map_err(|e| DomainError::InvalidClip(format!("clip {}: {}", self.id, e)))
    }
}

/// Validated set of study clips
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipCatalog {
    entries: Vec<ClipEntry>,
}

impl ClipCatalog {
    /// Build a catalog; every entry must be a valid clip and ids must be unique
    pub fn new(entries: Vec<ClipEntry>) -> Result<Self, DomainError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            entry.to_spec()?;
            if !seen.insert(entry.id) {
                return Err(DomainError::InvalidClip(format!(
                    "duplicate clip id: {}",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: u64) -> Result<&ClipEntry, DomainError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(DomainError::ClipNotFound(id))
    }

    /// Entries ordered by descending id
    pub fn newest_first(&self) -> Vec<&ClipEntry> {
        let mut entries: Vec<&ClipEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Self-assessed recall score, 1 (forgot) to 5 (perfect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReviewScore(u8);

impl ReviewScore {
    pub fn new(score: i64) -> Result<Self, DomainError> {
        if (1..=5).contains(&score) {
            Ok(Self(score as u8))
        } else {
            Err(DomainError::InvalidScore(score))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Outcome of reviewing one clip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub clip_id: u64,
    pub score: ReviewScore,
    pub reviewed_at: String,
    pub next_review_at: String,
}

#[cfg(test)]
mod tests;
