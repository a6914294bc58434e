// Domain rules - Boundary, shortcut and review scheduling policies

use chrono::{DateTime, Duration, Utc};

use crate::domain::model::*;

/// Reaction to one boundary poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    /// Still inside the clip
    Continue,
    /// Seek back to the clip start and keep playing
    Restart,
    /// Pause and leave the playing state
    Stop,
}

/// Decides what happens when playback reaches the end of a clip
pub struct BoundaryPolicy;

impl BoundaryPolicy {
    pub fn evaluate(position: f64, end_sec: f64, is_looping: bool) -> BoundaryAction {
        if position.is_nan() || position < end_sec {
            return BoundaryAction::Continue;
        }
        if is_looping {
            BoundaryAction::Restart
        } else {
            BoundaryAction::Stop
        }
    }
}

/// Decides whether a key press belongs to the play-from-start shortcut
pub struct ShortcutPolicy;

impl ShortcutPolicy {
    pub fn triggers_play(event: &KeyEvent) -> bool {
        if event.target.accepts_text() {
            return false;
        }
        event.code == SHORTCUT_KEY_CODE
    }
}

/// Spaced-repetition intervals keyed by review score
pub struct ReviewSchedule;

impl ReviewSchedule {
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn interval_for(score: ReviewScore) -> Duration {
        let days = match score.value() {
            0..=2 => 1,
            3 => 3,
            4 => 7,
            _ => 14,
        };
        Duration::days(days)
    }

    pub fn next_review_at(score: ReviewScore, reviewed_at: DateTime<Utc>) -> DateTime<Utc> {
        reviewed_at + Self::interval_for(score)
    }

    pub fn record(clip_id: u64, score: ReviewScore, reviewed_at: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            clip_id,
            score,
            reviewed_at: reviewed_at.format(Self::TIMESTAMP_FORMAT).to_string(),
            next_review_at: Self::next_review_at(score, reviewed_at)
                .format(Self::TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}
