//! Application configuration model
//!
//! Values resolve with the precedence CLI > environment > file > defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{
    ClipCatalog, ClipEntry, DEFAULT_CAPTION_LANGUAGE, DEFAULT_POLL_INTERVAL,
};

/// Environment variable naming the config file
pub const ENV_CONFIG_PATH: &str = "ECHOSLICE_CONFIG";
pub const ENV_LOG_LEVEL: &str = "ECHOSLICE_LOG_LEVEL";
pub const ENV_POLL_INTERVAL_MS: &str = "ECHOSLICE_POLL_INTERVAL_MS";
pub const ENV_CAPTION_LANGUAGE: &str = "ECHOSLICE_CAPTION_LANGUAGE";

/// Bootstrap script of the embeddable player
pub const DEFAULT_SCRIPT_SRC: &str = "https://www.youtube.com/iframe_api";

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub player: PlayerSettings,
    pub playback: PlaybackDefaults,
    pub clips: Vec<ClipEntry>,
}

/// Player embedding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Boundary monitor cadence (milliseconds)
    pub poll_interval_ms: u64,
    pub width: u32,
    pub height: u32,
    pub caption_language: String,
    pub script_src: String,
}

/// Initial values of the loop and caption toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackDefaults {
    pub loop_default: bool,
    pub captions_default: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            width: 640,
            height: 360,
            caption_language: DEFAULT_CAPTION_LANGUAGE.to_string(),
            script_src: DEFAULT_SCRIPT_SRC.to_string(),
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            loop_default: true,
            captions_default: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            playback: PlaybackDefaults::default(),
            clips: vec![ClipEntry {
                id: 1,
                video_id: "Ks-_Mh1QhMc".to_string(),
                start_sec: 110.0,
                end_sec: 140.0,
                title: Some("EchoSlice demo".to_string()),
            }],
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.player.poll_interval_ms == 0 {
            return Err(DomainError::ConfigError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.player.width == 0 || self.player.height == 0 {
            return Err(DomainError::ConfigError(
                "player dimensions cannot be zero".to_string(),
            ));
        }
        if self.player.caption_language.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "caption_language cannot be empty".to_string(),
            ));
        }
        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<ClipCatalog, DomainError> {
        ClipCatalog::new(self.clips.clone())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.player.poll_interval_ms)
    }

    /// Apply environment overrides through `lookup`, returning how many applied
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup(ENV_POLL_INTERVAL_MS) {
            self.player.poll_interval_ms = value.trim().parse().map_err(|e| {
                DomainError::ConfigError(format!("Invalid {}: {}", ENV_POLL_INTERVAL_MS, e))
            })?;
            applied += 1;
        }
        if let Some(value) = lookup(ENV_CAPTION_LANGUAGE) {
            self.player.caption_language = value.trim().to_string();
            applied += 1;
        }

        self.validate()?;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_millis(200));
        assert_eq!(config.player.caption_language, "en");
        assert_eq!(config.catalog().unwrap().len(), 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str("[player]\npoll_interval_ms = 50\n").unwrap();
        assert_eq!(config.player.poll_interval_ms, 50);
        assert_eq!(config.player.width, 640);
        assert!(config.playback.loop_default);
    }

    #[test]
    fn test_clips_from_file() {
        let content = r#"
[[clips]]
id = 3
video_id = "abc"
start_sec = 30
end_sec = 45

[[clips]]
id = 4
video_id = "def"
start_sec = 0.5
end_sec = 2.0
title = "short"
"#;
        let config = AppConfig::from_toml_str(content).unwrap();
        assert_eq!(config.clips.len(), 2);
        assert_eq!(config.clips[0].end_sec, 45.0);
        assert_eq!(config.clips[1].title.as_deref(), Some("short"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_toml_str("[player]\npoll_interval_ms = 0\n").is_err());
        assert!(AppConfig::from_toml_str("[player]\ncaption_language = \"\"\n").is_err());
        assert!(AppConfig::from_toml_str(
            "[[clips]]\nid = 1\nvideo_id = \"x\"\nstart_sec = 9\nend_sec = 3\n"
        )
        .is_err());
        assert!(AppConfig::from_toml_str("not = [valid").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        let applied = config
            .apply_env_overrides(|key| match key {
                ENV_POLL_INTERVAL_MS => Some("100".to_string()),
                ENV_CAPTION_LANGUAGE => Some("ja".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(config.player.poll_interval_ms, 100);
        assert_eq!(config.player.caption_language, "ja");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == ENV_POLL_INTERVAL_MS).then(|| "fast".to_string())
        });
        assert!(result.is_err());
    }
}
