// TOML config adapter - Configuration management using TOML files

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::domain::errors::*;
use crate::ports::*;

/// TOML configuration adapter
#[derive(Default)]
pub struct TomlConfigAdapter {
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate files probed when no path is given
    pub fn default_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("echoslice.toml"),
            PathBuf::from("config").join("echoslice.toml"),
        ]
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn load_config(&self, file_path: &str) -> Result<AppConfig, DomainError> {
        let path = PathBuf::from(file_path);

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            DomainError::ConfigError(format!("Failed to read config file {}: {}", file_path, e))
        })?;
        let config = AppConfig::from_toml_str(&content)?;

        *self.config_file_path.write().await = Some(path);
        tracing::info!("Loaded configuration from {}", file_path);
        Ok(config)
    }

    async fn load_default_config(&self) -> AppConfig {
        AppConfig::default()
    }

    async fn get_config_file_path(&self) -> Option<String> {
        self.config_file_path
            .read()
            .await
            .as_ref()
            .map(|path| path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[player]\npoll_interval_ms = 100\n\n[playback]\nloop_default = false").unwrap();

        let adapter = TomlConfigAdapter::new();
        let path = file.path().to_string_lossy().to_string();
        let config = adapter.load_config(&path).await.unwrap();

        assert_eq!(config.player.poll_interval_ms, 100);
        assert!(!config.playback.loop_default);
        assert_eq!(adapter.get_config_file_path().await, Some(path));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let adapter = TomlConfigAdapter::new();
        let result = adapter.load_config("/definitely/not/here/echoslice.toml").await;
        assert!(matches!(result, Err(DomainError::ConfigError(_))));
        assert_eq!(adapter.get_config_file_path().await, None);
    }

    #[tokio::test]
    async fn test_default_config() {
        let adapter = TomlConfigAdapter::new();
        assert_eq!(adapter.load_default_config().await, AppConfig::default());
    }
}
