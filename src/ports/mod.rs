// Ports - Interface definitions (contracts)

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::domain::errors::*;
use crate::domain::model::*;

/// Control surface of an embedded video player once it is ready.
///
/// Commands are fire-and-forget; the widget serializes them itself. Nothing
/// outside these seven calls is reachable through the port.
pub trait PlayerHandle: Send + Sync {
    /// Jump to `seconds`; `allow_seek_ahead` lets the player fetch unbuffered data
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool);

    fn play_video(&self);

    fn pause_video(&self);

    /// Current playback position, or `None` when the player cannot report one
    fn current_time(&self) -> Option<f64>;

    fn load_module(&self, name: &str);

    fn unload_module(&self, name: &str);

    fn set_option(&self, module: &str, key: &str, value: serde_json::Value);
}

/// Player construction factory exposed once the bootstrap script has run
pub trait PlayerFactory: Send + Sync {
    /// Build a player rendering into `mount`
    fn create_player(
        &self,
        mount: &MountPoint,
        options: &PlayerOptions,
    ) -> Result<Arc<dyn PlayerHandle>, DomainError>;
}

/// Port for fetching the remote player bootstrap script
#[async_trait]
pub trait ScriptLoaderPort: Send + Sync {
    /// Request `src` and resolve once its readiness callback has fired
    async fn load_script(&self, src: &str) -> Result<Arc<dyn PlayerFactory>, DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Load configuration from file, layered over the defaults
    async fn load_config(&self, file_path: &str) -> Result<AppConfig, DomainError>;

    /// Built-in configuration
    async fn load_default_config(&self) -> AppConfig;

    /// Path of the last file loaded, if any
    async fn get_config_file_path(&self) -> Option<String>;
}
