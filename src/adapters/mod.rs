// Adapters - External system implementations

pub mod sim_player;
pub mod toml_config;

// Re-export adapters
pub use sim_player::{SimulatedPlayer, SimulatedPlayerFactory, SimulatedScriptLoader};
pub use toml_config::TomlConfigAdapter;
