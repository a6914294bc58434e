// Application layer - Use case interactors

pub mod boundary_monitor;
pub mod clip_controller;
pub mod container;
pub mod player_api;
pub mod review_interactor;

// Re-export interactors
pub use boundary_monitor::PollOutcome;
pub use clip_controller::{ClipController, ControllerSettings};
pub use container::{AppContainer, DefaultAppContainer};
pub use player_api::PlayerApi;
pub use review_interactor::ReviewInteractor;
