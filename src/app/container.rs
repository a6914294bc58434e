use std::sync::Arc;

use crate::adapters::{SimulatedPlayerFactory, SimulatedScriptLoader};
use crate::app::{
    clip_controller::{ClipController, ControllerSettings},
    player_api::PlayerApi,
    review_interactor::ReviewInteractor,
};
use crate::config::AppConfig;
use crate::domain::errors::DomainError;
use crate::domain::model::ClipSpec;
use crate::ports::ScriptLoaderPort;

pub trait AppContainer: Send + Sync {
    fn review_interactor(&self) -> Arc<ReviewInteractor>;
    fn player_api(&self) -> Arc<PlayerApi>;
    fn script_loader(&self) -> Arc<dyn ScriptLoaderPort>;
}

pub struct DefaultAppContainer {
    config: AppConfig,
    player_api: Arc<PlayerApi>,
    player_factory: Arc<SimulatedPlayerFactory>,
    script_loader: Arc<SimulatedScriptLoader>,
    review_interactor: Arc<ReviewInteractor>,
}

impl DefaultAppContainer {
    /// Wire adapters against the process-wide player API and its shared factory
    pub fn new(config: AppConfig) -> Result<Self, DomainError> {
        let api = PlayerApi::global(&config.player.script_src);
        Self::assemble(config, api, SimulatedPlayerFactory::shared())
    }

    /// Wire adapters against a private player API with its own factory
    pub fn with_player_api(config: AppConfig, player_api: Arc<PlayerApi>) -> Result<Self, DomainError> {
        Self::assemble(config, player_api, Arc::new(SimulatedPlayerFactory::new()))
    }

    fn assemble(
        config: AppConfig,
        player_api: Arc<PlayerApi>,
        player_factory: Arc<SimulatedPlayerFactory>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let script_loader = Arc::new(SimulatedScriptLoader::new(Arc::clone(&player_factory)));
        let review_interactor = Arc::new(ReviewInteractor::new(config.catalog()?));

        Ok(Self {
            config,
            player_api,
            player_factory,
            script_loader,
            review_interactor,
        })
    }

    pub fn player_factory(&self) -> Arc<SimulatedPlayerFactory> {
        Arc::clone(&self.player_factory)
    }

    /// New controller for `clip` using the configured defaults
    pub fn clip_controller(&self, clip: ClipSpec) -> Result<ClipController, DomainError> {
        ClipController::new(clip, ControllerSettings::from_config(&self.config))
    }
}

impl AppContainer for DefaultAppContainer {
    fn review_interactor(&self) -> Arc<ReviewInteractor> {
        Arc::clone(&self.review_interactor)
    }

    fn player_api(&self) -> Arc<PlayerApi> {
        Arc::clone(&self.player_api)
    }

    fn script_loader(&self) -> Arc<dyn ScriptLoaderPort> {
        Arc::clone(&self.script_loader) as Arc<dyn ScriptLoaderPort>
    }
}
