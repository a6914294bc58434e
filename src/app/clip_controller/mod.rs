// Clip controller - Binds a clip to a player handle and enforces clip semantics

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::json;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::app::boundary_monitor::{BoundaryMonitor, BoundaryTarget, MonitorParams, PollOutcome};
use crate::app::player_api::PlayerApi;
use crate::config::AppConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Tunables for one controller instance
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub poll_interval: Duration,
    pub caption_language: String,
    pub width: u32,
    pub height: u32,
    pub initial_state: PlaybackState,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            caption_language: DEFAULT_CAPTION_LANGUAGE.to_string(),
            width: 640,
            height: 360,
            initial_state: PlaybackState::default(),
        }
    }
}

impl ControllerSettings {
    /// The monitor needs a non-zero cadence
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.poll_interval.is_zero() {
            return Err(DomainError::ConfigError(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            caption_language: config.player.caption_language.clone(),
            width: config.player.width,
            height: config.player.height,
            initial_state: PlaybackState::with_preferences(
                config.playback.loop_default,
                config.playback.captions_default,
            ),
        }
    }
}

struct Inner {
    clip: ClipSpec,
    state: PlaybackState,
    handle: Option<Arc<dyn PlayerHandle>>,
    monitor: Option<BoundaryMonitor>,
    /// Bumped whenever the monitor's captured values go stale
    generation: u64,
}

struct Shared {
    inner: Mutex<Inner>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BoundaryTarget for Shared {
    fn poll_boundary(&self, params: &MonitorParams) -> PollOutcome {
        let mut inner = self.lock();
        if inner.generation != params.generation || !inner.state.is_playing {
            return PollOutcome::Idle;
        }
        let Some(handle) = inner.handle.clone() else {
            return PollOutcome::Idle;
        };
        let Some(position) = handle.current_time() else {
            return PollOutcome::NoPosition;
        };

        match BoundaryPolicy::evaluate(position, params.end_sec, params.is_looping) {
            BoundaryAction::Continue => PollOutcome::Inside,
            BoundaryAction::Restart => {
                debug!(position, start = params.start_sec, "Clip end reached, looping");
                handle.seek_to(params.start_sec, true);
                handle.play_video();
                PollOutcome::Restarted
            }
            BoundaryAction::Stop => {
                info!(position, end = params.end_sec, "Clip end reached, stopping");
                handle.pause_video();
                inner.state.is_playing = false;
                inner.generation += 1;
                inner.monitor = None;
                PollOutcome::Stopped
            }
        }
    }
}

/// Clip-bounded playback controller.
///
/// Every operation that needs the player is a silent no-op until a handle is
/// bound. While playing, a background monitor polls the position every
/// `poll_interval` and loops or stops at the clip end. The monitor is torn
/// down and restarted whenever the play flag, the loop flag or the clip
/// boundaries change, and aborted when the controller is unmounted or dropped.
pub struct ClipController {
    shared: Arc<Shared>,
    runtime: Handle,
    settings: ControllerSettings,
}

impl ClipController {
    /// Create a controller on the current tokio runtime
    pub fn new(clip: ClipSpec, settings: ControllerSettings) -> Result<Self, DomainError> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::RuntimeUnavailable(e.to_string()))?;
        Self::with_runtime(clip, settings, runtime)
    }

    pub fn with_runtime(
        clip: ClipSpec,
        settings: ControllerSettings,
        runtime: Handle,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        let inner = Inner {
            clip,
            state: settings.initial_state,
            handle: None,
            monitor: None,
            generation: 0,
        };
        Ok(Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
            }),
            runtime,
            settings,
        })
    }

    /// Construct the player once the API is available.
    ///
    /// Returns `Ok(true)` only when this call built the handle. Without a mount
    /// point, or with a handle already bound, nothing is requested.
    pub async fn mount(
        &self,
        api: &PlayerApi,
        loader: &dyn ScriptLoaderPort,
        mount_point: &MountPoint,
    ) -> Result<bool, DomainError> {
        if !mount_point.is_present() {
            debug!("No mount point, skipping player construction");
            return Ok(false);
        }
        if self.is_bound() {
            debug!("Player already constructed");
            return Ok(false);
        }

        let factory = match api.factory() {
            Some(factory) => factory,
            None => api.ensure_loaded(loader).await?,
        };

        let mut inner = self.shared.lock();
        if inner.handle.is_some() {
            return Ok(false);
        }
        let options = PlayerOptions {
            video_id: inner.clip.video_id().to_string(),
            width: self.settings.width,
            height: self.settings.height,
            controls: true,
            cc_load_policy: inner.state.is_captions_on,
            cc_lang_pref: self.settings.caption_language.clone(),
        };
        let handle = factory.create_player(mount_point, &options)?;
        inner.handle = Some(handle);
        info!(video_id = %options.video_id, mount = %mount_point.id, "Player ready");
        Ok(true)
    }

    /// Bind an already constructed handle; ignored if one is bound
    pub fn bind_handle(&self, handle: Arc<dyn PlayerHandle>) -> bool {
        let mut inner = self.shared.lock();
        if inner.handle.is_some() {
            debug!("Player already bound, ignoring handle");
            return false;
        }
        inner.handle = Some(handle);
        true
    }

    /// Seek to the clip start and play
    pub fn play_from_start(&self) {
        let mut inner = self.shared.lock();
        let Some(handle) = inner.handle.clone() else {
            debug!("play_from_start ignored: player not ready");
            return;
        };
        handle.seek_to(inner.clip.start_sec(), true);
        handle.play_video();
        inner.state.is_playing = true;
        self.restart_monitor(&mut inner);
    }

    pub fn pause(&self) {
        let mut inner = self.shared.lock();
        let Some(handle) = inner.handle.clone() else {
            debug!("pause ignored: player not ready");
            return;
        };
        handle.pause_video();
        inner.state.is_playing = false;
        self.restart_monitor(&mut inner);
    }

    /// Flip looping; applies from the next boundary poll
    pub fn toggle_loop(&self) {
        let mut inner = self.shared.lock();
        inner.state.is_looping = !inner.state.is_looping;
        debug!(looping = inner.state.is_looping, "Loop toggled");
        self.restart_monitor(&mut inner);
    }

    pub fn toggle_captions(&self) {
        let on = !self.shared.lock().state.is_captions_on;
        self.set_captions(on);
    }

    /// Set the caption flag and map it onto the captions module.
    ///
    /// The load or unload call is issued even if the flag did not change.
    pub fn set_captions(&self, on: bool) {
        let mut inner = self.shared.lock();
        inner.state.is_captions_on = on;
        let Some(handle) = inner.handle.clone() else {
            debug!(captions = on, "Caption change deferred: player not ready");
            return;
        };
        if on {
            handle.load_module(CAPTIONS_MODULE);
            handle.set_option(
                CAPTIONS_MODULE,
                CAPTION_TRACK_OPTION,
                json!({ "languageCode": self.settings.caption_language }),
            );
        } else {
            handle.unload_module(CAPTIONS_MODULE);
        }
    }

    /// Replace the clip; a running monitor restarts against the new bounds
    pub fn set_clip(&self, clip: ClipSpec) {
        let mut inner = self.shared.lock();
        if inner.clip == clip {
            return;
        }
        info!(clip = %clip, "Clip changed");
        inner.clip = clip;
        self.restart_monitor(&mut inner);
    }

    /// Global key-down listener; space plays from start unless typing
    pub fn handle_key_down(&self, event: &KeyEvent) -> KeyOutcome {
        if !ShortcutPolicy::triggers_play(event) {
            return KeyOutcome::Ignored;
        }
        self.play_from_start();
        KeyOutcome::Handled {
            prevent_default: true,
        }
    }

    /// Run one boundary poll against the live values
    pub fn check_boundary(&self) -> PollOutcome {
        let params = {
            let inner = self.shared.lock();
            self.monitor_params(&inner)
        };
        self.shared.poll_boundary(&params)
    }

    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state
    }

    pub fn phase(&self) -> ControllerPhase {
        let inner = self.shared.lock();
        ControllerPhase::from_parts(inner.handle.is_some(), &inner.state)
    }

    pub fn clip(&self) -> ClipSpec {
        self.shared.lock().clip.clone()
    }

    /// The bound player handle, if any
    pub fn handle(&self) -> Option<Arc<dyn PlayerHandle>> {
        self.shared.lock().handle.clone()
    }

    pub fn is_bound(&self) -> bool {
        self.shared.lock().handle.is_some()
    }

    /// True while a boundary monitor task is alive
    pub fn monitor_active(&self) -> bool {
        self.shared
            .lock()
            .monitor
            .as_ref()
            .is_some_and(|monitor| !monitor.is_finished())
    }

    pub fn control_labels(&self) -> ControlLabels {
        ControlLabels::for_state(&self.state())
    }

    /// Stop background work; the player itself is left to its owner
    pub fn unmount(&self) {
        let mut inner = self.shared.lock();
        inner.generation += 1;
        if let Some(monitor) = inner.monitor.take() {
            monitor.cancel();
            debug!("Boundary monitor cancelled on unmount");
        }
    }

    fn monitor_params(&self, inner: &Inner) -> MonitorParams {
        MonitorParams {
            generation: inner.generation,
            start_sec: inner.clip.start_sec(),
            end_sec: inner.clip.end_sec(),
            is_looping: inner.state.is_looping,
            interval: self.settings.poll_interval,
        }
    }

    fn restart_monitor(&self, inner: &mut Inner) {
        inner.generation += 1;
        if let Some(monitor) = inner.monitor.take() {
            monitor.cancel();
        }
        if !inner.state.is_playing {
            return;
        }
        let params = self.monitor_params(inner);
        inner.monitor = Some(BoundaryMonitor::spawn(
            &self.runtime,
            Arc::clone(&self.shared),
            params,
        ));
    }
}

impl Drop for ClipController {
    fn drop(&mut self) {
        self.unmount();
    }
}
