//! In-process player adapter
//!
//! Stands in for the remote embeddable widget. Position advances with the
//! tokio clock while playing, and every command received is recorded so the
//! controller's behaviour can be observed.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

static SHARED_FACTORY: OnceLock<Arc<SimulatedPlayerFactory>> = OnceLock::new();

#[derive(Debug)]
struct PlayerState {
    /// Position at the last seek, pause or external move
    anchor: f64,
    playing_since: Option<Instant>,
    reports_position: bool,
    position_queries: usize,
    commands: Vec<PlayerCommand>,
    modules: BTreeSet<String>,
}

/// Simulated player handle
#[derive(Debug)]
pub struct SimulatedPlayer {
    options: Option<PlayerOptions>,
    state: Mutex<PlayerState>,
}

impl Default for SimulatedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPlayer {
    pub fn new() -> Self {
        Self {
            options: None,
            state: Mutex::new(PlayerState {
                anchor: 0.0,
                playing_since: None,
                reports_position: true,
                position_queries: 0,
                commands: Vec::new(),
                modules: BTreeSet::new(),
            }),
        }
    }

    /// Player built by a factory with the given construction options
    pub fn with_options(options: PlayerOptions) -> Self {
        let mut player = Self::new();
        if options.cc_load_policy {
            player.lock().modules.insert(CAPTIONS_MODULE.to_string());
        }
        player.options = Some(options);
        player
    }

    fn lock(&self) -> MutexGuard<'_, PlayerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn options(&self) -> Option<&PlayerOptions> {
        self.options.as_ref()
    }

    /// Move playback as if the viewer scrubbed; not recorded as a command
    pub fn set_position(&self, seconds: f64) {
        let mut state = self.lock();
        state.anchor = seconds;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    /// Make `current_time` report nothing, as while the widget is loading
    pub fn set_reports_position(&self, reports: bool) {
        self.lock().reports_position = reports;
    }

    pub fn position(&self) -> f64 {
        Self::position_of(&self.lock())
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing_since.is_some()
    }

    pub fn commands(&self) -> Vec<PlayerCommand> {
        self.lock().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.lock().commands.clear();
    }

    pub fn position_queries(&self) -> usize {
        self.lock().position_queries
    }

    pub fn loaded_modules(&self) -> Vec<String> {
        self.lock().modules.iter().cloned().collect()
    }

    fn position_of(state: &PlayerState) -> f64 {
        match state.playing_since {
            Some(since) => state.anchor + since.elapsed().as_secs_f64(),
            None => state.anchor,
        }
    }

    fn record(state: &mut PlayerState, command: PlayerCommand) {
        trace!(%command, "Player command");
        state.commands.push(command);
    }
}

impl PlayerHandle for SimulatedPlayer {
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) {
        let mut state = self.lock();
        state.anchor = seconds.max(0.0);
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
        Self::record(
            &mut state,
            PlayerCommand::SeekTo {
                seconds,
                allow_seek_ahead,
            },
        );
    }

    fn play_video(&self) {
        let mut state = self.lock();
        if state.playing_since.is_none() {
            state.playing_since = Some(Instant::now());
        }
        Self::record(&mut state, PlayerCommand::Play);
    }

    fn pause_video(&self) {
        let mut state = self.lock();
        state.anchor = Self::position_of(&state);
        state.playing_since = None;
        Self::record(&mut state, PlayerCommand::Pause);
    }

    fn current_time(&self) -> Option<f64> {
        let mut state = self.lock();
        if !state.reports_position {
            return None;
        }
        state.position_queries += 1;
        Some(Self::position_of(&state))
    }

    fn load_module(&self, name: &str) {
        let mut state = self.lock();
        state.modules.insert(name.to_string());
        Self::record(&mut state, PlayerCommand::LoadModule(name.to_string()));
    }

    fn unload_module(&self, name: &str) {
        let mut state = self.lock();
        state.modules.remove(name);
        Self::record(&mut state, PlayerCommand::UnloadModule(name.to_string()));
    }

    fn set_option(&self, module: &str, key: &str, value: serde_json::Value) {
        let mut state = self.lock();
        Self::record(
            &mut state,
            PlayerCommand::SetOption {
                module: module.to_string(),
                key: key.to_string(),
                value,
            },
        );
    }
}

/// Factory handing out simulated players
#[derive(Debug, Default)]
pub struct SimulatedPlayerFactory {
    players: Mutex<Vec<(MountPoint, Arc<SimulatedPlayer>)>>,
}

impl SimulatedPlayerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory behind the process-wide player API
    pub fn shared() -> Arc<SimulatedPlayerFactory> {
        Arc::clone(SHARED_FACTORY.get_or_init(|| Arc::new(SimulatedPlayerFactory::new())))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(MountPoint, Arc<SimulatedPlayer>)>> {
        self.players.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn created_count(&self) -> usize {
        self.lock().len()
    }

    pub fn last_player(&self) -> Option<Arc<SimulatedPlayer>> {
        self.lock().last().map(|(_, player)| Arc::clone(player))
    }

    /// Latest player rendered into `mount`, if one was built there
    pub fn player_at(&self, mount: &MountPoint) -> Option<Arc<SimulatedPlayer>> {
        self.lock()
            .iter()
            .rev()
            .find(|(at, _)| at == mount)
            .map(|(_, player)| Arc::clone(player))
    }

    /// Simulated player behind `handle`, if this factory built it
    pub fn player_for(&self, handle: &Arc<dyn PlayerHandle>) -> Option<Arc<SimulatedPlayer>> {
        let target = Arc::as_ptr(handle) as *const ();
        self.lock()
            .iter()
            .find(|(_, player)| Arc::as_ptr(player) as *const () == target)
            .map(|(_, player)| Arc::clone(player))
    }
}

impl PlayerFactory for SimulatedPlayerFactory {
    fn create_player(
        &self,
        mount: &MountPoint,
        options: &PlayerOptions,
    ) -> Result<Arc<dyn PlayerHandle>, DomainError> {
        if !mount.is_present() {
            return Err(DomainError::PlayerConstruction(
                "mount point has no id".to_string(),
            ));
        }
        debug!(mount = %mount.id, video_id = %options.video_id, "Creating simulated player");
        let player = Arc::new(SimulatedPlayer::with_options(options.clone()));
        self.lock().push((mount.clone(), Arc::clone(&player)));
        Ok(player as Arc<dyn PlayerHandle>)
    }
}

/// Script loader that "fetches" the bootstrap after an optional delay
pub struct SimulatedScriptLoader {
    factory: Arc<SimulatedPlayerFactory>,
    delay: Duration,
    failures_left: AtomicUsize,
    loads: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl SimulatedScriptLoader {
    pub fn new(factory: Arc<SimulatedPlayerFactory>) -> Self {
        Self {
            factory,
            delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Wait `delay` before firing the readiness callback
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the first `count` loads
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn requested_sources(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ScriptLoaderPort for SimulatedScriptLoader {
    async fn load_script(&self, src: &str) -> Result<Arc<dyn PlayerFactory>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(src.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(DomainError::ApiUnavailable(format!("failed to load {}", src)));
        }

        Ok(Arc::clone(&self.factory) as Arc<dyn PlayerFactory>)
    }
}
