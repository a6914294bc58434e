//! Process-wide readiness gate for the external player API
//!
//! The bootstrap script is requested by the first caller only. Everyone else,
//! concurrent or late, awaits the same readiness signal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::ports::{PlayerFactory, ScriptLoaderPort};

static GLOBAL_API: OnceLock<Arc<PlayerApi>> = OnceLock::new();

/// Gate in front of the player construction factory
pub struct PlayerApi {
    script_src: String,
    factory: OnceCell<Arc<dyn PlayerFactory>>,
    script_requests: AtomicUsize,
}

impl PlayerApi {
    pub fn new(script_src: impl Into<String>) -> Self {
        Self {
            script_src: script_src.into(),
            factory: OnceCell::new(),
            script_requests: AtomicUsize::new(0),
        }
    }

    /// Page-lifetime instance; the first caller fixes the script source
    pub fn global(script_src: &str) -> Arc<PlayerApi> {
        Arc::clone(GLOBAL_API.get_or_init(|| Arc::new(PlayerApi::new(script_src))))
    }

    pub fn script_src(&self) -> &str {
        &self.script_src
    }

    /// True once the readiness callback has fired
    pub fn is_ready(&self) -> bool {
        self.factory.initialized()
    }

    pub fn factory(&self) -> Option<Arc<dyn PlayerFactory>> {
        self.factory.get().cloned()
    }

    /// Number of times the bootstrap script has actually been requested
    pub fn script_requests(&self) -> usize {
        self.script_requests.load(Ordering::SeqCst)
    }

    /// Publish a factory that became available without going through a loader.
    /// Returns false if the API was already ready.
    pub fn signal_ready(&self, factory: Arc<dyn PlayerFactory>) -> bool {
        let accepted = self.factory.set(factory).is_ok();
        if accepted {
            info!("Player API ready");
        }
        accepted
    }

    /// Return the factory, loading the bootstrap script if nobody has yet.
    ///
    /// A failed load leaves the gate closed so a later caller can retry.
    pub async fn ensure_loaded(
        &self,
        loader: &dyn ScriptLoaderPort,
    ) -> Result<Arc<dyn PlayerFactory>, DomainError> {
        if let Some(factory) = self.factory.get() {
            debug!("Player API already available");
            return Ok(Arc::clone(factory));
        }

        let factory = self
            .factory
            .get_or_try_init(|| async {
                let attempt = self.script_requests.fetch_add(1, Ordering::SeqCst) + 1;
                info!(src = %self.script_src, attempt, "Requesting player API script");
                match loader.load_script(&self.script_src).await {
                    Ok(factory) => {
                        info!("Player API ready");
                        Ok(factory)
                    }
                    Err(e) => {
                        warn!(error = %e, "Player API script failed to load");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Arc::clone(factory))
    }
}
