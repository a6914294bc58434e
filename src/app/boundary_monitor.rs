//! Cancellable boundary poll task

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Values captured when a monitor is started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorParams {
    /// Controller generation the monitor belongs to
    pub generation: u64,
    pub start_sec: f64,
    pub end_sec: f64,
    pub is_looping: bool,
    pub interval: Duration,
}

/// Result of one boundary poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Not playing, or the monitor is out of date
    Idle,
    /// The player could not report a position
    NoPosition,
    /// Position is still inside the clip
    Inside,
    /// End reached with looping on; playback restarted at the clip start
    Restarted,
    /// End reached with looping off; playback paused
    Stopped,
}

impl PollOutcome {
    pub fn keeps_monitor(&self) -> bool {
        !matches!(self, PollOutcome::Idle | PollOutcome::Stopped)
    }
}

/// Something the monitor can poll
pub trait BoundaryTarget: Send + Sync + 'static {
    fn poll_boundary(&self, params: &MonitorParams) -> PollOutcome;
}

/// Running monitor; aborted on `cancel` or drop
#[derive(Debug)]
pub struct BoundaryMonitor {
    handle: JoinHandle<()>,
}

impl BoundaryMonitor {
    /// Start polling `target` every `params.interval`, first tick one interval from now
    pub fn spawn<T: BoundaryTarget>(runtime: &Handle, target: Arc<T>, params: MonitorParams) -> Self {
        debug!(
            generation = params.generation,
            start = params.start_sec,
            end = params.end_sec,
            looping = params.is_looping,
            "Starting boundary monitor"
        );

        let first_tick = Instant::now() + params.interval;
        let handle = runtime.spawn(async move {
            let mut ticker = time::interval_at(first_tick, params.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let outcome = target.poll_boundary(&params);
                trace!(generation = params.generation, ?outcome, "Boundary poll");
                if !outcome.keeps_monitor() {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for BoundaryMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTarget {
        polls: AtomicUsize,
        stop_after: usize,
    }

    impl BoundaryTarget for CountingTarget {
        fn poll_boundary(&self, _params: &MonitorParams) -> PollOutcome {
            let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.stop_after {
                PollOutcome::Stopped
            } else {
                PollOutcome::Inside
            }
        }
    }

    fn params() -> MonitorParams {
        MonitorParams {
            generation: 1,
            start_sec: 30.0,
            end_sec: 45.0,
            is_looping: true,
            interval: Duration::from_millis(200),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_at_fixed_cadence() {
        let target = Arc::new(CountingTarget {
            polls: AtomicUsize::new(0),
            stop_after: usize::MAX,
        });
        let monitor = BoundaryMonitor::spawn(&Handle::current(), Arc::clone(&target), params());

        time::sleep(Duration::from_millis(199)).await;
        assert_eq!(target.polls.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(target.polls.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_millis(800)).await;
        assert_eq!(target.polls.load(Ordering::SeqCst), 5);

        monitor.cancel();
        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(target.polls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_itself_when_target_stops() {
        let target = Arc::new(CountingTarget {
            polls: AtomicUsize::new(0),
            stop_after: 3,
        });
        let monitor = BoundaryMonitor::spawn(&Handle::current(), Arc::clone(&target), params());

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(target.polls.load(Ordering::SeqCst), 3);
        assert!(monitor.is_finished());
    }
}
