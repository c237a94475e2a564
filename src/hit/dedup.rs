use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, instrument};

use crate::world::{Clock, LocalId};

/// Window within which a second magic hit from the same aggressor is treated
/// as the engine reporting the first one again
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(100);

/// Remembers when each aggressor last had a magic hit forwarded
#[derive(Debug)]
pub struct HitDeduplicator {
    window_ms: u64,
    last_seen: Mutex<HashMap<LocalId, u64>>,
}

impl HitDeduplicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: window.as_millis() as u64,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Returns true if the hit is new and records `now_ms` for the aggressor.
    /// A suppressed hit leaves the recorded time untouched.
    pub fn check_and_record(&self, aggressor: LocalId, now_ms: u64) -> bool {
        let mut last_seen = self.last_seen.lock();
        if let Some(&last) = last_seen.get(&aggressor) {
            // A clock that went backwards counts as inside the window
            if now_ms.saturating_sub(last) < self.window_ms {
                return false;
            }
        }
        last_seen.insert(aggressor, now_ms);
        true
    }

    /// Drops entries that can no longer suppress anything. Returns how many were removed.
    pub fn sweep(&self, now_ms: u64) -> usize {
        let mut last_seen = self.last_seen.lock();
        let before = last_seen.len();
        last_seen.retain(|_, last| now_ms.saturating_sub(*last) < self.window_ms);
        before - last_seen.len()
    }

    pub fn len(&self) -> usize {
        self.last_seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.lock().is_empty()
    }
}

impl Default for HitDeduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW)
    }
}

/// Periodically sweeps stale entries so the map does not grow with every
/// aggressor seen during the session
#[instrument(skip(deduplicator, clock))]
pub async fn start_dedup_sweep_task(
    deduplicator: Arc<HitDeduplicator>,
    clock: Arc<dyn Clock>,
    sweep_interval: Duration,
) {
    info!(
        sweep_interval_ms = sweep_interval.as_millis() as u64,
        window_ms = deduplicator.window_ms,
        "Starting hit dedup sweep task"
    );

    let mut ticker = interval(sweep_interval);
    loop {
        ticker.tick().await;
        let removed = deduplicator.sweep(clock.now_ms());
        if removed > 0 {
            debug!(removed, remaining = deduplicator.len(), "Swept stale dedup entries");
        }
    }
}
