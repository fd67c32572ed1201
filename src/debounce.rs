//! Debouncing for outbound network calls
//!
//! Place search and weather lookups fire on every keystroke or date change;
//! the debouncer rate-limits them by letting only the latest caller through
//! after a quiet period. This is rate limiting, not a correctness guarantee:
//! an in-flight request that already passed the gate is never cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Generation-counting debouncer. Clones share the same generation counter,
/// so a call on any clone supersedes pending calls on all of them.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet period. Returns `true` if this call is still the
    /// latest one once the period elapses; `false` means a newer call (or a
    /// cancel) superseded it and the caller should skip its network request.
    pub async fn acquire(&self) -> bool {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == my_generation
    }

    /// Invalidate every pending `acquire` without starting a new one
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Configured quiet period
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
