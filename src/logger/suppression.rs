//! Per-message suppression gate.
//!
//! Keys on exact message text. Bursts of distinct messages pass; only exact
//! repeats inside the interval are dropped. The map grows with the number of
//! distinct messages ever admitted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default minimum interval between two emissions of the same message.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Last-emitted timestamps keyed by message text.
#[derive(Debug)]
pub struct SuppressionGate {
    interval: Duration,
    last_emitted: HashMap<String, Instant>,
}

impl SuppressionGate {
    /// Create a gate with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emitted: HashMap::new(),
        }
    }

    /// Decide whether `message` may be emitted at `now`.
    ///
    /// Admitting records `now` as the message's last emission; a rejected
    /// call leaves the record untouched.
    pub fn admit(&mut self, message: &str, now: Instant) -> bool {
        match self.last_emitted.get_mut(message) {
            Some(last) if now.saturating_duration_since(*last) < self.interval => false,
            Some(last) => {
                *last = now;
                true
            }
            None => {
                self.last_emitted.insert(message.to_owned(), now);
                true
            }
        }
    }

    /// Suppression interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of distinct messages seen.
    pub fn tracked(&self) -> usize {
        self.last_emitted.len()
    }
}

impl Default for SuppressionGate {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
