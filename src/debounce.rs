//! Input debouncing at the boundary between user input and the controller
//!
//! The controller stays correct without it; debouncing only keeps bursts of
//! keystrokes from issuing a fetch each.

use std::time::{Duration, Instant};

/// Reference minimum gap between accepted invocations.
pub const DEFAULT_GAP: Duration = Duration::from_millis(200);

/// Coalesces bursts of events: an event arriving within the configured gap
/// of the last accepted one is dropped.
#[derive(Debug)]
pub struct Debouncer {
    gap: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(gap: Duration) -> Self {
        Self {
            gap,
            last_accepted: None,
        }
    }

    /// Whether an event arriving now should be acted on. Accepting an event
    /// restarts the gap.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.gap => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_GAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_always_accepted() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.ready());
    }

    #[test]
    fn events_within_the_gap_are_dropped() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        assert!(debouncer.ready());
        assert!(!debouncer.ready());
        assert!(!debouncer.ready());
    }

    #[test]
    fn events_after_the_gap_are_accepted() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert!(debouncer.ready());
        std::thread::sleep(Duration::from_millis(15));
        assert!(debouncer.ready());
    }
}
