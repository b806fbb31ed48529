//! Loading screen gate
//!
//! The experience starts a short moment after every asset has loaded, so the
//! loader can fade out over a fully rendered scene.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::LoadingConfig;
use crate::constants::loading::COMPLETE_PROGRESS;
use crate::host::SharedClock;

/// Tracks asset progress and flips to started once loading is complete
pub struct LoadingGate {
    clock: SharedClock,
    start_delay: Duration,
    progress: u8,
    start_at: Option<Duration>,
    started: bool,
}

impl LoadingGate {
    pub fn new(config: &LoadingConfig, clock: SharedClock) -> Self {
        Self {
            clock,
            start_delay: config.start_delay(),
            progress: 0,
            start_at: None,
            started: false,
        }
    }

    /// Report loading progress in percent (values above 100 are clamped)
    pub fn set_progress(&mut self, progress: u8) {
        let progress = progress.min(COMPLETE_PROGRESS);
        self.progress = progress;
        if self.started {
            return;
        }

        // A scheduled start survives later progress reports
        if progress == COMPLETE_PROGRESS && self.start_at.is_none() {
            debug!("Assets loaded, scheduling start");
            self.start_at = Some(self.clock.now() + self.start_delay);
        }
    }

    /// Apply a pending start; returns true on the call that flips it
    pub fn tick(&mut self) -> bool {
        match self.start_at {
            Some(at) if self.clock.now() >= at => {
                self.start_at = None;
                self.started = true;
                info!("Experience started");
                true
            }
            _ => false,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::ManualClock;

    fn gate() -> (ManualClock, LoadingGate) {
        let clock = ManualClock::new();
        let gate = LoadingGate::new(&LoadingConfig::default(), Arc::new(clock.clone()));
        (clock, gate)
    }

    #[test]
    fn test_starts_after_delay() {
        let (clock, mut gate) = gate();
        gate.set_progress(40);
        clock.advance(Duration::from_secs(1));
        assert!(!gate.tick());

        gate.set_progress(100);
        clock.advance(Duration::from_millis(499));
        assert!(!gate.tick());
        clock.advance(Duration::from_millis(1));
        assert!(gate.tick());
        assert!(gate.is_started());
        assert!(!gate.tick());
    }

    #[test]
    fn test_repeated_completion_does_not_push_start_back() {
        let (clock, mut gate) = gate();
        gate.set_progress(100);
        clock.advance(Duration::from_millis(300));
        gate.set_progress(100);
        clock.advance(Duration::from_millis(200));
        assert!(gate.tick());
    }

    #[test]
    fn test_regression_keeps_pending_start() {
        let (clock, mut gate) = gate();
        gate.set_progress(100);
        gate.set_progress(90);
        assert_eq!(gate.progress(), 90);

        clock.advance(Duration::from_millis(500));
        assert!(gate.tick());
        assert!(gate.is_started());
    }

    #[test]
    fn test_progress_is_clamped() {
        let (_clock, mut gate) = gate();
        gate.set_progress(250);
        assert_eq!(gate.progress(), 100);
    }
}
