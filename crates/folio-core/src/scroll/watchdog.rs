//! Idle watchdog
//!
//! One pending deadline at most. Rearming replaces the deadline, so there is
//! never a stale expiry left behind to fire twice.

use std::time::Duration;

/// Single-shot idle timer
#[derive(Debug, Clone)]
pub struct IdleWatchdog {
    timeout: Duration,
    deadline: Option<Duration>,
}

impl IdleWatchdog {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pending expiry time, if armed
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Record activity at `now` and schedule a fresh expiry
    pub fn rearm(&mut self, now: Duration) {
        self.deadline = Some(now + self.timeout);
    }

    /// Drop the pending expiry
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the deadline has passed. The watchdog
    /// stays disarmed afterwards until the next `rearm`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut watchdog = IdleWatchdog::new(secs(20));
        watchdog.rearm(secs(0));

        assert!(!watchdog.poll(secs(19)));
        assert!(watchdog.poll(secs(20)));
        assert!(!watchdog.poll(secs(45)));
        assert_eq!(watchdog.deadline(), None);
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut watchdog = IdleWatchdog::new(secs(20));
        watchdog.rearm(secs(0));
        watchdog.rearm(secs(19));

        assert!(!watchdog.poll(secs(20)));
        assert!(!watchdog.poll(secs(38)));
        assert!(watchdog.poll(secs(39)));
        assert_eq!(watchdog.deadline(), None);
    }

    #[test]
    fn test_cancel_disarms() {
        let mut watchdog = IdleWatchdog::new(secs(5));
        watchdog.rearm(secs(1));
        watchdog.cancel();
        assert!(!watchdog.poll(secs(100)));
    }
}
