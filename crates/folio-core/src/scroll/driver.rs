//! Animation driver
//!
//! Owns the only programmatic write path to the scroll surface. While a
//! tween is running the driver reports itself as animating, which is the
//! gate that keeps the mapper from reading its own writes as user scrolling.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tween::{Easing, Tween};

/// What to do when a new target arrives while a transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetargetPolicy {
    /// Abandon the running tween and start a new one from the current offset
    #[default]
    Restart,
    /// Let the running tween finish, then start towards the newest target
    Queue,
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Animating { target: usize },
}

/// Outcome of handing the driver a new target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStart {
    Started,
    Restarted,
    Queued,
}

/// Result of advancing the driver by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverStep {
    /// Offset to write to the surface, if a tween was running
    pub offset: Option<f64>,
    /// The last transition finished during this step
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Transition {
    target: usize,
    tween: Tween,
}

/// Runs scroll transitions between sections
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    duration: Duration,
    easing: Easing,
    policy: RetargetPolicy,
    active: Option<Transition>,
    queued: Option<usize>,
}

impl AnimationDriver {
    pub fn new(duration: Duration, easing: Easing, policy: RetargetPolicy) -> Self {
        Self {
            duration,
            easing,
            policy,
            active: None,
            queued: None,
        }
    }

    pub fn state(&self) -> DriverState {
        match &self.active {
            Some(transition) => DriverState::Animating {
                target: transition.target,
            },
            None => DriverState::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Target waiting for the running transition to finish
    pub fn queued(&self) -> Option<usize> {
        self.queued
    }

    /// Begin a transition to `target` starting from `from_offset`
    pub fn start(
        &mut self,
        now: Duration,
        from_offset: f64,
        target: usize,
        page_height: f64,
    ) -> TransitionStart {
        if self.active.is_some() {
            match self.policy {
                RetargetPolicy::Restart => {
                    debug!(section = target, from_offset, "Restarting section transition");
                    self.begin(now, from_offset, target, page_height);
                    return TransitionStart::Restarted;
                }
                RetargetPolicy::Queue => {
                    debug!(section = target, "Queueing section transition");
                    self.queued = Some(target);
                    return TransitionStart::Queued;
                }
            }
        }

        self.begin(now, from_offset, target, page_height);
        TransitionStart::Started
    }

    /// Advance to `now`. A finished transition hands over to the queued
    /// target, if any, without passing through idle.
    pub fn step(&mut self, now: Duration, page_height: f64) -> DriverStep {
        let Some(transition) = &self.active else {
            return DriverStep {
                offset: None,
                finished: false,
            };
        };

        let offset = transition.tween.sample(now);
        if !transition.tween.is_done(now) {
            return DriverStep {
                offset: Some(offset),
                finished: false,
            };
        }

        debug!(section = transition.target, offset, "Section transition complete");
        self.active = None;
        if let Some(next) = self.queued.take() {
            self.begin(now, offset, next, page_height);
            return DriverStep {
                offset: Some(offset),
                finished: false,
            };
        }

        DriverStep {
            offset: Some(offset),
            finished: true,
        }
    }

    /// Drop the running transition and anything queued
    pub fn cancel(&mut self) {
        self.active = None;
        self.queued = None;
    }

    fn begin(&mut self, now: Duration, from_offset: f64, target: usize, page_height: f64) {
        let to = target as f64 * page_height;
        self.active = Some(Transition {
            target,
            tween: Tween::new(from_offset, to, now, self.duration, self.easing),
        });
    }
}
