//! Scroll-section controller
//!
//! Ties the mapper, the idle watchdog and the animation driver to one host.
//! The controller has a single mount and a single teardown; everything it
//! registers with the host is released on `unmount` or when it is dropped.

use tracing::{debug, info, trace, warn};

use crate::config::ScrollConfig;
use crate::constants::scroll::HOME_SECTION;
use crate::host::{
    ActivityKind, ControllerHost, EventRegistry, FrameId, ListenerId, ScrollSample, ScrollSurface,
    SharedClock,
};

use super::driver::{AnimationDriver, DriverState, TransitionStart};
use super::mapper::SectionMapper;
use super::request::{RequestOrigin, SectionRequestReceiver, SectionRequests};
use super::watchdog::IdleWatchdog;

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, nothing registered yet
    Detached,
    /// Listeners and frame callback registered, timers live
    Mounted,
    /// Torn down for good
    Unmounted,
}

/// Keeps the scroll position and the section index in step
pub struct ScrollController<H: ControllerHost> {
    host: H,
    clock: SharedClock,
    requests: SectionRequests,
    mapper: SectionMapper,
    watchdog: IdleWatchdog,
    driver: AnimationDriver,
    section: usize,
    lifecycle: Lifecycle,
    listeners: Vec<ListenerId>,
    frames: Option<FrameId>,
}

impl<H: ControllerHost> ScrollController<H> {
    /// Create a controller with its own request channel
    pub fn new(config: &ScrollConfig, host: H, clock: SharedClock) -> (Self, SectionRequestReceiver) {
        let (requests, rx) = SectionRequests::channel();
        (Self::with_requests(config, host, clock, requests), rx)
    }

    /// Create a controller that sends into an existing request channel
    pub fn with_requests(
        config: &ScrollConfig,
        host: H,
        clock: SharedClock,
        requests: SectionRequests,
    ) -> Self {
        Self {
            host,
            clock,
            requests,
            mapper: SectionMapper::new(),
            watchdog: IdleWatchdog::new(config.idle_timeout()),
            driver: AnimationDriver::new(config.transition(), config.easing, config.retarget),
            section: HOME_SECTION,
            lifecycle: Lifecycle::Detached,
            listeners: Vec::new(),
            frames: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register activity listeners and the frame callback, arm the idle timer
    pub fn mount(&mut self) {
        match self.lifecycle {
            Lifecycle::Detached => {}
            Lifecycle::Mounted => {
                warn!("Scroll controller already mounted");
                return;
            }
            Lifecycle::Unmounted => {
                warn!("Scroll controller cannot be mounted after teardown");
                return;
            }
        }

        for kind in ActivityKind::ALL {
            let id = self.host.add_listener(kind);
            self.listeners.push(id);
        }
        self.frames = Some(self.host.request_frames());
        self.mapper = SectionMapper::new();
        self.watchdog.rearm(self.clock.now());
        self.lifecycle = Lifecycle::Mounted;

        info!(
            listeners = self.listeners.len(),
            idle_timeout_ms = self.watchdog.timeout().as_millis() as u64,
            "Scroll controller mounted"
        );
    }

    /// Release every listener and timer. Safe to call any number of times.
    pub fn unmount(&mut self) {
        for id in self.listeners.drain(..) {
            self.host.remove_listener(id);
        }
        if let Some(id) = self.frames.take() {
            self.host.cancel_frames(id);
        }
        self.watchdog.cancel();
        self.driver.cancel();

        if self.lifecycle != Lifecycle::Unmounted {
            debug!(previous = ?self.lifecycle, "Scroll controller unmounted");
            self.lifecycle = Lifecycle::Unmounted;
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// A user-input event arrived on one of the registered streams
    pub fn on_activity(&mut self, kind: ActivityKind) {
        if !self.is_mounted() {
            return;
        }
        let now = self.clock.now();
        trace!(%kind, now_ms = now.as_millis() as u64, "Activity");
        self.watchdog.rearm(now);
    }

    /// The host applied a section change
    ///
    /// Re-applying the current section does nothing. Any real change counts
    /// as activity and starts a transition towards the new section.
    pub fn set_section(&mut self, index: usize) {
        let pages = self.host.sample().pages.max(1);
        let index = if index >= pages {
            warn!(index, pages, "Section index out of range, clamping");
            pages - 1
        } else {
            index
        };

        if index == self.section {
            trace!(index, "Section unchanged");
            return;
        }
        debug!(from = self.section, to = index, "Section changed");
        self.section = index;

        if !self.is_mounted() {
            return;
        }

        let now = self.clock.now();
        self.watchdog.rearm(now);
        let from = self.host.offset();
        let page_height = self.host.page_height();
        match self.driver.start(now, from, index, page_height) {
            TransitionStart::Started => debug!(section = index, from, "Section transition started"),
            TransitionStart::Restarted | TransitionStart::Queued => {}
        }
    }

    /// One animation frame: advance timers, then infer section intent from
    /// the scroll position
    pub fn on_frame(&mut self) {
        if !self.is_mounted() {
            return;
        }

        // Gate on the state at frame start so the frame that finishes a
        // transition does not read the final write as user movement
        let gated = self.driver.is_animating();
        self.advance_timers();

        // Hosts may hand out raw samples; clamp them like the constructor does
        let raw = self.host.sample();
        let sample = ScrollSample::new(raw.normalized, raw.pages);
        if let Some(intent) = self.mapper.evaluate(sample, gated) {
            self.requests.send(intent.index, intent.origin);
        }
    }

    /// Advance timers without a frame (frames stop while the page is hidden)
    pub fn poll_timers(&mut self) {
        if self.is_mounted() {
            self.advance_timers();
        }
    }

    fn advance_timers(&mut self) {
        let now = self.clock.now();

        let step = self.driver.step(now, self.host.page_height());
        if let Some(offset) = step.offset {
            self.host.set_offset(offset);
        }
        if step.finished {
            debug!(section = self.section, "Animation gate released");
        }

        if self.watchdog.poll(now) {
            if self.section != HOME_SECTION {
                info!(
                    section = self.section,
                    idle_ms = self.watchdog.timeout().as_millis() as u64,
                    "Idle timeout, returning to first section"
                );
                self.requests.send(HOME_SECTION, RequestOrigin::IdleTimeout);
            } else {
                debug!("Idle timeout on first section, nothing to do");
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Section the host last applied
    pub fn current_section(&self) -> usize {
        self.section
    }

    /// True while a programmatic transition is running
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// Normalized position seen on the previous frame
    pub fn last_scroll(&self) -> f64 {
        self.mapper.last_scroll()
    }

    /// Pending idle expiry, if armed
    pub fn idle_deadline(&self) -> Option<std::time::Duration> {
        self.watchdog.deadline()
    }

    /// Sender for other producers (menu) sharing this controller's channel
    pub fn requests(&self) -> SectionRequests {
        self.requests.clone()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for user-driven scrolling in replays
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: ControllerHost> Drop for ScrollController<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
