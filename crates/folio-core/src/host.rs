//! Host abstraction
//!
//! Everything the page-state machines need from their environment is passed
//! in through these traits instead of being reached through globals:
//! - a monotonic clock
//! - the scroll surface (position register + page geometry)
//! - listener and frame-callback registration

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

// =============================================================================
// Clock
// =============================================================================

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's epoch
    fn now(&self) -> Duration;
}

/// Clock handle shared between the controllers of one page
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Manually driven clock for tests and scripted replays
///
/// Clones share the same underlying time, so one handle can be given to a
/// controller while another advances it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, to: Duration) {
        let mut now = self.now.lock();
        if to > *now {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

// =============================================================================
// Scroll surface
// =============================================================================

/// Snapshot of the scroll surface taken once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Scroll offset divided by the scrollable range, in `[0, 1]`
    pub normalized: f64,
    /// Number of sections on the page (0 is treated as 1)
    pub pages: usize,
}

impl ScrollSample {
    pub fn new(normalized: f64, pages: usize) -> Self {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        Self {
            normalized,
            pages: pages.max(1),
        }
    }
}

/// The scrollable element the page sections live in
pub trait ScrollSurface {
    /// Current normalized position and page count
    fn sample(&self) -> ScrollSample;

    /// Height of one section in pixels
    fn page_height(&self) -> f64;

    /// Current scroll offset in pixels
    fn offset(&self) -> f64;

    /// Move the scroll offset. Only the animation driver calls this.
    fn set_offset(&mut self, offset: f64);
}

impl<T: ScrollSurface + ?Sized> ScrollSurface for &mut T {
    fn sample(&self) -> ScrollSample {
        (**self).sample()
    }

    fn page_height(&self) -> f64 {
        (**self).page_height()
    }

    fn offset(&self) -> f64 {
        (**self).offset()
    }

    fn set_offset(&mut self, offset: f64) {
        (**self).set_offset(offset)
    }
}

// =============================================================================
// Event registration
// =============================================================================

/// User-input streams that count as activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Scroll,
    PointerMove,
    PointerDown,
    KeyDown,
    TouchStart,
}

impl ActivityKind {
    /// Every stream the idle watchdog listens to
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Scroll,
        ActivityKind::PointerMove,
        ActivityKind::PointerDown,
        ActivityKind::KeyDown,
        ActivityKind::TouchStart,
    ];

    /// DOM event name for this stream
    pub fn event_name(self) -> &'static str {
        match self {
            ActivityKind::Scroll => "scroll",
            ActivityKind::PointerMove => "mousemove",
            ActivityKind::PointerDown => "mousedown",
            ActivityKind::KeyDown => "keydown",
            ActivityKind::TouchStart => "touchstart",
        }
    }

    /// Parse a DOM event name or the snake_case variant name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "scroll" => Some(ActivityKind::Scroll),
            "mousemove" | "pointer_move" => Some(ActivityKind::PointerMove),
            "mousedown" | "pointer_down" => Some(ActivityKind::PointerDown),
            "keydown" | "key_down" => Some(ActivityKind::KeyDown),
            "touchstart" | "touch_start" => Some(ActivityKind::TouchStart),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Handle for a registered activity listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Handle for a registered per-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

/// Listener and frame-callback registration offered by the host
///
/// The host forwards events for registered kinds to the controller; the
/// controller is responsible for removing everything it registered.
pub trait EventRegistry {
    fn add_listener(&mut self, kind: ActivityKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    fn request_frames(&mut self) -> FrameId;

    fn cancel_frames(&mut self, id: FrameId);
}

impl<T: EventRegistry + ?Sized> EventRegistry for &mut T {
    fn add_listener(&mut self, kind: ActivityKind) -> ListenerId {
        (**self).add_listener(kind)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        (**self).remove_listener(id)
    }

    fn request_frames(&mut self) -> FrameId {
        (**self).request_frames()
    }

    fn cancel_frames(&mut self, id: FrameId) {
        (**self).cancel_frames(id)
    }
}

/// Everything the scroll controller needs from its host
pub trait ControllerHost: ScrollSurface + EventRegistry {}

impl<T: ScrollSurface + EventRegistry> ControllerHost for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));

        clock.set(Duration::from_secs(1));
        assert_eq!(handle.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }

    #[test]
    fn test_scroll_sample_clamps() {
        let sample = ScrollSample::new(1.4, 0);
        assert_eq!(sample.normalized, 1.0);
        assert_eq!(sample.pages, 1);

        assert_eq!(ScrollSample::new(f64::NAN, 4).normalized, 0.0);
        assert_eq!(ScrollSample::new(-0.2, 4).normalized, 0.0);
    }

    #[test]
    fn test_activity_kind_parse() {
        for kind in ActivityKind::ALL {
            assert_eq!(ActivityKind::parse(kind.event_name()), Some(kind));
        }
        assert_eq!(
            ActivityKind::parse("pointer_move"),
            Some(ActivityKind::PointerMove)
        );
        assert_eq!(ActivityKind::parse("wheel"), None);
    }
}
