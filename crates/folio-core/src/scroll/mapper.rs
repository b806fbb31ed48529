//! Scroll-to-section mapper
//!
//! Turns the continuous scroll position into section change intents. Only
//! two edges are recognised:
//! - moving down while still inside the first section advances to section 1
//! - moving up while inside the first page band returns to section 0
//!
//! Transitions between later sections are left to explicit navigation.

use crate::constants::scroll::{FIRST_CONTENT_SECTION, HOME_SECTION};
use crate::host::ScrollSample;

use super::request::RequestOrigin;

/// Section change derived from one frame's scroll movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub index: usize,
    pub origin: RequestOrigin,
}

/// Tracks the previous frame's position to infer scroll direction
#[derive(Debug, Clone, Default)]
pub struct SectionMapper {
    last_scroll: f64,
}

impl SectionMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position seen on the previous frame
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    /// Evaluate one frame
    ///
    /// While `animating` is set nothing is inferred; the position is still
    /// recorded so the direction check is correct once the gate lifts.
    pub fn evaluate(&mut self, sample: ScrollSample, animating: bool) -> Option<Intent> {
        let current = sample.normalized;
        let intent = if animating {
            None
        } else {
            self.infer(current, sample.pages)
        };
        self.last_scroll = current;
        intent
    }

    fn infer(&self, current: f64, pages: usize) -> Option<Intent> {
        // A single page document is always on the home section
        if pages <= 1 {
            return None;
        }

        let section = (current * pages as f64).floor() as usize;
        if current > self.last_scroll && section == HOME_SECTION {
            return Some(Intent {
                index: FIRST_CONTENT_SECTION,
                origin: RequestOrigin::ScrollForward,
            });
        }

        let band = 1.0 / (pages - 1) as f64;
        if current < self.last_scroll && current < band {
            return Some(Intent {
                index: HOME_SECTION,
                origin: RequestOrigin::ScrollBackward,
            });
        }

        None
    }
}
