//! In-memory page host
//!
//! A scroll surface plus listener bookkeeping with no browser behind it.
//! Used by the `folio` replay command and by the controller tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::host::{
    ActivityKind, EventRegistry, FrameId, ListenerId, ScrollSample, ScrollSurface,
};

/// Simulated scroll container with `pages` full-height sections
#[derive(Debug, Clone)]
pub struct SimulatedPage {
    pages: usize,
    page_height: f64,
    offset: f64,
    listeners: BTreeMap<ListenerId, ActivityKind>,
    frames: BTreeSet<FrameId>,
    next_id: u64,
}

impl SimulatedPage {
    pub fn new(pages: usize, page_height: f64) -> Self {
        Self {
            pages: pages.max(1),
            page_height: page_height.max(0.0),
            offset: 0.0,
            listeners: BTreeMap::new(),
            frames: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Scrollable range in pixels (total height minus one viewport)
    pub fn scroll_range(&self) -> f64 {
        (self.pages - 1) as f64 * self.page_height
    }

    /// User-driven scroll to a normalized position
    pub fn scroll_to(&mut self, normalized: f64) {
        let normalized = normalized.clamp(0.0, 1.0);
        self.offset = normalized * self.scroll_range();
    }

    /// Whether any listener for `kind` is registered
    pub fn is_listening(&self, kind: ActivityKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frame_callback_count(&self) -> usize {
        self.frames.len()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl ScrollSurface for SimulatedPage {
    fn sample(&self) -> ScrollSample {
        let range = self.scroll_range();
        let normalized = if range > 0.0 { self.offset / range } else { 0.0 };
        ScrollSample::new(normalized, self.pages)
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn offset(&self) -> f64 {
        self.offset
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.scroll_range());
    }
}

impl EventRegistry for SimulatedPage {
    fn add_listener(&mut self, kind: ActivityKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frames(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.insert(id);
        id
    }

    fn cancel_frames(&mut self, id: FrameId) {
        self.frames.remove(&id);
    }
}
