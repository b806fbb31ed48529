//! Slide-out navigation menu
//!
//! Menu entries send section requests through the same channel as the
//! scroll controller. The menu button stays hidden for a short delay the
//! first time the landing section is shown, so it does not compete with the
//! intro; on any other section it shows at once and stays visible.

use std::time::Duration;

use tracing::debug;

use crate::config::MenuConfig;
use crate::constants::scroll::HOME_SECTION;
use crate::host::SharedClock;
use crate::scroll::{RequestOrigin, SectionRequests};

/// One navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub section: usize,
}

/// Navigation entries in display order
pub const ENTRIES: [MenuEntry; 4] = [
    MenuEntry {
        label: "About",
        section: 0,
    },
    MenuEntry {
        label: "Skills",
        section: 1,
    },
    MenuEntry {
        label: "Projects",
        section: 2,
    },
    MenuEntry {
        label: "Contact",
        section: 3,
    },
];

/// Look up an entry by label, ignoring case
pub fn entry_by_label(label: &str) -> Option<MenuEntry> {
    ENTRIES
        .iter()
        .copied()
        .find(|entry| entry.label.eq_ignore_ascii_case(label))
}

/// Menu open state and button visibility
pub struct NavigationMenu {
    clock: SharedClock,
    requests: SectionRequests,
    reveal_delay: Duration,
    open: bool,
    button_visible: bool,
    reveal_at: Option<Duration>,
}

impl NavigationMenu {
    /// Create the menu for a page that starts on the landing section
    pub fn new(config: &MenuConfig, clock: SharedClock, requests: SectionRequests) -> Self {
        let mut menu = Self {
            clock,
            requests,
            reveal_delay: config.reveal_delay(),
            open: false,
            button_visible: false,
            reveal_at: None,
        };
        menu.on_section_changed(HOME_SECTION);
        menu
    }

    /// Open or close the slide-out panel
    pub fn toggle(&mut self) {
        self.open = !self.open;
        debug!(open = self.open, "Menu toggled");
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Navigate to an entry
    pub fn select(&self, entry: MenuEntry) {
        debug!(label = entry.label, section = entry.section, "Menu entry selected");
        self.requests.send(entry.section, RequestOrigin::Menu);
    }

    /// The page moved to `section`
    pub fn on_section_changed(&mut self, section: usize) {
        if section == HOME_SECTION {
            if !self.button_visible && self.reveal_at.is_none() {
                self.reveal_at = Some(self.clock.now() + self.reveal_delay);
            }
        } else {
            self.reveal_at = None;
            self.button_visible = true;
        }
    }

    /// Apply a pending button reveal
    pub fn tick(&mut self) {
        if let Some(at) = self.reveal_at {
            if self.clock.now() >= at {
                self.reveal_at = None;
                self.button_visible = true;
                debug!("Menu button revealed");
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_button_visible(&self) -> bool {
        self.button_visible
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::ManualClock;
    use crate::scroll::{drain, SectionRequestReceiver};

    fn menu() -> (ManualClock, NavigationMenu, SectionRequestReceiver) {
        let clock = ManualClock::new();
        let (requests, rx) = SectionRequests::channel();
        let menu = NavigationMenu::new(&MenuConfig::default(), Arc::new(clock.clone()), requests);
        (clock, menu, rx)
    }

    #[test]
    fn test_button_revealed_after_delay_on_home() {
        let (clock, mut menu, _rx) = menu();
        assert!(!menu.is_button_visible());

        clock.advance(Duration::from_millis(1999));
        menu.tick();
        assert!(!menu.is_button_visible());

        clock.advance(Duration::from_millis(1));
        menu.tick();
        assert!(menu.is_button_visible());

        // stays visible when coming back home
        menu.on_section_changed(2);
        menu.on_section_changed(0);
        menu.tick();
        assert!(menu.is_button_visible());
    }

    #[test]
    fn test_repeated_home_keeps_reveal_deadline() {
        let (clock, mut menu, _rx) = menu();
        clock.advance(Duration::from_millis(1500));
        menu.on_section_changed(0);

        clock.advance(Duration::from_millis(500));
        menu.tick();
        assert!(menu.is_button_visible());
    }

    #[test]
    fn test_other_section_shows_immediately() {
        let (clock, mut menu, _rx) = menu();
        clock.advance(Duration::from_millis(500));
        menu.on_section_changed(1);
        assert!(menu.is_button_visible());

        clock.advance(Duration::from_secs(5));
        menu.tick();
        assert!(menu.is_button_visible());
    }

    #[test]
    fn test_select_sends_menu_request() {
        let (_clock, mut menu, mut rx) = menu();
        menu.toggle();
        assert!(menu.is_open());

        let contact = entry_by_label("contact").unwrap();
        menu.select(contact);
        let requests = drain(&mut rx);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, 3);
        assert_eq!(requests[0].origin, RequestOrigin::Menu);

        menu.toggle();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_entry_lookup() {
        assert_eq!(entry_by_label("Skills").map(|e| e.section), Some(1));
        assert_eq!(entry_by_label("Blog"), None);
    }
}
