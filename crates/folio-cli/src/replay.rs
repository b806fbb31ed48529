//! Timeline replay
//!
//! Plays a script against a simulated page with a manual clock. The replay
//! acts as the host: it owns the section index, applies every request that
//! comes out of the shared channel, and forwards input to the controllers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use folio_core::audio::{AmbientAudio, AudioSink, DeviceClass};
use folio_core::loading::LoadingGate;
use folio_core::menu::{self, NavigationMenu};
use folio_core::scroll::{drain, RequestOrigin, SectionRequestReceiver, SectionRequests};
use folio_core::{ActivityKind, AudioError, FolioConfig, ManualClock, ScrollController, SimulatedPage};

use crate::script::{Action, AudioControl, Script};

/// Something observable that happened during a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Request { index: usize, origin: RequestOrigin },
    Section { index: usize },
    TransitionDone { offset: f64 },
    MenuButtonShown,
    Started,
    Audio { playing: bool, muted: bool, volume: f32 },
}

/// Outcome stamped with simulated time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub at_ms: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Audio element stand-in that only remembers what it was told
#[derive(Debug, Default)]
pub struct SilentSink {
    volume: f32,
}

impl AudioSink for SilentSink {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, _muted: bool) {}

    fn seek(&mut self, _position: Duration) {}
}

struct Page {
    clock: ManualClock,
    controller: ScrollController<SimulatedPage>,
    rx: SectionRequestReceiver,
    menu: NavigationMenu,
    loading: LoadingGate,
    audio: AmbientAudio<SilentSink>,
    records: Vec<Record>,
}

impl Page {
    fn new(config: &FolioConfig, script: &Script) -> Self {
        let clock = ManualClock::new();
        let shared = Arc::new(clock.clone());
        let (requests, rx) = SectionRequests::channel();

        let page = SimulatedPage::new(script.pages, script.page_height);
        let mut controller =
            ScrollController::with_requests(&config.scroll, page, shared.clone(), requests.clone());
        controller.mount();

        Self {
            menu: NavigationMenu::new(&config.menu, shared.clone(), requests),
            loading: LoadingGate::new(&config.loading, shared.clone()),
            audio: AmbientAudio::new(
                SilentSink::default(),
                shared,
                config.audio.clone(),
                DeviceClass::Desktop,
            ),
            clock,
            controller,
            rx,
            records: Vec::new(),
        }
    }

    fn now_ms(&self) -> u64 {
        use folio_core::Clock;
        self.clock.now().as_millis() as u64
    }

    fn record(&mut self, outcome: Outcome) {
        let at_ms = self.now_ms();
        self.records.push(Record { at_ms, outcome });
    }

    /// One rendered frame, then apply whatever was requested
    fn frame(&mut self) {
        let was_animating = self.controller.is_animating();
        let menu_visible = self.menu.is_button_visible();

        self.controller.on_frame();
        self.menu.tick();
        self.audio.tick();
        if self.loading.tick() {
            self.record(Outcome::Started);
        }

        if was_animating && !self.controller.is_animating() {
            use folio_core::host::ScrollSurface;
            let offset = self.controller.host().offset();
            self.record(Outcome::TransitionDone { offset });
        }
        if !menu_visible && self.menu.is_button_visible() {
            self.record(Outcome::MenuButtonShown);
        }

        self.apply_requests();
    }

    fn apply_requests(&mut self) {
        for request in drain(&mut self.rx) {
            self.record(Outcome::Request {
                index: request.index,
                origin: request.origin,
            });
            let before = self.controller.current_section();
            self.controller.set_section(request.index);
            let after = self.controller.current_section();
            if after != before {
                self.menu.on_section_changed(after);
                self.record(Outcome::Section { index: after });
            }
        }
    }

    fn apply(&mut self, action: &Action) {
        debug!(?action, at_ms = self.now_ms(), "Replaying action");
        match action {
            Action::Scroll { to } => {
                self.controller.host_mut().scroll_to(*to);
                self.controller.on_activity(ActivityKind::Scroll);
            }
            Action::Activity { kind } => {
                if let Some(kind) = ActivityKind::parse(kind) {
                    self.controller.on_activity(kind);
                }
            }
            Action::Menu { entry } => {
                if let Some(entry) = menu::entry_by_label(entry) {
                    self.controller.on_activity(ActivityKind::PointerDown);
                    self.menu.select(entry);
                    self.menu.close();
                }
            }
            Action::ToggleMenu => {
                self.controller.on_activity(ActivityKind::PointerDown);
                self.menu.toggle();
            }
            Action::Audio { control } => {
                self.controller.on_activity(ActivityKind::PointerDown);
                match control {
                    AudioControl::Start => self.audio.start(),
                    AudioControl::TogglePlay => self.audio.toggle_play(),
                    AudioControl::ToggleMute => self.audio.toggle_mute(),
                }
                self.record_audio();
            }
            Action::Progress { percent } => self.loading.set_progress(*percent),
        }
        self.apply_requests();
    }

    fn record_audio(&mut self) {
        let outcome = Outcome::Audio {
            playing: self.audio.is_playing(),
            muted: self.audio.is_muted(),
            volume: self.audio.sink().volume,
        };
        self.record(outcome);
    }

    /// Run frames up to and including `until`
    fn run_frames(&mut self, from: Duration, until: Duration, frame: Duration) -> Duration {
        let mut t = from;
        while t + frame <= until {
            t += frame;
            self.clock.set(t);
            self.frame();
        }
        t
    }
}

/// Replay `script` and return everything that happened, in order
pub fn run(config: &FolioConfig, script: &Script) -> Vec<Record> {
    let mut page = Page::new(config, script);
    let frame = Duration::from_millis(script.frame_ms);
    let mut t = Duration::ZERO;

    for event in &script.events {
        let at = Duration::from_millis(event.at_ms);
        t = page.run_frames(t, at, frame);
        if at > t {
            t = at;
            page.clock.set(t);
        }
        page.apply(&event.action);
    }

    let until = script.run_until_ms.map(Duration::from_millis).unwrap_or_else(|| {
        Duration::from_millis(script.last_event_ms())
            + config.scroll.idle_timeout()
            + config.scroll.transition()
    });
    page.run_frames(t, until, frame);
    page.controller.unmount();

    let records = std::mem::take(&mut page.records);
    debug!(records = records.len(), "Replay finished");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(script: &str) -> Vec<Record> {
        let script = Script::parse(script).unwrap();
        run(&FolioConfig::default(), &script)
    }

    fn requests(records: &[Record]) -> Vec<(usize, RequestOrigin)> {
        records
            .iter()
            .filter_map(|r| match r.outcome {
                Outcome::Request { index, origin } => Some((index, origin)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_scroll_advances_then_idle_returns_home() {
        let records = replay(
            r#"
            [[event]]
            at_ms = 3000
            action = "scroll"
            to = 0.05
            "#,
        );

        let requests = requests(&records);
        assert_eq!(requests[0], (1, RequestOrigin::ScrollForward));
        assert_eq!(
            requests.last().copied(),
            Some((0, RequestOrigin::IdleTimeout))
        );

        let reset = records
            .iter()
            .find(|r| {
                matches!(
                    r.outcome,
                    Outcome::Request {
                        origin: RequestOrigin::IdleTimeout,
                        ..
                    }
                )
            })
            .map(|r| r.at_ms)
            .unwrap();
        // idle window restarts at the section change right after the scroll
        assert!((23_000..23_100).contains(&reset));
    }

    #[test]
    fn test_menu_navigation_and_button_reveal() {
        let records = replay(
            r#"
            run_until_ms = 6000

            [[event]]
            at_ms = 2500
            action = "toggle_menu"

            [[event]]
            at_ms = 2600
            action = "menu"
            entry = "Contact"
            "#,
        );

        assert!(records
            .iter()
            .any(|r| r.outcome == Outcome::MenuButtonShown && r.at_ms == 2000));
        assert_eq!(requests(&records), vec![(3, RequestOrigin::Menu)]);
        assert!(records
            .iter()
            .any(|r| matches!(r.outcome, Outcome::TransitionDone { offset } if offset == 2700.0)));
    }

    #[test]
    fn test_loading_and_audio_outcomes() {
        let records = replay(
            r#"
            run_until_ms = 2000

            [[event]]
            at_ms = 100
            action = "progress"
            percent = 100

            [[event]]
            at_ms = 700
            action = "audio"
            control = "toggle_mute"
            "#,
        );

        let started = records
            .iter()
            .find(|r| r.outcome == Outcome::Started)
            .map(|r| r.at_ms);
        assert!(matches!(started, Some(at) if (600..=620).contains(&at)));
        assert!(records.iter().any(|r| matches!(
            r.outcome,
            Outcome::Audio {
                playing: true,
                muted: false,
                ..
            }
        )));
    }
}
