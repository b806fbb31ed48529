//! Replay scripts
//!
//! A script is a TOML timeline of user actions against a simulated page:
//!
//! ```toml
//! pages = 4
//!
//! [[event]]
//! at_ms = 500
//! action = "scroll"
//! to = 0.1
//!
//! [[event]]
//! at_ms = 4000
//! action = "menu"
//! entry = "Contact"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use folio_core::ActivityKind;

fn default_pages() -> usize {
    4
}

fn default_page_height() -> f64 {
    900.0
}

fn default_frame_ms() -> u64 {
    16
}

/// Audio button pressed in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioControl {
    Start,
    TogglePlay,
    ToggleMute,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// User scrolls the page to a normalized position
    Scroll { to: f64 },
    /// Any other input event (`mousemove`, `keydown`, ...)
    Activity { kind: String },
    /// Menu entry clicked, by label
    Menu { entry: String },
    /// Menu button clicked
    ToggleMenu,
    /// Sound controls
    Audio { control: AudioControl },
    /// Asset loading progress in percent
    Progress { percent: u8 },
}

/// Action scheduled at a point of the timeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// Parsed replay script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default = "default_pages")]
    pub pages: usize,
    #[serde(default = "default_page_height")]
    pub page_height: f64,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Keep simulating until this time; defaults to the last event plus the
    /// idle timeout so a trailing reset is visible
    pub run_until_ms: Option<u64>,
    #[serde(default, rename = "event")]
    pub events: Vec<Event>,
}

impl Script {
    pub fn parse(contents: &str) -> Result<Self> {
        let mut script: Script = toml::from_str(contents).context("Invalid replay script")?;
        script.validate()?;
        script.events.sort_by_key(|event| event.at_ms);
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.pages == 0 {
            bail!("pages must be at least 1");
        }
        if self.frame_ms == 0 {
            bail!("frame_ms must be greater than zero");
        }
        if self.page_height <= 0.0 {
            bail!("page_height must be positive");
        }
        for event in &self.events {
            match &event.action {
                Action::Activity { kind } if ActivityKind::parse(kind).is_none() => {
                    bail!("unknown activity kind '{}' at {} ms", kind, event.at_ms);
                }
                Action::Menu { entry } if folio_core::menu::entry_by_label(entry).is_none() => {
                    bail!("unknown menu entry '{}' at {} ms", entry, event.at_ms);
                }
                Action::Scroll { to } if !(0.0..=1.0).contains(to) => {
                    bail!("scroll target {} at {} ms is outside 0.0..=1.0", to, event.at_ms);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Time of the last scripted event
    pub fn last_event_ms(&self) -> u64 {
        self.events.last().map(|event| event.at_ms).unwrap_or(0)
    }
}
