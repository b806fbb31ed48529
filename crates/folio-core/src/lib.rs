//! Folio Core - Page-state machines for the portfolio front-end
//!
//! This crate provides the timing and navigation logic behind the site:
//! - Scroll-section controller (scroll mapping, idle reset, transitions)
//! - Ambient audio playback with fade-in
//! - Navigation menu state
//! - Loading screen gate
//!
//! Rendering and platform APIs stay outside; they are reached through the
//! traits in [`host`] and [`audio::AudioSink`].

pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod loading;
pub mod menu;
pub mod scroll;
pub mod sim;

// Re-exports for convenience
pub use config::FolioConfig;
pub use error::{AudioError, ConfigError};
pub use host::{ActivityKind, Clock, ManualClock, SharedClock, SystemClock};
pub use scroll::{ScrollController, SectionRequest};
pub use sim::SimulatedPage;
