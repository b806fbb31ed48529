//! Scroll-section controller
//!
//! Keeps a continuously scrolled page and a discrete section index in step:
//! - `mapper`: scroll position to section intent
//! - `watchdog`: idle timeout back to the first section
//! - `driver`: animated transitions when the section index changes
//! - `controller`: lifecycle and wiring to the host

pub mod controller;
pub mod driver;
pub mod mapper;
pub mod request;
pub mod tween;
pub mod watchdog;

pub use controller::{Lifecycle, ScrollController};
pub use driver::{AnimationDriver, DriverState, RetargetPolicy};
pub use mapper::SectionMapper;
pub use request::{drain, RequestOrigin, SectionRequest, SectionRequestReceiver, SectionRequests};
pub use tween::{Easing, Tween};
pub use watchdog::IdleWatchdog;
