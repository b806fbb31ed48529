//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// Scroll-section controller defaults
pub mod scroll {
    use super::*;

    /// Idle period after which the page is sent back to the first section
    pub const IDLE_TIMEOUT: Duration = Duration::from_secs(20);

    /// Duration of a programmatic section transition
    pub const TRANSITION_DURATION: Duration = Duration::from_secs(1);

    /// Index of the landing section (the "office" scene)
    pub const HOME_SECTION: usize = 0;

    /// Section the first downward scroll advances to
    pub const FIRST_CONTENT_SECTION: usize = 1;
}

/// Ambient audio defaults
pub mod audio {
    use super::*;

    /// Fade-in target volume on desktop devices
    pub const DESKTOP_TARGET_VOLUME: f32 = 0.05;

    /// Fade-in target volume on mobile devices (small speakers need more)
    pub const MOBILE_TARGET_VOLUME: f32 = 0.075;

    /// Total fade-in duration
    pub const FADE_IN_DURATION: Duration = Duration::from_secs(6);

    /// Interval between fade-in volume steps
    pub const FADE_STEP_INTERVAL: Duration = Duration::from_millis(100);

    /// Viewport width at or below which a device counts as mobile
    pub const MOBILE_MAX_VIEWPORT_WIDTH: u32 = 768;
}

/// Navigation menu defaults
pub mod menu {
    use super::*;

    /// Delay before the menu button appears on the landing section
    pub const HOME_REVEAL_DELAY: Duration = Duration::from_secs(2);
}

/// Loading screen defaults
pub mod loading {
    use super::*;

    /// Delay between reaching full progress and dismissing the loader
    pub const START_DELAY: Duration = Duration::from_millis(500);

    /// Progress value that counts as fully loaded
    pub const COMPLETE_PROGRESS: u8 = 100;
}

/// Configuration file locations
pub mod config {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".folio";

    /// Config file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}
