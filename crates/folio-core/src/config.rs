//! Configuration
//!
//! All timings are stored in milliseconds so config files stay plain TOML
//! integers. Every field has a default, so an empty file is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;
use crate::error::ConfigError;
use crate::scroll::{Easing, RetargetPolicy};

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

/// Scroll-section controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Idle period before returning to the first section
    pub idle_timeout_ms: u64,
    /// Duration of a programmatic section transition
    pub transition_ms: u64,
    /// Behaviour when a new target arrives mid-transition
    pub retarget: RetargetPolicy,
    /// Transition easing curve
    pub easing: Easing,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: millis(constants::scroll::IDLE_TIMEOUT),
            transition_ms: millis(constants::scroll::TRANSITION_DURATION),
            retarget: RetargetPolicy::default(),
            easing: Easing::default(),
        }
    }
}

impl ScrollConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Ambient audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub desktop_volume: f32,
    pub mobile_volume: f32,
    pub fade_in_ms: u64,
    pub fade_step_ms: u64,
    /// Viewport width at or below which the device is treated as mobile
    pub mobile_max_width: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            desktop_volume: constants::audio::DESKTOP_TARGET_VOLUME,
            mobile_volume: constants::audio::MOBILE_TARGET_VOLUME,
            fade_in_ms: millis(constants::audio::FADE_IN_DURATION),
            fade_step_ms: millis(constants::audio::FADE_STEP_INTERVAL),
            mobile_max_width: constants::audio::MOBILE_MAX_VIEWPORT_WIDTH,
        }
    }
}

impl AudioConfig {
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_step(&self) -> Duration {
        Duration::from_millis(self.fade_step_ms)
    }
}

/// Navigation menu settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Delay before the menu button shows on the landing section
    pub reveal_delay_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: millis(constants::menu::HOME_REVEAL_DELAY),
        }
    }
}

impl MenuConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Loading screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingConfig {
    pub start_delay_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: millis(constants::loading::START_DELAY),
        }
    }
}

impl LoadingConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub scroll: ScrollConfig,
    pub audio: AudioConfig,
    pub menu: MenuConfig,
    pub loading: LoadingConfig,
}

impl FolioConfig {
    /// Default config location: `~/.folio/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(constants::config::CONFIG_DIR_NAME)
                .join(constants::config::CONFIG_FILE_NAME)
        })
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&contents)
    }

    /// Load from `path` if given, otherwise from the default location when it
    /// exists, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the controllers cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll.idle_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "scroll.idle_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.scroll.transition_ms == 0 {
            return Err(ConfigError::Invalid(
                "scroll.transition_ms must be greater than zero".to_string(),
            ));
        }
        if self.audio.fade_step_ms == 0 {
            return Err(ConfigError::Invalid(
                "audio.fade_step_ms must be greater than zero".to_string(),
            ));
        }
        for (name, volume) in [
            ("audio.desktop_volume", self.audio.desktop_volume),
            ("audio.mobile_volume", self.audio.mobile_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, volume
                )));
            }
        }
        Ok(())
    }
}
