//! Device classification for volume levels

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AudioConfig;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is valid")
});

/// Coarse device class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Mobile when the viewport is narrow or the user agent says so
    pub fn detect(viewport_width: u32, user_agent: &str, config: &AudioConfig) -> Self {
        if viewport_width <= config.mobile_max_width || MOBILE_USER_AGENT.is_match(user_agent) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Fade-in target volume for this class
    pub fn target_volume(self, config: &AudioConfig) -> f32 {
        match self {
            DeviceClass::Desktop => config.desktop_volume,
            DeviceClass::Mobile => config.mobile_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0";

    #[test]
    fn test_detect_by_width() {
        let config = AudioConfig::default();
        assert_eq!(
            DeviceClass::detect(768, DESKTOP_UA, &config),
            DeviceClass::Mobile
        );
        assert_eq!(
            DeviceClass::detect(1440, DESKTOP_UA, &config),
            DeviceClass::Desktop
        );
    }

    #[test]
    fn test_detect_by_user_agent() {
        let config = AudioConfig::default();
        let ipad = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(DeviceClass::detect(1366, ipad, &config), DeviceClass::Mobile);
        assert_eq!(
            DeviceClass::detect(1366, "some android tablet", &config),
            DeviceClass::Mobile
        );
    }

    #[test]
    fn test_target_volume() {
        let config = AudioConfig::default();
        assert_eq!(DeviceClass::Desktop.target_volume(&config), 0.05);
        assert_eq!(DeviceClass::Mobile.target_volume(&config), 0.075);
    }
}
