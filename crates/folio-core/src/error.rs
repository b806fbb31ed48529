//! Error types for configuration and audio playback
//!
//! The scroll controller itself never fails; only the pieces that touch the
//! outside world (config files, the audio element) carry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unexpected fields
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config serialization failed
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but holds values the controllers cannot run with
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Audio playback error type
#[derive(Debug, Error)]
pub enum AudioError {
    /// The platform refused to start playback (autoplay policy)
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),
}
