//! Ambient audio
//!
//! Playback state and the fade-in ramp for the looping background track.
//! Decoding and output belong to the platform behind [`AudioSink`].

pub mod controller;
pub mod device;

pub use controller::{AmbientAudio, AudioSink, FadeIn};
pub use device::DeviceClass;
