//! Ambient track playback with fade-in
//!
//! The track starts muted and silent. The first user gesture that touches
//! the sound controls starts playback and ramps the volume up in fixed steps.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::AudioConfig;
use crate::error::AudioError;
use crate::host::SharedClock;

use super::device::DeviceClass;

/// Platform audio element
pub trait AudioSink {
    /// Start or resume playback. May be refused by autoplay policies.
    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    fn seek(&mut self, position: Duration);
}

/// Stepped volume ramp
#[derive(Debug, Clone, PartialEq)]
pub struct FadeIn {
    volume: f32,
    target: f32,
    step: f32,
    interval: Duration,
    next_at: Duration,
}

impl FadeIn {
    /// Ramp from silence to `target` over `duration` in `interval` steps
    pub fn new(target: f32, duration: Duration, interval: Duration, now: Duration) -> Self {
        if interval.is_zero() {
            return Self {
                volume: 0.0,
                target,
                step: target,
                interval,
                next_at: now,
            };
        }
        let steps = (duration.as_secs_f64() / interval.as_secs_f64()).max(1.0);
        Self {
            volume: 0.0,
            target,
            step: (target as f64 / steps) as f32,
            interval,
            next_at: now + interval,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_complete(&self) -> bool {
        self.volume >= self.target
    }

    /// Apply every step due by `now`; returns the new volume if it changed
    pub fn advance(&mut self, now: Duration) -> Option<f32> {
        let before = self.volume;
        while now >= self.next_at && !self.is_complete() {
            self.volume = (self.volume + self.step).min(self.target);
            self.next_at += self.interval;
        }
        (self.volume != before).then_some(self.volume)
    }
}

/// Playback state for the background track
pub struct AmbientAudio<S: AudioSink> {
    sink: S,
    clock: SharedClock,
    config: AudioConfig,
    device: DeviceClass,
    started: bool,
    playing: bool,
    muted: bool,
    fade: Option<FadeIn>,
}

impl<S: AudioSink> AmbientAudio<S> {
    /// Wrap a freshly created audio element: silent, muted, not playing
    pub fn new(mut sink: S, clock: SharedClock, config: AudioConfig, device: DeviceClass) -> Self {
        sink.set_volume(0.0);
        sink.set_muted(true);
        Self {
            sink,
            clock,
            config,
            device,
            started: false,
            playing: false,
            muted: true,
            fade: None,
        }
    }

    /// Track metadata arrived; playback begins from the middle of the track
    pub fn on_metadata_loaded(&mut self, duration: Duration) {
        let position = duration / 2;
        debug!(position_ms = position.as_millis() as u64, "Audio metadata loaded");
        self.sink.seek(position);
    }

    /// Start playback with the fade-in ramp
    fn start_with_fade_in(&mut self) {
        self.muted = false;
        self.sink.set_muted(false);

        match self.sink.play() {
            Ok(()) => {
                let target = self.device.target_volume(&self.config);
                info!(device = ?self.device, volume = target, "Audio started, fading in");
                self.started = true;
                self.playing = true;
                self.fade = Some(FadeIn::new(
                    target,
                    self.config.fade_in(),
                    self.config.fade_step(),
                    self.clock.now(),
                ));
            }
            Err(e) => {
                warn!("Audio playback failed, user interaction required: {}", e);
                self.started = false;
            }
        }
    }

    /// Play/pause button. The first press starts the track.
    pub fn toggle_play(&mut self) {
        if !self.started {
            self.start_with_fade_in();
            return;
        }

        if self.playing {
            self.sink.pause();
        } else if let Err(e) = self.sink.play() {
            warn!("Audio playback failed: {}", e);
        }
        self.playing = !self.playing;
    }

    /// Sound button. The first press starts the track; unmuting a paused
    /// track also resumes it.
    pub fn toggle_mute(&mut self) {
        if !self.started {
            self.start_with_fade_in();
            return;
        }

        let was_muted = self.muted;
        self.muted = !was_muted;
        self.sink.set_muted(self.muted);

        if was_muted && !self.playing {
            if let Err(e) = self.sink.play() {
                warn!("Audio playback failed: {}", e);
            }
            self.playing = true;
        }
    }

    /// Start the track if it never started, resume it if paused
    pub fn start(&mut self) {
        if !self.started {
            self.start_with_fade_in();
        } else if !self.playing {
            self.toggle_play();
        }
    }

    /// Advance the fade-in ramp
    pub fn tick(&mut self) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        if let Some(volume) = fade.advance(self.clock.now()) {
            self.sink.set_volume(volume);
        }
        if fade.is_complete() {
            debug!(volume = fade.volume(), "Audio fade-in complete");
            self.fade = None;
        }
    }

    /// Stop playback for good
    pub fn shutdown(&mut self) {
        if self.started {
            self.sink.pause();
        }
        self.started = false;
        self.playing = false;
        self.fade = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AudioSink> Drop for AmbientAudio<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::host::ManualClock;

    #[derive(Default)]
    struct RecordingSink {
        volume: f32,
        muted: bool,
        playing: bool,
        position: Option<Duration>,
        play_calls: usize,
        refuse_play: bool,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self) -> Result<(), AudioError> {
            self.play_calls += 1;
            if self.refuse_play {
                return Err(AudioError::PlaybackBlocked("autoplay".to_string()));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn seek(&mut self, position: Duration) {
            self.position = Some(position);
        }
    }

    fn audio(device: DeviceClass) -> (ManualClock, AmbientAudio<RecordingSink>) {
        let clock = ManualClock::new();
        let audio = AmbientAudio::new(
            RecordingSink::default(),
            Arc::new(clock.clone()),
            AudioConfig::default(),
            device,
        );
        (clock, audio)
    }

    #[test]
    fn test_starts_silent_and_muted() {
        let (_clock, audio) = audio(DeviceClass::Desktop);
        assert!(audio.is_muted());
        assert!(!audio.has_started());
        assert!(audio.sink().muted);
        assert_eq!(audio.sink().volume, 0.0);
    }

    #[test]
    fn test_metadata_seeks_to_middle() {
        let (_clock, mut audio) = audio(DeviceClass::Desktop);
        audio.on_metadata_loaded(Duration::from_secs(180));
        assert_eq!(audio.sink().position, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_fade_in_reaches_desktop_target() {
        let (clock, mut audio) = audio(DeviceClass::Desktop);
        audio.start();
        assert!(audio.is_playing());
        assert!(!audio.is_muted());
        assert!(audio.is_fading());

        clock.advance(Duration::from_secs(3));
        audio.tick();
        let halfway = audio.sink().volume;
        assert!(halfway > 0.02 && halfway < 0.03);

        clock.advance(Duration::from_millis(3200));
        audio.tick();
        assert_eq!(audio.sink().volume, 0.05);
        assert!(!audio.is_fading());
    }

    #[test]
    fn test_fade_in_mobile_target() {
        let (clock, mut audio) = audio(DeviceClass::Mobile);
        audio.toggle_mute();
        clock.advance(Duration::from_secs(10));
        audio.tick();
        assert_eq!(audio.sink().volume, 0.075);
    }

    #[test]
    fn test_blocked_playback_stays_unstarted() {
        let clock = ManualClock::new();
        let sink = RecordingSink {
            refuse_play: true,
            ..RecordingSink::default()
        };
        let mut audio = AmbientAudio::new(
            sink,
            Arc::new(clock),
            AudioConfig::default(),
            DeviceClass::Desktop,
        );

        audio.toggle_play();
        assert!(!audio.has_started());
        assert!(!audio.is_playing());
        assert!(!audio.is_fading());

        // next gesture tries again
        audio.toggle_play();
        assert_eq!(audio.sink().play_calls, 2);
    }

    #[test]
    fn test_toggle_play_after_start() {
        let (_clock, mut audio) = audio(DeviceClass::Desktop);
        audio.toggle_play();
        assert!(audio.sink().playing);

        audio.toggle_play();
        assert!(!audio.is_playing());
        assert!(!audio.sink().playing);

        audio.start();
        assert!(audio.is_playing());
        assert!(audio.sink().playing);
    }

    #[test]
    fn test_unmute_resumes_paused_track() {
        let (_clock, mut audio) = audio(DeviceClass::Desktop);
        audio.start();
        audio.toggle_mute();
        assert!(audio.is_muted());
        audio.toggle_play();
        assert!(!audio.is_playing());

        audio.toggle_mute();
        assert!(!audio.is_muted());
        assert!(audio.is_playing());
        assert!(audio.sink().playing);
    }

    #[test]
    fn test_fade_steps_only_on_interval() {
        let mut fade = FadeIn::new(
            0.06,
            Duration::from_secs(6),
            Duration::from_millis(100),
            Duration::ZERO,
        );
        assert_eq!(fade.advance(Duration::from_millis(99)), None);
        let first = fade.advance(Duration::from_millis(100));
        assert!(first.is_some_and(|v| (v - 0.001).abs() < 1e-6));
        assert_eq!(fade.advance(Duration::from_millis(150)), None);
    }

    #[test]
    fn test_zero_interval_fade_jumps_to_target() {
        let mut fade = FadeIn::new(0.05, Duration::from_secs(6), Duration::ZERO, Duration::ZERO);
        assert_eq!(fade.advance(Duration::ZERO), Some(0.05));
        assert!(fade.is_complete());
    }

    #[test]
    fn test_shutdown_pauses() {
        let (_clock, mut audio) = audio(DeviceClass::Desktop);
        audio.start();
        audio.shutdown();
        assert!(!audio.sink().playing);
        assert!(!audio.has_started());
    }
}
