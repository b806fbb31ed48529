//! Time-based tween for programmatic scroll transitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curve applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out, the usual default of web tweening libraries
    #[default]
    Power1Out,
    SmoothStep,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Interpolation between two offsets over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }

    /// Offset at time `now`; exactly `to` once the tween is done
    pub fn sample(&self, now: Duration) -> f64 {
        if self.is_done(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::Power1Out, Easing::SmoothStep] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!(Easing::Power1Out.apply(0.5) > 0.5);
    }

    #[test]
    fn test_sample_progression() {
        let tween = Tween::new(
            0.0,
            800.0,
            Duration::from_millis(100),
            Duration::from_secs(1),
            Easing::Linear,
        );

        assert_eq!(tween.sample(Duration::ZERO), 0.0);
        assert_eq!(tween.sample(Duration::from_millis(600)), 400.0);
        assert!(!tween.is_done(Duration::from_millis(1099)));
        assert!(tween.is_done(Duration::from_millis(1100)));
        assert_eq!(tween.sample(Duration::from_secs(5)), 800.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let tween = Tween::new(10.0, 20.0, Duration::ZERO, Duration::ZERO, Easing::Linear);
        assert!(tween.is_done(Duration::ZERO));
        assert_eq!(tween.sample(Duration::ZERO), 20.0);
    }
}
