//! Time-varying scalar channels.
//!
//! An [`Animated`] value is owned by the entity it describes (an atom
//! coordinate, a bond's length multiplier) and is sampled on demand as a pure
//! function of time. Every channel declares a [`ValueRange`]; values are
//! clamped into it when written and when sampled.
//!
//! ```
//! use molviz_core::animation::{Animated, Keyframe, ValueRange};
//!
//! let mut x = Animated::new(0.0, ValueRange::new(-100.0, 100.0));
//! x.set_keyframes(vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 50.0)])
//!     .unwrap();
//! assert_eq!(x.sample(0.5), 25.0);
//! assert_eq!(x.sample(10.0), 50.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnimationError {
    #[error("keyframe track must contain at least one keyframe")]
    Empty,

    #[error("keyframe times must be finite and strictly increasing (at index {0})")]
    Unordered(usize),
}

/// Inclusive bounds for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    min: f32,
    max: f32,
}

impl ValueRange {
    pub const UNBOUNDED: Self = Self {
        min: f32::MIN,
        max: f32::MAX,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-limit, limit]`.
    pub const fn symmetric(limit: f32) -> Self {
        Self::new(-limit, limit)
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    pub fn clamp(self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    time: f32,
    value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }

    pub fn time(self) -> f32 {
        self.time
    }

    pub fn value(self) -> f32 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Track {
    Constant(f32),
    Keyframes(Vec<Keyframe>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animated {
    track: Track,
    range: ValueRange,
}

impl Animated {
    pub fn new(value: f32, range: ValueRange) -> Self {
        Self {
            track: Track::Constant(range.clamp(value)),
            range,
        }
    }

    pub fn unbounded(value: f32) -> Self {
        Self::new(value, ValueRange::UNBOUNDED)
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn is_animated(&self) -> bool {
        matches!(self.track, Track::Keyframes(_))
    }

    /// Replaces the channel with a constant, dropping any keyframes.
    pub fn set(&mut self, value: f32) {
        self.track = Track::Constant(self.range.clamp(value));
    }

    /// Replaces the channel with a piecewise-linear keyframe track.
    pub fn set_keyframes(&mut self, keyframes: Vec<Keyframe>) -> Result<(), AnimationError> {
        if keyframes.is_empty() {
            return Err(AnimationError::Empty);
        }
        for (index, frame) in keyframes.iter().enumerate() {
            if !frame.time.is_finite() {
                return Err(AnimationError::Unordered(index));
            }
            if index > 0 && frame.time <= keyframes[index - 1].time {
                return Err(AnimationError::Unordered(index));
            }
        }
        self.track = Track::Keyframes(keyframes);
        Ok(())
    }

    /// Value at time zero; for constants this is the constant itself.
    pub fn value(&self) -> f32 {
        self.sample(0.0)
    }

    /// Samples the channel at `time`, holding the first and last keyframe
    /// values outside the track.
    pub fn sample(&self, time: f32) -> f32 {
        let raw = match &self.track {
            Track::Constant(value) => *value,
            Track::Keyframes(frames) => interpolate(frames, time),
        };
        self.range.clamp(raw)
    }
}

fn interpolate(frames: &[Keyframe], time: f32) -> f32 {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return 0.0;
    };
    if time <= first.time {
        return first.value;
    }
    if time >= last.time {
        return last.value;
    }
    for pair in frames.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if time <= b.time {
            let t = (time - a.time) / (b.time - a.time);
            return a.value + (b.value - a.value) * t;
        }
    }
    last.value
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_constant_is_clamped() {
        let value = Animated::new(12.0, ValueRange::new(0.1, 5.0));
        assert_approx_eq!(f32, value.value(), 5.0);
        assert!(!value.is_animated());
    }

    #[test]
    fn test_set_clamps() {
        let mut value = Animated::new(0.0, ValueRange::symmetric(200.0));
        value.set(-350.0);
        assert_approx_eq!(f32, value.value(), -200.0);
    }

    #[test]
    fn test_keyframe_interpolation() {
        let mut value = Animated::unbounded(0.0);
        value
            .set_keyframes(vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(2.0, 10.0),
                Keyframe::new(4.0, 0.0),
            ])
            .unwrap();

        assert!(value.is_animated());
        assert_approx_eq!(f32, value.sample(-1.0), 0.0);
        assert_approx_eq!(f32, value.sample(1.0), 5.0);
        assert_approx_eq!(f32, value.sample(3.0), 5.0);
        assert_approx_eq!(f32, value.sample(9.0), 0.0);
    }

    #[test]
    fn test_keyframes_are_validated() {
        let mut value = Animated::unbounded(1.0);
        assert_eq!(value.set_keyframes(Vec::new()), Err(AnimationError::Empty));
        assert_eq!(
            value.set_keyframes(vec![Keyframe::new(1.0, 0.0), Keyframe::new(1.0, 2.0)]),
            Err(AnimationError::Unordered(1))
        );
        // A rejected track leaves the previous value in place.
        assert_approx_eq!(f32, value.value(), 1.0);
    }

    #[test]
    fn test_set_drops_keyframes() {
        let mut value = Animated::unbounded(0.0);
        value.set_keyframes(vec![Keyframe::new(0.0, 3.0)]).unwrap();
        value.set(7.0);
        assert!(!value.is_animated());
        assert_approx_eq!(f32, value.sample(100.0), 7.0);
    }

    proptest! {
        #[test]
        fn prop_sample_stays_in_range(a in -500.0f32..500.0, b in -500.0f32..500.0, t in -2.0f32..3.0) {
            let mut value = Animated::new(0.0, ValueRange::symmetric(200.0));
            value.set_keyframes(vec![Keyframe::new(0.0, a), Keyframe::new(1.0, b)]).unwrap();
            let sampled = value.sample(t);
            prop_assert!((-200.0..=200.0).contains(&sampled));
        }
    }
}
