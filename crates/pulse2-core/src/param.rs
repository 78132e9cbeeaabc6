//! One-pole parameter smoothing for zipper-free gain changes.
//!
//! Gain targets can jump from one sample to the next when a host automates
//! them. Multiplying audio by a stepped gain produces audible "zipper noise",
//! so every gain passes through a [`SmoothedParam`] before it reaches the mix.
//!
//! ## Response
//!
//! The smoother is a first-order exponential lowpass:
//!
//! ```text
//! y[n] = a * y[n-1] + (1 - a) * target[n]
//! a    = exp(-1 / (tau * sample_rate))
//! ```
//!
//! With `tau = 5 ms` a step settles to 63% in 5 ms and to 99% in ~23 ms,
//! which is fast enough to feel immediate and slow enough to hide the step.
//!
//! ## Usage
//!
//! ```rust
//! use pulse2_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::with_config(0.0, 48000.0, 5.0);
//!
//! // In the audio callback, feed the per-sample target and use the result
//! for _ in 0..240 {
//!     let smoothed = gain.update(1.0);
//!     assert!(smoothed <= 1.0);
//! }
//! assert!(gain.get() > 0.6);
//! ```

use libm::expf;

/// Default gain smoothing time constant in milliseconds.
pub const GAIN_SMOOTHING_MS: f32 = 5.0;

/// A parameter with one-pole exponential smoothing.
///
/// Unlike a stored-target smoother, the target is supplied on every call to
/// [`update`](Self::update), which matches control-rate automation where each
/// sample can carry a different target.
///
/// # Invariants
///
/// - `pole` is in `[0, 1)`: `0` means no smoothing, values near `1` are slow
/// - For a constant target the output approaches it monotonically and never
///   crosses it
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Feedback coefficient `a = exp(-1 / (tau * sr))`
    pole: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Smoothing time constant in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter with no smoothing (instant changes).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            pole: 0.0,
            sample_rate: 48000.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    ///
    /// # Arguments
    /// * `initial` - Initial smoothed value
    /// * `sample_rate` - Sample rate in Hz
    /// * `smoothing_time_ms` - Time constant in milliseconds
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_pole();
        param
    }

    /// Create a gain smoother with the standard 5 ms time constant.
    pub fn gain(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, GAIN_SMOOTHING_MS)
    }

    /// Move one sample toward `target` and return the new smoothed value.
    ///
    /// Written as `y + (1 - a) * (target - y)`, which is algebraically
    /// `a * y + (1 - a) * target` but leaves `y` bit-exact once it equals
    /// the target.
    #[inline]
    pub fn update(&mut self, target: f32) -> f32 {
        self.current += (1.0 - self.pole) * (target - self.current);
        self.current
    }

    /// Jump straight to `value` without smoothing.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The feedback coefficient `a`.
    #[inline]
    pub fn pole(&self) -> f32 {
        self.pole
    }

    /// Sample rate the coefficient was derived from.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Recompute `a = exp(-1 / (tau * sample_rate))`.
    ///
    /// A zero time constant (or a degenerate sample rate) disables smoothing.
    fn recalculate_pole(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.pole = 0.0;
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.pole = expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
