//! Pitch math for oscillator frequency derivation.
//!
//! All pitch offsets are expressed as frequency ratios:
//!
//! | Offset | Ratio |
//! |--------|-------|
//! | `n` semitones | `2^(n/12)` |
//! | `c` cents | `2^(c/1200)` |
//!
//! Every derived oscillator frequency passes through [`clamp_frequency`] so
//! extreme offset combinations saturate at the audible band edges instead of
//! producing runaway phase increments.

use libm::powf;

/// Lowest frequency an oscillator will run at, in Hz.
pub const MIN_FREQUENCY_HZ: f32 = 10.0;

/// Highest frequency an oscillator will run at, in Hz.
pub const MAX_FREQUENCY_HZ: f32 = 20000.0;

/// Convert a semitone offset to a frequency ratio.
///
/// # Example
/// ```rust
/// use pulse2_core::semitones_to_ratio;
///
/// assert!((semitones_to_ratio(12) - 2.0).abs() < 1e-6);
/// assert!((semitones_to_ratio(-12) - 0.5).abs() < 1e-6);
/// assert_eq!(semitones_to_ratio(0), 1.0);
/// ```
#[inline]
pub fn semitones_to_ratio(semitones: i32) -> f32 {
    powf(2.0, semitones as f32 / 12.0)
}

/// Convert cents to a frequency ratio.
///
/// 100 cents = 1 semitone.
#[inline]
pub fn cents_to_ratio(cents: f32) -> f32 {
    powf(2.0, cents / 1200.0)
}

/// Clamp a frequency into `[MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ]`.
///
/// NaN maps to the lower bound so the result is always finite.
#[inline]
pub fn clamp_frequency(freq_hz: f32) -> f32 {
    if freq_hz >= MAX_FREQUENCY_HZ {
        MAX_FREQUENCY_HZ
    } else if freq_hz > MIN_FREQUENCY_HZ {
        freq_hz
    } else {
        MIN_FREQUENCY_HZ
    }
}
