//! Low-frequency oscillator for pitch automation lanes.
//!
//! The voice itself has no LFO: pitch modulation arrives as a per-sample
//! automation lane in cents. [`Lfo`] is the producer side of that contract.
//! A host (or the offline renderer) fills the lane for each block with
//! [`Lfo::fill_cents`] and hands it to the voice.

use core::f32::consts::TAU;
use libm::{fabsf, floorf, sinf};

/// Shape of the pitch sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LfoWaveform {
    /// Vibrato
    #[default]
    Sine,
    /// Linear up/down siren
    Triangle,
    /// Rising ramp that drops back each cycle
    Saw,
    /// Trill between two pitches
    Square,
}

impl LfoWaveform {
    /// Bipolar value in `[-1, 1]` at `phase` in `[0, 1)`.
    #[inline]
    fn at(self, phase: f32) -> f32 {
        match self {
            LfoWaveform::Sine => sinf(phase * TAU),
            LfoWaveform::Triangle => 1.0 - 4.0 * fabsf(phase - 0.5),
            LfoWaveform::Saw => 2.0 * phase - 1.0,
            LfoWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Free-running LFO that writes cents lanes, continuing its phase across
/// blocks.
///
/// # Example
///
/// ```rust
/// use pulse2_core::{Lfo, LfoWaveform};
///
/// let mut lfo = Lfo::new(48000.0, 5.0).with_waveform(LfoWaveform::Triangle);
///
/// let mut lane = [0.0f32; 128];
/// lfo.fill_cents(&mut lane, 50.0);
/// assert!(lane.iter().all(|c| c.abs() <= 50.0));
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Position in the cycle, `[0, 1)`
    phase: f32,
    /// Cycles per sample
    inc: f32,
    waveform: LfoWaveform,
}

impl Lfo {
    /// Sine LFO at `rate_hz`.
    ///
    /// Non-finite or negative rates produce a static lane.
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        let inc = rate_hz / sample_rate;
        Self {
            phase: 0.0,
            inc: if inc.is_finite() && inc > 0.0 { inc } else { 0.0 },
            waveform: LfoWaveform::Sine,
        }
    }

    /// Select the sweep shape, builder style.
    pub fn with_waveform(mut self, waveform: LfoWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Next bipolar value in `[-1, 1]`.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let value = self.waveform.at(self.phase);
        self.phase += self.inc;
        if self.phase >= 1.0 {
            self.phase -= floorf(self.phase);
        }
        value
    }

    /// Write one pitch-modulation lane: `depth_cents * next()` per sample.
    pub fn fill_cents(&mut self, lane: &mut [f32], depth_cents: f32) {
        for cents in lane.iter_mut() {
            *cents = depth_cents * self.next();
        }
    }
}
