//! Phase accumulators and band-limited waveforms.
//!
//! Oscillators are split into two halves:
//!
//! - [`PhaseAccumulator`] owns the only state: a phase in `[0, 1)` advanced
//!   by `freq / sample_rate` each sample.
//! - [`Waveform::sample`] is a pure function of `(phase, dt)` that applies
//!   PolyBLEP (Polynomial Band-Limited Step) corrections at discontinuities.
//!
//! Keeping the waveform stateless means the same phase always produces the
//! same sample, which makes hard sync and block splitting trivially exact.

use libm::floorf;

/// Main oscillator waveform types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Sawtooth waveform: all harmonics, bright timbre.
    #[default]
    Saw,
    /// Square / pulse waveform: odd harmonics at 50% duty.
    Square,
    /// Triangle waveform: weak odd harmonics, soft timbre.
    Triangle,
}

impl Waveform {
    /// All waveforms in declaration order.
    pub const ALL: [Waveform; 3] = [Waveform::Saw, Waveform::Square, Waveform::Triangle];

    /// Lower-case name used in configuration messages.
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Saw => "saw",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }

    /// Parse a waveform name (case-insensitive).
    ///
    /// ```rust
    /// use pulse2_synth::Waveform;
    ///
    /// assert_eq!(Waveform::from_name("Square"), Some(Waveform::Square));
    /// assert_eq!(Waveform::from_name("sine"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(name))
    }

    /// Band-limited sample at `phase` with the square at 50% duty.
    ///
    /// # Arguments
    /// * `phase` - Phase position in [0.0, 1.0)
    /// * `dt` - Phase increment per sample (`freq / sample_rate`)
    #[inline]
    pub fn sample(self, phase: f32, dt: f32) -> f32 {
        self.sample_with_duty(phase, dt, 0.5)
    }

    /// Band-limited sample at `phase`; `duty` applies to [`Waveform::Square`] only.
    ///
    /// - **Saw**: `2·phase − 1`, PolyBLEP subtracted at the wrap.
    /// - **Square**: `±1`, PolyBLEP added at the rising edge (phase 0) and
    ///   subtracted at the falling edge (phase = duty).
    /// - **Triangle**: `4·|phase − 0.5| − 1`; continuous, so no correction.
    #[inline]
    pub fn sample_with_duty(self, phase: f32, dt: f32, duty: f32) -> f32 {
        match self {
            Waveform::Saw => 2.0 * phase - 1.0 - poly_blep(phase, dt),
            Waveform::Square => pulse(phase, dt, duty),
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        }
    }
}

/// Naive 50% square used by the sub-oscillator: `+1` below half phase, else `−1`.
#[inline]
pub fn naive_square(phase: f32) -> f32 {
    if phase < 0.5 { 1.0 } else { -1.0 }
}

#[inline]
fn pulse(phase: f32, dt: f32, duty: f32) -> f32 {
    let naive = if phase < duty { 1.0 } else { -1.0 };

    // Rising edge at phase 0, falling edge at phase = duty
    let rising = poly_blep(phase, dt);
    let falling = poly_blep(wrap_unit(phase - duty + 1.0), dt);

    naive + rising - falling
}

/// Fractional part for values that may sit at or above 1.
#[inline]
fn wrap_unit(x: f32) -> f32 {
    let r = x - floorf(x);
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if r >= 1.0 { 0.0 } else { r }
}

/// 2nd-order PolyBLEP correction.
///
/// Softens a step discontinuity over one sample on each side of the edge.
/// `t` is the phase measured from the edge and `dt` the phase increment per
/// sample.
///
/// - `t < dt` (just after the edge): `x = t/dt`, `x + x − 1 − x²`
/// - `t > 1 − dt` (just before the edge): `x = (t − 1)/dt`, `x² + x + 1`
/// - otherwise `0`, so the naive waveform is returned untouched
///
/// The pre-edge branch is `x² + x + 1` rather than the textbook
/// `(x + 1)²`; the voice's timbre is defined by this exact curve.
///
/// Reference: Välimäki & Huovilainen, "Antialiasing Oscillators in
/// Subtractive Synthesis", IEEE Signal Processing Magazine, 2007.
#[inline]
pub fn poly_blep(t: f32, dt: f32) -> f32 {
    if t < dt {
        let x = t / dt;
        x + x - 1.0 - x * x
    } else if t > 1.0 - dt {
        let x = (t - 1.0) / dt;
        x * x + x + 1.0
    } else {
        0.0
    }
}

/// Phase accumulator for one oscillator.
///
/// # Example
///
/// ```rust
/// use pulse2_synth::PhaseAccumulator;
///
/// let mut acc = PhaseAccumulator::new();
/// let (before, wrapped) = acc.advance(12000.0, 48000.0);
/// assert_eq!(before, 0.0);
/// assert!(!wrapped);
/// assert_eq!(acc.phase(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhaseAccumulator {
    /// Current phase position [0.0, 1.0)
    phase: f32,
}

impl PhaseAccumulator {
    /// Accumulator starting at phase 0.
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advance by `freq / sample_rate`.
    ///
    /// Returns the phase *before* the advance, which is the phase the caller
    /// renders for this sample, and whether the accumulator wrapped.
    #[inline]
    pub fn advance(&mut self, freq: f32, sample_rate: f32) -> (f32, bool) {
        self.advance_by(freq / sample_rate)
    }

    /// Advance by a precomputed increment. See [`advance`](Self::advance).
    #[inline]
    ///
    /// A non-finite increment counts as a wrap and returns the phase to 0.
    pub fn advance_by(&mut self, inc: f32) -> (f32, bool) {
        let before = self.phase;
        if !inc.is_finite() {
            self.phase = 0.0;
            return (before, true);
        }
        self.phase += inc;
        let wrapped = self.phase >= 1.0;
        if wrapped {
            self.phase -= 1.0;
            // Only reachable when inc >= 1 (sample rates below 2x the top frequency)
            if self.phase >= 1.0 {
                self.phase = wrap_unit(self.phase);
            }
        }
        (before, wrapped)
    }

    /// Hard sync: force the phase back to 0.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Current phase in [0.0, 1.0).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
