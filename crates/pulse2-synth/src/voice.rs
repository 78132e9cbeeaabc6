//! The pulse2 voice: three oscillators, gain smoothing, and the mixer.
//!
//! ## Signal Flow
//!
//! ```text
//!            ┌─ osc1 (saw/square/tri, PW) ─ g1 ─┐
//! base_freq ─┼─ osc2 (saw/square/tri)     ─ g2 ─┼─ mix ─ ×0.42 ─► out
//!            └─ sub  (½·base, naive square) ─ gSub ┘
//! ```
//!
//! ## Per-Block Order
//!
//! 1. Apply at most one pending [`ControlUpdate`] (mailbox or direct).
//! 2. For every sample: resolve the [`ParamFrame`], derive and clamp the three
//!    frequencies, advance the accumulators (osc1, osc2, then sub), apply hard
//!    sync, evaluate the waveforms at the pre-advance phases, smooth the gains,
//!    and mix.
//!
//! Rendering never allocates or blocks, and always fills the whole
//! output slice with finite samples.

use pulse2_core::{
    MAX_FREQUENCY_HZ, SmoothedParam, cents_to_ratio, clamp_frequency, semitones_to_ratio,
};

use crate::control::{ControlState, ControlUpdate};
use crate::mixer::{Channels, mix};
use crate::oscillator::{PhaseAccumulator, naive_square};
use crate::params::{ParamFrame, VoiceInputs, VoiceParam};

#[cfg(feature = "std")]
use crate::mailbox::{ControlReceiver, ControlSender, control_channel};

/// Errors from constructing a [`VoiceEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// Sample rate was not finite, not positive, or so small that a phase
    /// increment would overflow.
    InvalidSampleRate(f32),
}

#[cfg(feature = "std")]
impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => {
                write!(f, "sample rate must be positive and finite, got {sr}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Semitone ratios cached for one block; they only change with the control state.
#[derive(Clone, Copy, Debug)]
struct BlockPitch {
    osc1_ratio: f32,
    osc2_ratio: f32,
}

impl BlockPitch {
    fn new(control: &ControlState) -> Self {
        Self {
            osc1_ratio: semitones_to_ratio(control.osc1_semitones),
            osc2_ratio: semitones_to_ratio(control.osc2_semitones),
        }
    }
}

/// A single monophonic voice.
///
/// # Example
///
/// ```rust
/// use pulse2_synth::{VoiceEngine, VoiceInputs, VoiceParam};
///
/// let mut voice = VoiceEngine::new(48000.0).unwrap();
/// let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[110.0]);
///
/// let mut block = [0.0f32; 128];
/// voice.render(&inputs, &mut block);
/// assert!(block.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug)]
pub struct VoiceEngine {
    sample_rate: f32,
    osc1: PhaseAccumulator,
    osc2: PhaseAccumulator,
    sub: PhaseAccumulator,
    gain1: SmoothedParam,
    gain2: SmoothedParam,
    gain_sub: SmoothedParam,
    control: ControlState,
    #[cfg(feature = "std")]
    mailbox: Option<ControlReceiver>,
}

impl VoiceEngine {
    /// Create a voice with default control state, phases at 0, and gains
    /// already settled at their parameter defaults.
    pub fn new(sample_rate: f32) -> Result<Self, EngineError> {
        if !(sample_rate.is_finite()
            && sample_rate > 0.0
            && (MAX_FREQUENCY_HZ / sample_rate).is_finite())
        {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            sample_rate,
            osc1: PhaseAccumulator::new(),
            osc2: PhaseAccumulator::new(),
            sub: PhaseAccumulator::new(),
            gain1: SmoothedParam::gain(VoiceParam::Osc1Gain.descriptor().default, sample_rate),
            gain2: SmoothedParam::gain(VoiceParam::Osc2Gain.descriptor().default, sample_rate),
            gain_sub: SmoothedParam::gain(VoiceParam::SubGain.descriptor().default, sample_rate),
            control: ControlState::default(),
            #[cfg(feature = "std")]
            mailbox: None,
        })
    }

    /// Sample rate in Hz, fixed at construction.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current block-rate configuration.
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Apply an update directly. Call between blocks, never during [`render`](Self::render).
    pub fn apply_update(&mut self, update: &ControlUpdate) {
        self.control.apply(update);
    }

    /// Open a mailbox for a control thread and return its sending half.
    ///
    /// Replaces any earlier mailbox; updates still queued there are dropped.
    #[cfg(feature = "std")]
    pub fn connect_control(&mut self) -> ControlSender {
        let (tx, rx) = control_channel();
        self.mailbox = Some(rx);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = self.sample_rate, "control mailbox connected");

        tx
    }

    /// Current phases of osc1, osc2, and sub, each in `[0, 1)`.
    pub fn phases(&self) -> Channels {
        Channels::new(self.osc1.phase(), self.osc2.phase(), self.sub.phase())
    }

    /// Current smoothed gains of osc1, osc2, and sub.
    pub fn gains(&self) -> Channels {
        Channels::new(self.gain1.get(), self.gain2.get(), self.gain_sub.get())
    }

    /// Snap the smoothed gains without a ramp. Values are clamped to `[0, 1]`.
    pub fn set_gains_immediate(&mut self, gains: Channels) {
        self.gain1
            .set_immediate(VoiceParam::Osc1Gain.descriptor().sanitize(gains.osc1));
        self.gain2
            .set_immediate(VoiceParam::Osc2Gain.descriptor().sanitize(gains.osc2));
        self.gain_sub
            .set_immediate(VoiceParam::SubGain.descriptor().sanitize(gains.sub));
    }

    /// Return phases to 0 and gains to their defaults. Control state is kept.
    pub fn reset(&mut self) {
        self.osc1.reset();
        self.osc2.reset();
        self.sub.reset();
        self.set_gains_immediate(Channels::new(
            VoiceParam::Osc1Gain.descriptor().default,
            VoiceParam::Osc2Gain.descriptor().default,
            VoiceParam::SubGain.descriptor().default,
        ));
    }

    /// Render one block.
    ///
    /// `output.len()` is the block size; every input is resolved per index.
    pub fn render(&mut self, inputs: &VoiceInputs<'_>, output: &mut [f32]) {
        self.poll_mailbox();

        let pitch = BlockPitch::new(&self.control);
        for (i, out) in output.iter_mut().enumerate() {
            let frame = inputs.frame_at(i);
            *out = self.tick(&frame, pitch);
        }
    }

    /// Render one sample from an already resolved frame.
    ///
    /// Does not poll the mailbox; use [`render`](Self::render) for block
    /// processing.
    pub fn process(&mut self, frame: &ParamFrame) -> f32 {
        let pitch = BlockPitch::new(&self.control);
        self.tick(frame, pitch)
    }

    /// Apply at most one pending mailbox update.
    #[cfg(feature = "std")]
    fn poll_mailbox(&mut self) {
        if let Some(update) = self.mailbox.as_ref().and_then(ControlReceiver::take) {
            self.control.apply(&update);
        }
    }

    #[cfg(not(feature = "std"))]
    fn poll_mailbox(&mut self) {}

    #[inline]
    fn tick(&mut self, frame: &ParamFrame, pitch: BlockPitch) -> f32 {
        let sr = self.sample_rate;
        let lfo = cents_to_ratio(frame.lfo_pitch);

        let freq1 = clamp_frequency(frame.base_freq * pitch.osc1_ratio * lfo);
        let freq2 = clamp_frequency(
            frame.base_freq * pitch.osc2_ratio * cents_to_ratio(frame.osc2_detune) * lfo,
        );
        // Tracks the base frequency only
        let freq_sub = clamp_frequency(frame.base_freq * 0.5);

        let dt1 = freq1 / sr;
        let dt2 = freq2 / sr;

        let (phase1, wrapped1) = self.osc1.advance_by(dt1);
        let (phase2, _) = self.osc2.advance_by(dt2);
        // Reset after osc2's own advance so its phase reads exactly 0 on the wrap sample
        if wrapped1 && self.control.sync {
            self.osc2.reset();
        }
        let (phase_sub, _) = self.sub.advance_by(freq_sub / sr);

        let samples = Channels::new(
            self.control
                .osc1_kind
                .sample_with_duty(phase1, dt1, frame.pulse_width),
            self.control.osc2_kind.sample(phase2, dt2),
            naive_square(phase_sub),
        );

        // Smoothed in both mix modes so ring mode keeps its ramps
        let gains = Channels::new(
            self.gain1.update(frame.osc1_gain),
            self.gain2.update(frame.osc2_gain),
            self.gain_sub.update(frame.sub_gain),
        );

        mix(samples, gains, self.control.mix_mode())
    }
}
