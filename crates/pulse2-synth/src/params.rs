//! Control-rate parameters of the voice.
//!
//! | Parameter | ID | Default | Range |
//! |-----------|----|---------|-------|
//! | Base frequency | `base_freq` | 440 Hz | 10 – 20000 Hz |
//! | Osc1 pulse width | `pulse_width` | 0.5 | 0.05 – 0.95 |
//! | Osc2 detune | `osc2_detune` | 0 ct | −100 – 100 ct |
//! | Osc1 gain | `osc1_gain` | 0.7 | 0 – 1 |
//! | Osc2 gain | `osc2_gain` | 0.55 | 0 – 1 |
//! | Sub gain | `sub_gain` | 0.35 | 0 – 1 |
//! | LFO pitch | `lfo_pitch` | 0 ct | −200 – 200 ct |
//!
//! A host supplies each parameter as a [`ParamInput`] per block. Leaving an
//! input empty selects the default.

use pulse2_core::{ParamDescriptor, ParamId, ParamInput};

const BASE_FREQ: ParamDescriptor =
    ParamDescriptor::frequency_hz("Base Frequency", "Freq", 10.0, 20000.0, 440.0)
        .with_id(ParamId(200), "base_freq");

const PULSE_WIDTH: ParamDescriptor =
    ParamDescriptor::fraction("Osc1 Pulse Width", "PW", 0.05, 0.95, 0.5)
        .with_id(ParamId(201), "pulse_width");

const OSC2_DETUNE: ParamDescriptor =
    ParamDescriptor::cents("Osc2 Detune", "Detune", -100.0, 100.0, 0.0)
        .with_id(ParamId(202), "osc2_detune");

const OSC1_GAIN: ParamDescriptor =
    ParamDescriptor::level("Osc1 Gain", "Gain1", 0.7).with_id(ParamId(203), "osc1_gain");

const OSC2_GAIN: ParamDescriptor =
    ParamDescriptor::level("Osc2 Gain", "Gain2", 0.55).with_id(ParamId(204), "osc2_gain");

const SUB_GAIN: ParamDescriptor =
    ParamDescriptor::level("Sub Gain", "Sub", 0.35).with_id(ParamId(205), "sub_gain");

const LFO_PITCH: ParamDescriptor =
    ParamDescriptor::cents("LFO Pitch", "LFO", -200.0, 200.0, 0.0)
        .with_id(ParamId(206), "lfo_pitch");

/// The seven control-rate inputs of the voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoiceParam {
    /// Base frequency in Hz
    BaseFrequency,
    /// Osc1 duty cycle (square waveform only)
    PulseWidth,
    /// Osc2 detune in cents
    Osc2Detune,
    /// Osc1 gain target
    Osc1Gain,
    /// Osc2 gain target
    Osc2Gain,
    /// Sub-oscillator gain target
    SubGain,
    /// Pitch modulation in cents, applied to both main oscillators
    LfoPitch,
}

impl VoiceParam {
    /// All parameters in ID order.
    pub const ALL: [VoiceParam; 7] = [
        VoiceParam::BaseFrequency,
        VoiceParam::PulseWidth,
        VoiceParam::Osc2Detune,
        VoiceParam::Osc1Gain,
        VoiceParam::Osc2Gain,
        VoiceParam::SubGain,
        VoiceParam::LfoPitch,
    ];

    /// Metadata for this parameter.
    pub const fn descriptor(self) -> &'static ParamDescriptor {
        match self {
            VoiceParam::BaseFrequency => &BASE_FREQ,
            VoiceParam::PulseWidth => &PULSE_WIDTH,
            VoiceParam::Osc2Detune => &OSC2_DETUNE,
            VoiceParam::Osc1Gain => &OSC1_GAIN,
            VoiceParam::Osc2Gain => &OSC2_GAIN,
            VoiceParam::SubGain => &SUB_GAIN,
            VoiceParam::LfoPitch => &LFO_PITCH,
        }
    }

    /// Look up a parameter by its string ID (e.g. `"osc1_gain"`).
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.descriptor().string_id == id)
    }
}

/// Every control-rate value resolved for one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamFrame {
    /// Base frequency in Hz
    pub base_freq: f32,
    /// Osc1 duty cycle
    pub pulse_width: f32,
    /// Osc2 detune in cents
    pub osc2_detune: f32,
    /// Osc1 gain target
    pub osc1_gain: f32,
    /// Osc2 gain target
    pub osc2_gain: f32,
    /// Sub gain target
    pub sub_gain: f32,
    /// LFO pitch modulation in cents
    pub lfo_pitch: f32,
}

impl Default for ParamFrame {
    fn default() -> Self {
        Self {
            base_freq: BASE_FREQ.default,
            pulse_width: PULSE_WIDTH.default,
            osc2_detune: OSC2_DETUNE.default,
            osc1_gain: OSC1_GAIN.default,
            osc2_gain: OSC2_GAIN.default,
            sub_gain: SUB_GAIN.default,
            lfo_pitch: LFO_PITCH.default,
        }
    }
}

/// One block of control-rate inputs.
///
/// Each field is a constant (one value) or a per-sample lane; empty fields
/// fall back to the parameter default.
///
/// ```rust
/// use pulse2_synth::{VoiceInputs, VoiceParam};
///
/// let lfo = [0.0, 50.0, 100.0];
/// let inputs = VoiceInputs::default()
///     .with(VoiceParam::BaseFrequency, &[220.0])
///     .with(VoiceParam::LfoPitch, &lfo);
///
/// let frame = inputs.frame_at(2);
/// assert_eq!(frame.base_freq, 220.0);
/// assert_eq!(frame.lfo_pitch, 100.0);
/// assert_eq!(frame.osc1_gain, 0.7);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoiceInputs<'a> {
    /// Base frequency in Hz
    pub base_freq: ParamInput<'a>,
    /// Osc1 duty cycle
    pub pulse_width: ParamInput<'a>,
    /// Osc2 detune in cents
    pub osc2_detune: ParamInput<'a>,
    /// Osc1 gain target
    pub osc1_gain: ParamInput<'a>,
    /// Osc2 gain target
    pub osc2_gain: ParamInput<'a>,
    /// Sub gain target
    pub sub_gain: ParamInput<'a>,
    /// LFO pitch modulation in cents
    pub lfo_pitch: ParamInput<'a>,
}

impl<'a> VoiceInputs<'a> {
    /// Replace one input, builder style.
    pub fn with(mut self, param: VoiceParam, values: &'a [f32]) -> Self {
        *self.input_mut(param) = ParamInput::new(values);
        self
    }

    /// The input bound to `param`.
    pub fn input(&self, param: VoiceParam) -> ParamInput<'a> {
        match param {
            VoiceParam::BaseFrequency => self.base_freq,
            VoiceParam::PulseWidth => self.pulse_width,
            VoiceParam::Osc2Detune => self.osc2_detune,
            VoiceParam::Osc1Gain => self.osc1_gain,
            VoiceParam::Osc2Gain => self.osc2_gain,
            VoiceParam::SubGain => self.sub_gain,
            VoiceParam::LfoPitch => self.lfo_pitch,
        }
    }

    /// Mutable access to the input bound to `param`.
    pub fn input_mut(&mut self, param: VoiceParam) -> &mut ParamInput<'a> {
        match param {
            VoiceParam::BaseFrequency => &mut self.base_freq,
            VoiceParam::PulseWidth => &mut self.pulse_width,
            VoiceParam::Osc2Detune => &mut self.osc2_detune,
            VoiceParam::Osc1Gain => &mut self.osc1_gain,
            VoiceParam::Osc2Gain => &mut self.osc2_gain,
            VoiceParam::SubGain => &mut self.sub_gain,
            VoiceParam::LfoPitch => &mut self.lfo_pitch,
        }
    }

    /// Resolve every parameter for sample `index`.
    #[inline]
    pub fn frame_at(&self, index: usize) -> ParamFrame {
        ParamFrame {
            base_freq: self.base_freq.value_at(index, &BASE_FREQ),
            pulse_width: self.pulse_width.value_at(index, &PULSE_WIDTH),
            osc2_detune: self.osc2_detune.value_at(index, &OSC2_DETUNE),
            osc1_gain: self.osc1_gain.value_at(index, &OSC1_GAIN),
            osc2_gain: self.osc2_gain.value_at(index, &OSC2_GAIN),
            sub_gain: self.sub_gain.value_at(index, &SUB_GAIN),
            lfo_pitch: self.lfo_pitch.value_at(index, &LFO_PITCH),
        }
    }
}
