//! Shared CLI helpers used across multiple commands.

use clap::ValueEnum;
use pulse2_core::LfoWaveform;
use pulse2_synth::{VoiceParam, Waveform};

/// Oscillator waveforms selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliWaveform {
    /// Band-limited sawtooth
    Saw,
    /// Band-limited square (osc1 honours the pulse width)
    Square,
    /// Naive triangle
    Triangle,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Saw => Waveform::Saw,
            CliWaveform::Square => Waveform::Square,
            CliWaveform::Triangle => Waveform::Triangle,
        }
    }
}

/// Pitch LFO shapes selectable on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliLfoShape {
    /// Vibrato
    #[default]
    Sine,
    /// Linear siren
    Triangle,
    /// Rising ramp
    Saw,
    /// Two-pitch trill
    Square,
}

impl From<CliLfoShape> for LfoWaveform {
    fn from(shape: CliLfoShape) -> Self {
        match shape {
            CliLfoShape::Sine => LfoWaveform::Sine,
            CliLfoShape::Triangle => LfoWaveform::Triangle,
            CliLfoShape::Saw => LfoWaveform::Saw,
            CliLfoShape::Square => LfoWaveform::Square,
        }
    }
}

/// Parse a `param=value` string for clap's `value_parser`.
///
/// The key must be a parameter string ID such as `osc1_gain`.
pub fn parse_param(s: &str) -> Result<(VoiceParam, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected name=value)"))?;
    let param = VoiceParam::from_string_id(key.trim()).ok_or_else(|| {
        format!("Unknown parameter '{key}'. Use 'pulse2 params' to list parameters.")
    })?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("Invalid value for '{key}': {e}"))?;
    Ok((param, value))
}

/// Format a linear peak value as dBFS.
pub fn peak_db(peak: f32) -> f32 {
    if peak > 0.0 {
        20.0 * peak.log10()
    } else {
        f32::NEG_INFINITY
    }
}
