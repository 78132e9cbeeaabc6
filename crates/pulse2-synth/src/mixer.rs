//! Voice mixer: additive or ring modulation, then fixed headroom.
//!
//! ```text
//! additive:  core = g1·s1 + g2·s2 + gSub·sSub
//! ring:      core = s1·s2          + gSub·sSub
//! output   = HEADROOM · core
//! ```
//!
//! Ring mode bypasses the two main gains: the product alone defines the
//! amplitude. The sub-oscillator is always summed and always gain-controlled.

/// Fixed attenuation applied to every mixed sample.
///
/// Three full-scale oscillators at default gains would clip without it.
/// It is a build-time constant; no runtime parameter scales it.
pub const HEADROOM: f32 = 0.42;

/// How the two main oscillators are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MixMode {
    /// Gain-weighted sum of both oscillators.
    #[default]
    Additive,
    /// Product of both oscillators, main gains ignored.
    Ring,
}

/// One value per oscillator channel: used for both raw samples and gains.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Channels {
    /// Main oscillator 1
    pub osc1: f32,
    /// Main oscillator 2
    pub osc2: f32,
    /// Sub-oscillator
    pub sub: f32,
}

impl Channels {
    /// Bundle three per-channel values.
    pub const fn new(osc1: f32, osc2: f32, sub: f32) -> Self {
        Self { osc1, osc2, sub }
    }
}

/// Mix one sample.
///
/// # Example
///
/// ```rust
/// use pulse2_synth::{Channels, HEADROOM, MixMode, mix};
///
/// let samples = Channels::new(0.5, -0.5, 1.0);
/// let gains = Channels::new(1.0, 1.0, 0.0);
///
/// assert_eq!(mix(samples, gains, MixMode::Additive), 0.0);
/// assert_eq!(mix(samples, gains, MixMode::Ring), HEADROOM * -0.25);
/// ```
#[inline]
pub fn mix(samples: Channels, gains: Channels, mode: MixMode) -> f32 {
    let mut core = match mode {
        MixMode::Ring => samples.osc1 * samples.osc2,
        MixMode::Additive => gains.osc1 * samples.osc1 + gains.osc2 * samples.osc2,
    };
    core += gains.sub * samples.sub;
    HEADROOM * core
}
