//! Pulse2 Synth - the pulse2 monophonic voice
//!
//! A per-sample voice built from two band-limited main oscillators and a
//! sub-oscillator, mixed additively or by ring modulation, with live
//! control-rate automation and a lock-free configuration mailbox.
//!
//! # Core Components
//!
//! ## Oscillators
//!
//! - [`PhaseAccumulator`] - Phase in `[0, 1)` advanced by `freq / sample_rate`
//! - [`Waveform`] - Saw, square (with pulse width), and triangle with PolyBLEP
//!   anti-aliasing
//!
//! ## Mixing
//!
//! - [`mix`] / [`MixMode`] - Additive or ring mix plus sub, scaled by [`HEADROOM`]
//!
//! ## Control
//!
//! - [`VoiceParam`] / [`VoiceInputs`] - The seven control-rate inputs
//! - [`ControlState`] / [`ControlUpdate`] - Block-rate configuration and
//!   sparse updates
//! - [`control_channel`] - One-slot mailbox from a control thread (`std` only)
//!
//! ## Voice
//!
//! - [`VoiceEngine`] - Owns all voice state and renders blocks
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! pulse2-synth = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std` there is no mailbox; apply updates between blocks with
//! [`VoiceEngine::apply_update`].
//!
//! # Example
//!
//! ```rust
//! use pulse2_synth::{ControlUpdate, VoiceEngine, VoiceInputs, VoiceParam, Waveform};
//!
//! let mut voice = VoiceEngine::new(48000.0).unwrap();
//! let control = voice.connect_control();
//!
//! // From the control thread
//! control.post(ControlUpdate {
//!     osc1_kind: Some(Waveform::Square),
//!     osc2_semitones: Some(-12),
//!     ..ControlUpdate::default()
//! });
//!
//! // In the audio callback
//! let pw = [0.25f32];
//! let inputs = VoiceInputs::default()
//!     .with(VoiceParam::BaseFrequency, &[220.0])
//!     .with(VoiceParam::PulseWidth, &pw);
//! let mut block = vec![0.0f32; 256];
//! voice.render(&inputs, &mut block);
//!
//! assert_eq!(voice.control().osc1_kind, Waveform::Square);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod control;
#[cfg(feature = "std")]
pub mod mailbox;
pub mod mixer;
pub mod oscillator;
pub mod params;
pub mod voice;

// Re-export main types at crate root
pub use control::{ControlState, ControlUpdate, DEFAULT_OSC2_SEMITONES};
#[cfg(feature = "std")]
pub use mailbox::{ControlReceiver, ControlSender, Posted, control_channel};
pub use mixer::{Channels, HEADROOM, MixMode, mix};
pub use oscillator::{PhaseAccumulator, Waveform, naive_square, poly_blep};
pub use params::{ParamFrame, VoiceInputs, VoiceParam};
pub use voice::{EngineError, VoiceEngine};

// Re-export commonly used types from pulse2-core
pub use pulse2_core::{ParamDescriptor, ParamInput};
