//! Pulse2 Core - control-rate primitives for the pulse2 voice
//!
//! This crate provides the building blocks that sit between a host's
//! automation and the oscillators, designed for real-time audio processing
//! with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Control-Rate Inputs
//!
//! - [`ParamInput`] - One block of a parameter: a constant or a per-sample lane
//! - [`ParamDescriptor`] - Name, unit, range, and default of a parameter
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - One-pole exponential smoothing (5 ms for gains)
//!
//! ## Pitch
//!
//! - [`semitones_to_ratio`] / [`cents_to_ratio`] - Offsets to frequency ratios
//! - [`clamp_frequency`] - Saturate to the 10 Hz – 20 kHz oscillator band
//! - [`Lfo`] - Fills pitch-modulation lanes on the host side
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pulse2-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use pulse2_core::{ParamDescriptor, ParamInput, SmoothedParam};
//!
//! let desc = ParamDescriptor::level("Osc1 Gain", "Gain1", 0.7);
//! let lane = [0.0, 0.25, 0.5, 1.0];
//! let input = ParamInput::new(&lane);
//!
//! let mut gain = SmoothedParam::gain(desc.default, 48000.0);
//! for i in 0..lane.len() {
//!     let g = gain.update(input.value_at(i, &desc));
//!     assert!((0.0..=1.0).contains(&g));
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Total functions**: Bad host input degrades to defaults, never panics

#![cfg_attr(not(feature = "std"), no_std)]

pub mod automation;
pub mod lfo;
pub mod math;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use automation::ParamInput;
pub use lfo::{Lfo, LfoWaveform};
pub use math::{
    MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ, cents_to_ratio, clamp_frequency, semitones_to_ratio,
};
pub use param::{GAIN_SMOOTHING_MS, SmoothedParam};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit};
