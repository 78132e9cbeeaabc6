//! Control messages and render jobs for the pulse2 voice.
//!
//! This crate turns external configuration into the voice's typed inputs:
//!
//! - **Control messages**: JSON objects validated field by field into a
//!   [`ControlUpdate`](pulse2_synth::ControlUpdate), ready for the mailbox
//! - **Render jobs**: TOML files describing an offline render with constant
//!   parameters and a sample-accurate message timeline
//!
//! # Example
//!
//! ```rust
//! use pulse2_config::{RenderJob, parse_message};
//! use pulse2_synth::{VoiceEngine, VoiceParam};
//!
//! let job = RenderJob::from_toml(r#"
//! sample_rate = 48000
//! [params]
//! base_freq = 220.0
//! "#).unwrap();
//! assert_eq!(job.param(VoiceParam::BaseFrequency), Some(220.0));
//!
//! let mut voice = VoiceEngine::new(job.sample_rate as f32).unwrap();
//! let control = voice.connect_control();
//! let parsed = parse_message(r#"{"type": "setup", "ring": true}"#).unwrap();
//! control.post(parsed.update);
//! ```

mod error;
mod job;
mod message;

pub use error::{ConfigError, MessageError};
pub use job::{MAX_BLOCK_SIZE, RenderJob, ScheduledUpdate, TimedMessage, Timeline};
pub use message::{ParsedMessage, SETUP_TYPE, parse_message, parse_value, to_value};
