//! Offline render job files.
//!
//! A render job describes a complete offline render: the stream format, the
//! constant control-rate parameter values, and a timeline of control
//! messages delivered at block boundaries.
//!
//! # TOML Format
//!
//! ```toml
//! sample_rate = 48000
//! block_size = 128
//! duration_secs = 2.0
//!
//! [params]
//! base_freq = 110.0
//! osc1_gain = 0.8
//! pulse_width = 0.3
//!
//! [[messages]]
//! at_sample = 0
//! message = { osc1Type = "square", osc2Semi = -12 }
//!
//! [[messages]]
//! at_sample = 48000
//! message = { sync12 = true }
//! ```
//!
//! Parameter keys are the string IDs of [`VoiceParam`]. Timing is in
//! samples only; a message takes effect at the start of the first block
//! that contains its `at_sample`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use pulse2_synth::{ControlUpdate, VoiceParam};

use crate::error::ConfigError;
use crate::message::parse_value;

/// Largest block a job may request.
pub const MAX_BLOCK_SIZE: usize = 8192;

/// A control message scheduled at a sample index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimedMessage {
    /// Sample index at which the message is due.
    pub at_sample: u64,
    /// Message payload, same shape as a JSON control message.
    pub message: serde_json::Value,
}

/// A validated message ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledUpdate {
    /// Sample index at which the update is due.
    pub at_sample: u64,
    /// The fields that passed validation.
    pub update: ControlUpdate,
    /// Keys that were present but unusable.
    pub rejected: Vec<String>,
}

/// Offline render description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderJob {
    /// Output sample rate in Hz (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Samples per render call (defaults to 128).
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Length of the render in seconds (defaults to 2.0).
    #[serde(default = "default_duration")]
    pub duration_secs: f32,

    /// Constant parameter values keyed by parameter string ID.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,

    /// Control messages in any order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<TimedMessage>,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_block_size() -> usize {
    128
}

fn default_duration() -> f32 {
    2.0
}

impl Default for RenderJob {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            duration_secs: default_duration(),
            params: BTreeMap::new(),
            messages: Vec::new(),
        }
    }
}

impl RenderJob {
    /// Set a constant parameter value.
    pub fn with_param(mut self, param: VoiceParam, value: f32) -> Self {
        self.params
            .insert(param.descriptor().string_id.to_string(), value);
        self
    }

    /// Schedule a control message.
    pub fn with_message(mut self, at_sample: u64, update: &ControlUpdate) -> Self {
        self.messages.push(TimedMessage {
            at_sample,
            message: crate::message::to_value(update),
        });
        self
    }

    /// Load and validate a job from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a job from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let job: RenderJob = toml::from_str(toml_str)?;
        job.validate()?;
        Ok(job)
    }

    /// Save the job to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the job to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the stream settings and parameter keys.
    ///
    /// Parameter values themselves are not range-checked here; the voice
    /// clamps them when it resolves them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidJob("sample rate must be positive".into()));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidJob(format!(
                "block size must be 1..={MAX_BLOCK_SIZE}, got {}",
                self.block_size
            )));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(ConfigError::InvalidJob(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration_secs
            )));
        }
        if let Some(key) = self
            .params
            .keys()
            .find(|k| VoiceParam::from_string_id(k).is_none())
        {
            return Err(ConfigError::UnknownParam(key.clone()));
        }
        Ok(())
    }

    /// Total number of samples to render.
    pub fn total_samples(&self) -> usize {
        (self.duration_secs.max(0.0) * self.sample_rate as f32).round() as usize
    }

    /// Constant value for `param`, if the job sets one.
    pub fn param(&self, param: VoiceParam) -> Option<f32> {
        self.params.get(param.descriptor().string_id).copied()
    }

    /// Validate every message and sort them by due sample.
    ///
    /// Messages due at the same sample keep their file order, so the later
    /// one wins field by field.
    pub fn schedule(&self) -> Result<Vec<ScheduledUpdate>, ConfigError> {
        let mut scheduled = self
            .messages
            .iter()
            .map(|timed| {
                let parsed =
                    parse_value(&timed.message).map_err(|source| ConfigError::Message {
                        at_sample: timed.at_sample,
                        source,
                    })?;
                Ok(ScheduledUpdate {
                    at_sample: timed.at_sample,
                    update: parsed.update,
                    rejected: parsed.rejected,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        scheduled.sort_by_key(|s| s.at_sample);
        Ok(scheduled)
    }
}

/// Scheduled updates consumed block by block.
///
/// ```rust
/// use pulse2_config::{RenderJob, Timeline};
/// use pulse2_synth::ControlUpdate;
///
/// let job = RenderJob::default()
///     .with_message(100, &ControlUpdate { sync: Some(true), ..Default::default() });
/// let mut timeline = Timeline::new(job.schedule().unwrap());
///
/// assert!(timeline.take_due(64).is_none());
/// assert_eq!(timeline.take_due(128).unwrap().sync, Some(true));
/// assert!(timeline.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pending: VecDeque<ScheduledUpdate>,
}

impl Timeline {
    /// Build a timeline; updates are ordered by due sample.
    pub fn new(mut updates: Vec<ScheduledUpdate>) -> Self {
        updates.sort_by_key(|s| s.at_sample);
        Self {
            pending: updates.into(),
        }
    }

    /// Merge every update due before `block_end` (exclusive) into one.
    ///
    /// Returns `None` if nothing is due.
    pub fn take_due(&mut self, block_end: u64) -> Option<ControlUpdate> {
        let mut merged: Option<ControlUpdate> = None;
        while let Some(next) = self.pending.front() {
            if next.at_sample >= block_end {
                break;
            }
            if let Some(due) = self.pending.pop_front() {
                merged.get_or_insert_with(ControlUpdate::default).merge(&due.update);
            }
        }
        merged
    }

    /// Number of updates not yet taken.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `true` once every update has been taken.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse2_synth::Waveform;

    const EXAMPLE: &str = r#"
sample_rate = 44100
block_size = 64
duration_secs = 0.5

[params]
base_freq = 110.0
pulse_width = 0.3

[[messages]]
at_sample = 22050
message = { sync12 = true }

[[messages]]
at_sample = 0
message = { osc1Type = "square", osc2Semi = -12 }
"#;

    #[test]
    fn parses_example_job() {
        let job = RenderJob::from_toml(EXAMPLE).unwrap();
        assert_eq!(job.sample_rate, 44100);
        assert_eq!(job.block_size, 64);
        assert_eq!(job.total_samples(), 22050);
        assert_eq!(job.param(VoiceParam::BaseFrequency), Some(110.0));
        assert_eq!(job.param(VoiceParam::PulseWidth), Some(0.3));
        assert_eq!(job.param(VoiceParam::SubGain), None);
        assert_eq!(job.messages.len(), 2);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let job = RenderJob::from_toml("").unwrap();
        assert_eq!(job, RenderJob::default());
        assert_eq!(job.total_samples(), 96000);
    }

    #[test]
    fn schedule_sorts_by_sample() {
        let job = RenderJob::from_toml(EXAMPLE).unwrap();
        let scheduled = job.schedule().unwrap();
        assert_eq!(scheduled[0].at_sample, 0);
        assert_eq!(scheduled[0].update.osc1_kind, Some(Waveform::Square));
        assert_eq!(scheduled[0].update.osc2_semitones, Some(-12));
        assert_eq!(scheduled[1].at_sample, 22050);
        assert_eq!(scheduled[1].update.sync, Some(true));
    }

    #[test]
    fn schedule_reports_rejected_fields() {
        let job = RenderJob::from_toml(
            r#"
[[messages]]
at_sample = 10
message = { osc1Type = 3, ring = true }
"#,
        )
        .unwrap();
        let scheduled = job.schedule().unwrap();
        assert_eq!(scheduled[0].rejected, vec!["osc1Type"]);
        assert_eq!(scheduled[0].update.ring_mod, Some(true));
    }

    #[test]
    fn schedule_fails_on_wrong_message_type() {
        let job = RenderJob::from_toml(
            r#"
[[messages]]
at_sample = 99
message = { type = "noteOff" }
"#,
        )
        .unwrap();
        let err = job.schedule().unwrap_err();
        assert!(matches!(err, ConfigError::Message { at_sample: 99, .. }));
    }

    #[test]
    fn unknown_param_is_rejected() {
        let err = RenderJob::from_toml("[params]\ncutoff = 1000.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParam(ref k) if k == "cutoff"));
    }

    #[test]
    fn bad_stream_settings_are_rejected() {
        for toml in [
            "sample_rate = 0",
            "block_size = 0",
            "block_size = 100000",
            "duration_secs = -1.0",
        ] {
            let err = RenderJob::from_toml(toml).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidJob(_)), "{toml}: {err}");
        }
    }

    #[test]
    fn timeline_merges_updates_due_in_same_block() {
        let job = RenderJob::default()
            .with_message(
                70,
                &ControlUpdate {
                    osc1_semitones: Some(5),
                    ..ControlUpdate::default()
                },
            )
            .with_message(
                10,
                &ControlUpdate {
                    osc1_semitones: Some(2),
                    sync: Some(true),
                    ..ControlUpdate::default()
                },
            )
            .with_message(
                128,
                &ControlUpdate {
                    ring_mod: Some(true),
                    ..ControlUpdate::default()
                },
            );
        let mut timeline = Timeline::new(job.schedule().unwrap());
        assert_eq!(timeline.len(), 3);

        let first = timeline.take_due(128).unwrap();
        assert_eq!(first.osc1_semitones, Some(5));
        assert_eq!(first.sync, Some(true));
        assert_eq!(first.ring_mod, None);

        let second = timeline.take_due(256).unwrap();
        assert_eq!(second.ring_mod, Some(true));
        assert!(timeline.take_due(u64::MAX).is_none());
    }

    #[test]
    fn builder_round_trips_through_toml() {
        let job = RenderJob::default()
            .with_param(VoiceParam::BaseFrequency, 220.0)
            .with_param(VoiceParam::LfoPitch, -50.0)
            .with_message(
                480,
                &ControlUpdate {
                    osc2_kind: Some(Waveform::Triangle),
                    ring_mod: Some(true),
                    ..ControlUpdate::default()
                },
            );
        let text = job.to_toml().unwrap();
        let back = RenderJob::from_toml(&text).unwrap();
        assert_eq!(back, job);
    }
}
