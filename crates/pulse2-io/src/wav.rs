//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Output format for a rendered voice.
///
/// The voice is mono; `channels > 1` duplicates each sample to every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = dual mono).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth: 16 or 24 for PCM, 32 for float.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            32 => SampleFormat::Float,
            16 | 24 => SampleFormat::Int,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "{other}-bit (use 16, 24, or 32)"
                )));
            }
        };
        if self.channels == 0 {
            return Err(Error::UnsupportedFormat("zero channels".into()));
        }
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

/// Statistics of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    /// Frames written (samples per channel).
    pub frames: u64,
    /// Largest absolute sample value seen.
    pub peak: f32,
    /// Samples above full scale, clipped when written as PCM.
    pub clipped: u64,
    /// NaN or infinite samples, written as silence.
    pub non_finite: u64,
}

/// Streaming WAV writer for block-by-block rendering.
///
/// Non-finite samples are written as `0.0` and counted, so a faulty block
/// never corrupts the file.
pub struct WavSink {
    writer: WavWriter<BufWriter<File>>,
    spec: WavSpec,
    /// Full-scale value for PCM output; `None` for float
    pcm_scale: Option<f32>,
    summary: RenderSummary,
}

impl WavSink {
    /// Create (or truncate) `path` and write the header.
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> Result<Self> {
        let hound_spec = spec.to_hound()?;
        let writer = WavWriter::create(path, hound_spec)?;
        let pcm_scale = match hound_spec.sample_format {
            SampleFormat::Float => None,
            SampleFormat::Int => Some((1i32 << (spec.bits_per_sample - 1)) as f32),
        };
        Ok(Self {
            writer,
            spec,
            pcm_scale,
            summary: RenderSummary {
                frames: 0,
                peak: 0.0,
                clipped: 0,
                non_finite: 0,
            },
        })
    }

    /// Output format of this sink.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.summary.frames
    }

    /// Append one block of mono samples.
    pub fn write_block(&mut self, block: &[f32]) -> Result<()> {
        for &raw in block {
            let sample = if raw.is_finite() {
                raw
            } else {
                self.summary.non_finite += 1;
                0.0
            };
            let magnitude = sample.abs();
            self.summary.peak = self.summary.peak.max(magnitude);
            if magnitude > 1.0 {
                self.summary.clipped += 1;
            }

            for _ in 0..self.spec.channels {
                match self.pcm_scale {
                    None => self.writer.write_sample(sample)?,
                    Some(scale) => {
                        let int_sample = (sample * scale).clamp(-scale, scale - 1.0) as i32;
                        self.writer.write_sample(int_sample)?;
                    }
                }
            }
            self.summary.frames += 1;
        }
        Ok(())
    }

    /// Flush, patch the header lengths, and return the render statistics.
    pub fn finalize(self) -> Result<RenderSummary> {
        self.writer.finalize()?;
        if self.summary.non_finite > 0 {
            tracing::warn!(
                count = self.summary.non_finite,
                "non-finite samples replaced with silence"
            );
        }
        Ok(self.summary)
    }
}

/// Write mono samples to a WAV file in one call.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 48000]; // 1 second of silence
/// let spec = WavSpec { sample_rate: 48000, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<RenderSummary> {
    let mut sink = WavSink::create(path, spec)?;
    sink.write_block(samples)?;
    sink.finalize()
}

/// Read a WAV file as mono f32 samples along with its spec.
///
/// Multi-channel files are mixed down by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}
