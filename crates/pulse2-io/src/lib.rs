//! Audio file I/O for rendered pulse2 audio.
//!
//! This crate provides:
//!
//! - **Streaming WAV output**: [`WavSink`] writes rendered blocks as they are
//!   produced and tracks peak level and non-finite samples
//! - **Whole-file helpers**: [`write_wav`] and [`read_wav`] for tests and
//!   short renders
//! - **Metadata**: [`read_wav_info`] reads the header without the samples
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulse2_io::{WavSink, WavSpec};
//!
//! let spec = WavSpec { sample_rate: 48000, ..WavSpec::default() };
//! let mut sink = WavSink::create("voice.wav", spec)?;
//!
//! let block = [0.0f32; 128];
//! for _ in 0..375 {
//!     sink.write_block(&block)?;
//! }
//! let summary = sink.finalize()?;
//! assert_eq!(summary.frames, 48000);
//! # Ok::<(), pulse2_io::Error>(())
//! ```

mod wav;

pub use wav::{
    RenderSummary, WavFormat, WavInfo, WavSink, WavSpec, read_wav, read_wav_info, write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
