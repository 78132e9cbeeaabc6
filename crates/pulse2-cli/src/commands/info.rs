//! Inspect a rendered WAV file.

use super::common::peak_db;
use clap::Args;
use pulse2_io::{WavFormat, read_wav, read_wav_info};
use pulse2_synth::HEADROOM;

/// Show the header and level statistics of a render.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Level statistics of a mono (or mixed-down) signal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Levels {
    peak: f32,
    rms: f32,
    /// Samples louder than one full-gain oscillator through the headroom scale
    over_headroom: usize,
}

fn measure(samples: &[f32]) -> Levels {
    let mut peak = 0.0f32;
    let mut sum_sq = 0.0f64;
    let mut over_headroom = 0;
    for &s in samples {
        let m = s.abs();
        peak = peak.max(m);
        sum_sq += f64::from(s) * f64::from(s);
        if m > HEADROOM {
            over_headroom += 1;
        }
    }
    let rms = if samples.is_empty() {
        0.0
    } else {
        (sum_sq / samples.len() as f64).sqrt() as f32
    };
    Levels {
        peak,
        rms,
        over_headroom,
    }
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let (samples, _) = read_wav(&args.file)?;
    let levels = measure(&samples);

    let encoding = match info.format {
        WavFormat::Pcm => format!("{}-bit PCM", info.bits_per_sample),
        WavFormat::IeeeFloat => format!("{}-bit float", info.bits_per_sample),
    };

    println!("{}", args.file.display());
    println!(
        "  {encoding}, {} ch, {} Hz, {:.3}s ({} frames)",
        info.channels, info.sample_rate, info.duration_secs, info.num_frames
    );
    println!(
        "  peak {:.1} dBFS, rms {:.1} dBFS",
        peak_db(levels.peak),
        peak_db(levels.rms)
    );
    if levels.over_headroom > 0 {
        println!(
            "  {} samples above the {HEADROOM} headroom scale",
            levels.over_headroom
        );
    }
    Ok(())
}
