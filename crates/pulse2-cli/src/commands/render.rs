//! Offline voice rendering command.

use super::common::{CliLfoShape, CliWaveform, parse_param, peak_db};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pulse2_config::{RenderJob, Timeline};
use pulse2_core::Lfo;
use pulse2_io::{WavSink, WavSpec};
use pulse2_synth::{ControlUpdate, VoiceEngine, VoiceInputs, VoiceParam};
use std::path::PathBuf;

/// Render the voice offline, block by block, to a WAV file.
#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Render job file (TOML); flags below override its settings
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Samples per render call
    #[arg(long)]
    block_size: Option<usize>,

    /// Duration in seconds
    #[arg(short, long)]
    duration: Option<f32>,

    /// Base frequency in Hz (shorthand for `--param base_freq=...`)
    #[arg(short, long)]
    freq: Option<f32>,

    /// Constant parameter value (e.g. "osc2_detune=7"), repeatable
    #[arg(short, long, value_parser = parse_param)]
    param: Vec<(VoiceParam, f32)>,

    /// Osc1 waveform
    #[arg(long, value_enum)]
    osc1: Option<CliWaveform>,

    /// Osc2 waveform
    #[arg(long, value_enum)]
    osc2: Option<CliWaveform>,

    /// Osc1 offset in semitones
    #[arg(long, allow_hyphen_values = true)]
    osc1_semi: Option<i32>,

    /// Osc2 offset in semitones
    #[arg(long, allow_hyphen_values = true)]
    osc2_semi: Option<i32>,

    /// Hard-sync osc2 to osc1
    #[arg(long)]
    sync: bool,

    /// Ring-modulate osc1 with osc2
    #[arg(long)]
    ring: bool,

    /// Pitch LFO rate in Hz, written into the lfo_pitch lane
    #[arg(long, default_value = "5.0")]
    lfo_rate: f32,

    /// Pitch LFO shape
    #[arg(long, value_enum, default_value_t = CliLfoShape::Sine)]
    lfo_shape: CliLfoShape,

    /// Pitch LFO depth in cents (0 disables the LFO)
    #[arg(long, default_value = "0.0")]
    lfo_depth: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

impl RenderArgs {
    /// Configuration given on the command line.
    ///
    /// Posted with the first block, over any job messages due at sample 0.
    fn initial_update(&self) -> ControlUpdate {
        ControlUpdate {
            osc1_kind: self.osc1.map(Into::into),
            osc2_kind: self.osc2.map(Into::into),
            osc1_semitones: self.osc1_semi,
            osc2_semitones: self.osc2_semi,
            sync: self.sync.then_some(true),
            ring_mod: self.ring.then_some(true),
        }
    }

    fn build_job(&self) -> anyhow::Result<RenderJob> {
        let mut job = match &self.job {
            Some(path) => {
                let job = RenderJob::load(path)?;
                tracing::info!(path = %path.display(), messages = job.messages.len(), "loaded render job");
                job
            }
            None => RenderJob::default(),
        };

        if let Some(sr) = self.sample_rate {
            job.sample_rate = sr;
        }
        if let Some(bs) = self.block_size {
            job.block_size = bs;
        }
        if let Some(secs) = self.duration {
            job.duration_secs = secs;
        }
        if let Some(freq) = self.freq {
            job = job.with_param(VoiceParam::BaseFrequency, freq);
        }
        for &(param, value) in &self.param {
            job = job.with_param(param, value);
        }
        job.validate()?;
        Ok(job)
    }
}

/// Run the render command.
pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let job = args.build_job()?;

    let schedule = job.schedule()?;
    for scheduled in schedule.iter().filter(|s| !s.rejected.is_empty()) {
        tracing::warn!(
            at_sample = scheduled.at_sample,
            fields = %scheduled.rejected.join(", "),
            "ignoring invalid message fields"
        );
    }
    let mut timeline = Timeline::new(schedule);

    let mut voice = VoiceEngine::new(job.sample_rate as f32)?;
    let control = voice.connect_control();

    let constants: Vec<(VoiceParam, f32)> = VoiceParam::ALL
        .into_iter()
        .filter_map(|p| job.param(p).map(|v| (p, v)))
        .collect();

    let mut lfo = (args.lfo_depth != 0.0).then(|| {
        Lfo::new(job.sample_rate as f32, args.lfo_rate).with_waveform(args.lfo_shape.into())
    });
    if lfo.is_some() && job.param(VoiceParam::LfoPitch).is_some() {
        tracing::warn!("--lfo-depth replaces the constant lfo_pitch value");
    }

    let spec = WavSpec {
        sample_rate: job.sample_rate,
        bits_per_sample: args.bit_depth,
        ..WavSpec::default()
    };
    let mut sink = WavSink::create(&args.output, spec)?;

    let total = job.total_samples();
    tracing::info!(
        sample_rate = job.sample_rate,
        block_size = job.block_size,
        samples = total,
        "rendering {}",
        args.output.display()
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut block = vec![0.0f32; job.block_size];
    let mut lfo_lane = vec![0.0f32; job.block_size];
    let mut rendered = 0usize;
    let mut initial = Some(args.initial_update());

    while rendered < total {
        let len = job.block_size.min(total - rendered);
        let block_end = (rendered + len) as u64;

        let mut due = timeline.take_due(block_end);
        if let Some(initial) = initial.take() {
            due.get_or_insert_with(ControlUpdate::default).merge(&initial);
        }
        if let Some(update) = due {
            control.post(update);
        }

        let mut inputs = VoiceInputs::default();
        for (param, value) in &constants {
            inputs = inputs.with(*param, std::slice::from_ref(value));
        }
        if let Some(lfo) = lfo.as_mut() {
            lfo.fill_cents(&mut lfo_lane[..len], args.lfo_depth);
            inputs = inputs.with(VoiceParam::LfoPitch, &lfo_lane[..len]);
        }

        voice.render(&inputs, &mut block[..len]);
        sink.write_block(&block[..len])?;

        rendered += len;
        pb.set_position(rendered as u64);
    }
    pb.finish_and_clear();

    let summary = sink.finalize()?;
    if summary.clipped > 0 {
        tracing::warn!(samples = summary.clipped, "output exceeded full scale");
    }

    println!("Wrote {}", args.output.display());
    println!(
        "  {} samples, {} Hz, {:.2}s, peak {:.1} dBFS",
        summary.frames,
        job.sample_rate,
        summary.frames as f64 / f64::from(job.sample_rate),
        peak_db(summary.peak)
    );
    Ok(())
}
