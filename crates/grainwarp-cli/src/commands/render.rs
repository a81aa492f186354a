//! File-based render command.

use crate::render::{chunk_count, render_source};
use clap::Args;
use grainwarp_config::{Preset, get_factory_preset, resolve_preset};
use grainwarp_io::{read_wav, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (mono 16-bit)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML path (defaults to the "default" factory preset)
    #[arg(short, long)]
    preset: Option<String>,

    /// Grain length in seconds
    #[arg(short, long)]
    grain: Option<f32>,

    /// Playback speed without pitch change (0.5 = half speed)
    #[arg(short, long, conflicts_with = "bpm")]
    stretch: Option<f32>,

    /// Pitch rate (2.0 = one octave up)
    #[arg(long)]
    pitch: Option<f32>,

    /// Target tempo; sets the stretch rate from --source-bpm
    #[arg(long, requires = "source_bpm")]
    bpm: Option<f32>,

    /// Tempo the input was recorded at
    #[arg(long, requires = "bpm")]
    source_bpm: Option<f32>,

    /// Output volume (below 0.02 renders silence)
    #[arg(long)]
    volume: Option<f32>,

    /// Tone filter depth in [-1, 1]: low-pass below zero, high-pass above
    #[arg(short, long, allow_hyphen_values = true)]
    filter: Option<f32>,

    /// Chunk length in seconds
    #[arg(long)]
    chunk_seconds: Option<f32>,

    /// Keep the tone filter running across chunk boundaries
    #[arg(long)]
    continuous: bool,
}

impl RenderArgs {
    fn load_preset(&self) -> anyhow::Result<Preset> {
        let preset = match &self.preset {
            Some(name) => resolve_preset(name)?,
            None => get_factory_preset("default").unwrap_or_default(),
        };
        Ok(preset)
    }

    fn apply_overrides(&self, preset: &mut Preset) {
        let render = &mut preset.render;
        if let Some(grain) = self.grain {
            render.grain_seconds = grain;
        }
        if let Some(stretch) = self.stretch {
            render.stretch_rate = stretch;
        }
        if let (Some(bpm), Some(source_bpm)) = (self.bpm, self.source_bpm) {
            *render = render.with_tempo(bpm, source_bpm);
        }
        if let Some(pitch) = self.pitch {
            render.pitch_rate = pitch;
        }
        if let Some(volume) = self.volume {
            render.volume = volume;
        }
        if let Some(filter) = self.filter {
            render.filter_depth = filter;
        }
        if let Some(chunk) = self.chunk_seconds {
            render.chunk_seconds = chunk;
        }
        if self.continuous {
            render.continuous_filter = true;
        }
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut preset = args.load_preset()?;
    args.apply_overrides(&mut preset);

    println!("Reading {}...", args.input.display());
    let (samples, info) = read_wav(&args.input)?;
    if !info.is_native() {
        tracing::info!(
            channels = info.channels,
            bits = info.bits_per_sample,
            "input converted to mono 16-bit"
        );
    }
    preset.tuning.sample_rate = info.sample_rate as f32;
    preset.validate()?;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        info.sample_rate,
        samples.len() as f64 / f64::from(info.sample_rate)
    );

    let render = &preset.render;
    println!(
        "Rendering with '{}': stretch {:.3}, pitch {:.3}, grain {:.1} ms, filter {:+.2}, volume {:.2}",
        preset.name,
        render.stretch_rate,
        render.pitch_rate,
        render.grain_seconds * 1000.0,
        render.filter_depth,
        render.effective_volume(),
    );

    let chunks = chunk_count(samples.len(), &preset.tuning, render);
    let pb = ProgressBar::new(chunks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta})")?
            .progress_chars("##-"),
    );

    let rendered = render_source(&samples, &preset.tuning, render, |index| {
        pb.set_position(index as u64 + 1);
    })?;
    pb.finish_with_message("done");

    write_wav(&args.output, &rendered, info.sample_rate)?;

    println!(
        "Wrote {} ({} samples, {:.2}s)",
        args.output.display(),
        rendered.len(),
        rendered.len() as f64 / f64::from(info.sample_rate)
    );

    Ok(())
}
