//! WAV file reading and writing.

use crate::{Error, Result};
use grainwarp_core::narrow;
use hound::{SampleFormat, WavReader, WavWriter};
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
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
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

impl WavInfo {
    fn from_spec(spec: hound::WavSpec, total_samples: u64) -> Self {
        let num_frames = total_samples / u64::from(spec.channels.max(1));
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            num_frames,
            duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
            format: match spec.sample_format {
                SampleFormat::Float => WavFormat::IeeeFloat,
                SampleFormat::Int => WavFormat::Pcm,
            },
        }
    }

    /// Whether samples load without conversion.
    pub fn is_native(&self) -> bool {
        self.channels == 1 && self.bits_per_sample == 16 && self.format == WavFormat::Pcm
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(WavInfo::from_spec(reader.spec(), u64::from(reader.len())))
}

/// Read a WAV file as mono 16-bit samples.
///
/// Multi-channel files are mixed down by averaging channels. Other integer
/// depths are rescaled to 16 bits and float files are scaled by 32768, both
/// saturating. The returned [`WavInfo`] describes the file as stored.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, WavInfo)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let info = WavInfo::from_spec(spec, u64::from(reader.len()));

    if spec.channels == 0 {
        return Err(Error::UnsupportedFormat("zero channels".to_string()));
    }
    if spec.sample_format == SampleFormat::Float && spec.bits_per_sample != 32 {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit float",
            spec.bits_per_sample
        )));
    }

    if info.is_native() {
        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        return Ok((samples, info));
    }

    tracing::debug!(
        channels = spec.channels,
        bits = spec.bits_per_sample,
        format = ?info.format,
        "converting to mono 16-bit"
    );

    // Interleaved, in 16-bit sample units
    let wide: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v * 32768.0))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = 32768.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let channels = usize::from(spec.channels);
    let samples = wide
        .chunks_exact(channels)
        .map(|frame| narrow(frame.iter().sum::<f32>() / channels as f32))
        .collect();

    Ok((samples, info))
}

/// Write mono 16-bit samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
