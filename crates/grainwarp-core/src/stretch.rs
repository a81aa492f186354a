//! Block-based resample/stretch driver.
//!
//! The source is walked in logical blocks of `stretch_block_input_samples`.
//! Each block emits `stretch_block_output_samples` samples by wrapping (or
//! truncating) its read position, so longer output blocks repeat material
//! (time stretch) and shorter ones skip it (time compression). The read
//! position is scaled by `pitch_rate` before indexing, which shifts pitch.
//!
//! ```text
//! block_i = i mod min(block_in, pitched - offset)
//! j       = floor(pitch_rate * (offset + block_i))
//! ```
//!
//! When output and input blocks differ in length the seam between blocks is
//! discontinuous; the last `interpolation_window - 1` samples of every block
//! that has a successor then ramp linearly from the previous sample to the
//! first sample of the next block instead of reading the source.
//!
//! Every selected value goes through the [`ToneFilter`], is scaled by
//! `volume` and narrowed with [`narrow`]. Writing stops at
//! `target_samples` or when the pitched length is exhausted, whichever
//! comes first.

use crate::config::StretchConfig;
use crate::error::{BufferKind, Result, StretchError};
use crate::params::StretchParameters;
use crate::pcm::{LeBytes, LeBytesMut, PcmSink, PcmSource, narrow};
use crate::tone::ToneFilter;

/// Runs one call with a fresh filter designed from `filter_depth`.
///
/// Returns the number of bytes written (`2 * samples_written`). Nothing is
/// read or written unless every argument and both buffer lengths check out.
/// Output slots past the written count are left untouched.
pub fn stretch<S, D>(
    output: &mut D,
    source: &S,
    params: &StretchParameters,
    volume: f32,
    filter_depth: f32,
    config: &StretchConfig,
) -> Result<usize>
where
    S: PcmSource + ?Sized,
    D: PcmSink + ?Sized,
{
    let mut filter = ToneFilter::new(filter_depth, config)?;
    stretch_with_filter(output, source, params, volume, &mut filter, config)
}

/// Runs one call through a caller-owned filter.
///
/// The filter's delay line carries over from the previous call, so
/// consecutive chunks of a stream join without a filter restart. Retune the
/// filter between calls with [`ToneFilter::retune`].
pub fn stretch_with_filter<S, D>(
    output: &mut D,
    source: &S,
    params: &StretchParameters,
    volume: f32,
    filter: &mut ToneFilter,
    config: &StretchConfig,
) -> Result<usize>
where
    S: PcmSource + ?Sized,
    D: PcmSink + ?Sized,
{
    params.validate()?;
    config.validate()?;
    if !volume.is_finite() {
        return Err(StretchError::invalid("volume", "must be finite"));
    }
    check_buffers(output.capacity(), source.len(), params)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        block_in = params.stretch_block_input_samples,
        block_out = params.stretch_block_output_samples,
        target = params.target_samples,
        pitched = params.pitched_samples,
        pitch_rate = params.pitch_rate,
        volume,
        mode = ?filter.mode(),
        "stretch"
    );

    let written = run(
        output,
        source,
        params,
        volume,
        filter,
        config.interpolation_window,
    );

    #[cfg(feature = "tracing")]
    tracing::trace!(written, "stretch done");

    Ok(2 * written)
}

/// Positional entry point over little-endian byte buffers.
///
/// Mirrors the host-facing contract: output bytes, source bytes, the five
/// stretch parameters, volume and filter depth. Uses
/// [`StretchConfig::default`] (44.1 kHz tuning). Returns bytes written.
#[allow(clippy::too_many_arguments)]
pub fn write_bytes(
    output: &mut [u8],
    source: &[u8],
    stretch_block_input_samples: usize,
    stretch_block_output_samples: usize,
    target_samples: usize,
    pitched_samples: usize,
    pitch_rate: f32,
    volume: f32,
    filter_depth: f32,
) -> Result<usize> {
    let params = StretchParameters::new(
        stretch_block_input_samples,
        stretch_block_output_samples,
        target_samples,
        pitched_samples,
        pitch_rate,
    )?;
    stretch(
        &mut LeBytesMut(output),
        &LeBytes(source),
        &params,
        volume,
        filter_depth,
        &StretchConfig::default(),
    )
}

fn check_buffers(output: usize, source: usize, params: &StretchParameters) -> Result<()> {
    let required = params.required_output_samples();
    if output < required {
        return Err(StretchError::BufferTooSmall {
            buffer: BufferKind::Output,
            required,
            available: output,
        });
    }
    let required = params.required_source_samples();
    if source < required {
        return Err(StretchError::BufferTooSmall {
            buffer: BufferKind::Source,
            required,
            available: source,
        });
    }
    Ok(())
}

/// `floor(pitch_rate * position)`, computed in f64 so large positions stay exact.
#[inline]
fn source_index(pitch_rate: f64, position: usize) -> usize {
    (pitch_rate * position as f64) as usize
}

/// The validated inner loop. Returns samples written.
fn run<S, D>(
    output: &mut D,
    source: &S,
    params: &StretchParameters,
    volume: f32,
    filter: &mut ToneFilter,
    window: usize,
) -> usize
where
    S: PcmSource + ?Sized,
    D: PcmSink + ?Sized,
{
    let block_in = params.stretch_block_input_samples;
    let block_out = params.stretch_block_output_samples;
    let pitched = params.pitched_samples;
    let target = params.target_samples;
    let rate = f64::from(params.pitch_rate);

    // Equal block lengths read the source contiguously across seams.
    let seams_jump = block_out != block_in;

    let mut written = 0;
    let mut previous: Option<f32> = None;
    let mut offset = 0;

    while offset < pitched {
        let block_len = block_in.min(pitched - offset);
        let next_block = offset.saturating_add(block_in);
        let blend_into = (seams_jump && next_block < pitched)
            .then(|| f32::from(source.sample(source_index(rate, next_block))));

        for i in 0..block_out {
            let remaining = block_out - i;
            let selected = match (blend_into, previous) {
                (Some(next), Some(prev)) if remaining < window => {
                    prev + (next - prev) / remaining as f32
                }
                _ => {
                    let block_i = i % block_len;
                    f32::from(source.sample(source_index(rate, offset + block_i)))
                }
            };
            previous = Some(selected);

            output.set_sample(written, narrow(filter.process(selected) * volume));
            written += 1;
            if written == target {
                return written;
            }
        }

        match offset.checked_add(block_in) {
            Some(next) => offset = next,
            None => break,
        }
    }

    written
}
