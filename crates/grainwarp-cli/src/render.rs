//! Chunked rendering of a whole source through the stretch kernel.
//!
//! The source is cut into `chunk_seconds` pieces. Each piece gets its own
//! derived parameters and kernel call, and the outputs are concatenated.
//! With `continuous_filter` one tone filter runs across every chunk;
//! otherwise each chunk starts from a fresh filter.

use grainwarp_config::RenderSettings;
use grainwarp_core::{
    StretchConfig, StretchError, StretchParameters, ToneFilter, stretch, stretch_with_filter,
};

/// Renders `source` and reports each finished chunk index to `on_chunk`.
pub fn render_source(
    source: &[i16],
    tuning: &StretchConfig,
    settings: &RenderSettings,
    mut on_chunk: impl FnMut(usize),
) -> Result<Vec<i16>, StretchError> {
    let chunk_samples = settings.chunk_samples(tuning.sample_rate as u32);
    let request = settings.request();
    let volume = settings.effective_volume();
    let mut filter = settings
        .continuous_filter
        .then(|| ToneFilter::new(settings.filter_depth, tuning))
        .transpose()?;

    let mut rendered = Vec::with_capacity(estimated_len(source.len(), settings));
    let mut scratch = Vec::new();

    for (index, chunk) in source.chunks(chunk_samples).enumerate() {
        // Derivation needs at least one whole pitched sample.
        if (chunk.len() as f32) < settings.pitch_rate {
            tracing::debug!(index, len = chunk.len(), "dropping tail shorter than one pitched sample");
            break;
        }

        let params = StretchParameters::for_chunk(chunk.len(), tuning.sample_rate, &request)?;
        scratch.clear();
        scratch.resize(params.target_samples, 0i16);

        let bytes = match filter.as_mut() {
            Some(filter) => {
                stretch_with_filter(scratch.as_mut_slice(), chunk, &params, volume, filter, tuning)?
            }
            None => stretch(
                scratch.as_mut_slice(),
                chunk,
                &params,
                volume,
                settings.filter_depth,
                tuning,
            )?,
        };

        rendered.extend_from_slice(&scratch[..bytes / 2]);
        on_chunk(index);
    }

    Ok(rendered)
}

/// Number of chunks `render_source` walks for a source of `len` samples.
pub fn chunk_count(len: usize, tuning: &StretchConfig, settings: &RenderSettings) -> usize {
    len.div_ceil(settings.chunk_samples(tuning.sample_rate as u32))
}

fn estimated_len(len: usize, settings: &RenderSettings) -> usize {
    let rate = settings.stretch_rate * settings.pitch_rate;
    if rate.is_finite() && rate > 0.0 {
        (len as f32 / rate) as usize
    } else {
        len
    }
}
