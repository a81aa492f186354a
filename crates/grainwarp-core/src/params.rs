//! Stretch parameters: validation and derivation from musical controls.
//!
//! A [`StretchParameters`] value describes one call of the driver. Hosts
//! usually think in grain length, tempo ratio and pitch instead, so
//! [`StretchParameters::for_chunk`] turns a [`StretchRequest`] and a chunk
//! length into concrete block sizes.

use libm::{ceil, floor, round};

use crate::error::{Result, StretchError};

/// Block sizes, output length and read rate for one driver call.
///
/// All counts are in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchParameters {
    /// Logical source samples consumed per block.
    pub stretch_block_input_samples: usize,
    /// Output samples produced per block.
    pub stretch_block_output_samples: usize,
    /// Hard cap on samples written.
    pub target_samples: usize,
    /// Logical read length before pitch scaling.
    pub pitched_samples: usize,
    /// Source index multiplier (2.0 = one octave up).
    pub pitch_rate: f32,
}

impl StretchParameters {
    /// Builds and validates parameters.
    pub fn new(
        stretch_block_input_samples: usize,
        stretch_block_output_samples: usize,
        target_samples: usize,
        pitched_samples: usize,
        pitch_rate: f32,
    ) -> Result<Self> {
        let params = Self {
            stretch_block_input_samples,
            stretch_block_output_samples,
            target_samples,
            pitched_samples,
            pitch_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every count is positive and the pitch rate is finite and positive.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("stretch_block_input_samples", self.stretch_block_input_samples),
            ("stretch_block_output_samples", self.stretch_block_output_samples),
            ("target_samples", self.target_samples),
            ("pitched_samples", self.pitched_samples),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(StretchError::invalid(name, "must be positive"));
            }
        }
        if !(self.pitch_rate.is_finite() && self.pitch_rate > 0.0) {
            return Err(StretchError::invalid(
                "pitch_rate",
                "must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Source samples the call may read: `ceil(pitch_rate * pitched_samples)`.
    pub fn required_source_samples(&self) -> usize {
        ceil(f64::from(self.pitch_rate) * self.pitched_samples as f64) as usize
    }

    /// Output samples the call may write.
    pub fn required_output_samples(&self) -> usize {
        self.target_samples
    }

    /// Number of blocks the driver walks, counting a short final block.
    pub fn block_count(&self) -> usize {
        self.pitched_samples.div_ceil(self.stretch_block_input_samples)
    }

    /// Derives parameters for one chunk of source material.
    ///
    /// - input block: `round(sample_rate * grain_seconds)`, at least 1
    /// - pitched length: `round(chunk / pitch_rate)`, shortened if needed so
    ///   `ceil(pitch_rate * pitched) <= chunk`
    /// - an input block longer than the pitched length is clamped to it
    /// - output block: `round(input_block / stretch_rate)`, at least 1
    /// - target: `round(chunk / (stretch_rate * pitch_rate))`, at least 1
    pub fn for_chunk(
        chunk_samples: usize,
        sample_rate: f32,
        request: &StretchRequest,
    ) -> Result<Self> {
        if chunk_samples == 0 {
            return Err(StretchError::invalid("chunk_samples", "must be positive"));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(StretchError::invalid(
                "sample_rate",
                "must be finite and positive",
            ));
        }
        request.validate()?;

        let chunk = chunk_samples as f64;
        let pitch = f64::from(request.pitch_rate);
        let stretch = f64::from(request.stretch_rate);

        let mut block_in =
            (round(f64::from(sample_rate) * f64::from(request.grain_seconds)) as usize).max(1);

        let fit = floor(chunk / pitch) as usize;
        let mut pitched = (round(chunk / pitch) as usize).min(fit);
        if pitched > 0 && ceil(pitch * pitched as f64) as usize > chunk_samples {
            pitched -= 1;
        }
        if pitched == 0 {
            return Err(StretchError::invalid(
                "pitch_rate",
                "leaves no whole sample to read from the chunk",
            ));
        }

        if block_in > pitched {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                block_in,
                pitched,
                "stretch block longer than pitched chunk, using the chunk length"
            );
            block_in = pitched;
        }

        let block_out = (round(block_in as f64 / stretch) as usize).max(1);
        let target = (round(chunk / (stretch * pitch)) as usize).max(1);

        let params = Self::new(block_in, block_out, target, pitched, request.pitch_rate)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            chunk_samples,
            block_in,
            block_out,
            target,
            pitched,
            pitch_rate = request.pitch_rate,
            "derived stretch parameters"
        );

        Ok(params)
    }
}

/// Musical controls for one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchRequest {
    /// Grain (input block) length in seconds.
    pub grain_seconds: f32,
    /// Playback speed without pitch change; usually [`tempo_ratio`].
    pub stretch_rate: f32,
    /// Read-rate multiplier; 2.0 plays an octave up and twice as fast.
    pub pitch_rate: f32,
}

impl Default for StretchRequest {
    fn default() -> Self {
        Self {
            grain_seconds: 0.015,
            stretch_rate: 1.0,
            pitch_rate: 1.0,
        }
    }
}

impl StretchRequest {
    /// Checks the grain length is non-negative and both rates are positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.grain_seconds.is_finite() && self.grain_seconds >= 0.0) {
            return Err(StretchError::invalid(
                "grain_seconds",
                "must be finite and non-negative",
            ));
        }
        if !(self.stretch_rate.is_finite() && self.stretch_rate > 0.0) {
            return Err(StretchError::invalid(
                "stretch_rate",
                "must be finite and positive",
            ));
        }
        if !(self.pitch_rate.is_finite() && self.pitch_rate > 0.0) {
            return Err(StretchError::invalid(
                "pitch_rate",
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Stretch rate that plays material recorded at `source_bpm` at `bpm`.
pub fn tempo_ratio(bpm: f32, source_bpm: f32) -> f32 {
    bpm / source_bpm
}
