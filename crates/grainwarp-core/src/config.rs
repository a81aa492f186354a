//! Tuning constants for the stretch driver and the tone filter.
//!
//! The defaults were tuned by ear on a 44.1 kHz sampler and encode
//! perceptual choices rather than derivations. They are collected in
//! [`StretchConfig`] so a host can retune them without touching the kernel.

use crate::error::{Result, StretchError};
use crate::fast_math::{poly_cos, poly_sin};

/// Sample rate the defaults were tuned at, in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Output samples at the tail of a block that blend toward the next block.
pub const INTERPOLATION_WINDOW: usize = 10;

/// High-pass cutoff at the smallest active depth, in Hz.
pub const HIGHPASS_BASE_HZ: f32 = 500.0;

/// High-pass cutoff added per unit of depth, in Hz.
pub const HIGHPASS_SPAN_HZ: f32 = 4000.0;

/// Low-pass cutoff at the smallest active depth, in Hz.
pub const LOWPASS_TOP_HZ: f32 = 12000.0;

/// Low-pass cutoff removed per unit of depth, in Hz.
pub const LOWPASS_SPAN_HZ: f32 = 10000.0;

/// Lowest cutoff the mapper will design for, in Hz.
pub const MIN_CUTOFF_HZ: f32 = 200.0;

/// Highest cutoff is `sample_rate / MAX_CUTOFF_DIVISOR`.
///
/// Keeps `w0 < 2π / 2.5`, well clear of Nyquist where the section loses
/// stability margin.
pub const MAX_CUTOFF_DIVISOR: f32 = 2.5;

/// Damping scale: `alpha = sin(w0) * ALPHA_SCALE` (Q ≈ 0.707).
pub const ALPHA_SCALE: f32 = 0.707;

/// Depths with `|depth| < BYPASS_THRESHOLD` leave the signal unfiltered.
pub const BYPASS_THRESHOLD: f32 = 0.01;

/// How the coefficient mapper evaluates `sin(w0)` and `cos(w0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrigMode {
    /// `libm::sinf` / `libm::cosf`.
    #[default]
    Libm,
    /// [`poly_sin`] / [`poly_cos`], max error < 0.005.
    Polynomial,
}

/// Tuned constants for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StretchConfig {
    /// Sample rate of the source material in Hz.
    pub sample_rate: f32,
    /// Crossfade length at block seams, in output samples.
    pub interpolation_window: usize,
    /// High-pass cutoff at depth 0+, in Hz.
    pub highpass_base_hz: f32,
    /// High-pass cutoff gained per unit depth, in Hz.
    pub highpass_span_hz: f32,
    /// Low-pass cutoff at depth 0-, in Hz.
    pub lowpass_top_hz: f32,
    /// Low-pass cutoff lost per unit depth, in Hz.
    pub lowpass_span_hz: f32,
    /// Lower cutoff clamp, in Hz.
    pub min_cutoff_hz: f32,
    /// Upper cutoff clamp is `sample_rate / max_cutoff_divisor`.
    pub max_cutoff_divisor: f32,
    /// `alpha = sin(w0) * alpha_scale`.
    pub alpha_scale: f32,
    /// Bypass band half-width around depth 0.
    pub bypass_threshold: f32,
    /// Trigonometry used for coefficient design.
    pub trig: TrigMode,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            interpolation_window: INTERPOLATION_WINDOW,
            highpass_base_hz: HIGHPASS_BASE_HZ,
            highpass_span_hz: HIGHPASS_SPAN_HZ,
            lowpass_top_hz: LOWPASS_TOP_HZ,
            lowpass_span_hz: LOWPASS_SPAN_HZ,
            min_cutoff_hz: MIN_CUTOFF_HZ,
            max_cutoff_divisor: MAX_CUTOFF_DIVISOR,
            alpha_scale: ALPHA_SCALE,
            bypass_threshold: BYPASS_THRESHOLD,
            trig: TrigMode::Libm,
        }
    }
}

impl StretchConfig {
    /// Defaults at a different sample rate.
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Defaults with a different trig backend.
    pub fn with_trig(mut self, trig: TrigMode) -> Self {
        self.trig = trig;
        self
    }

    /// Highest cutoff the mapper will design for, in Hz.
    pub fn max_cutoff_hz(&self) -> f32 {
        self.sample_rate / self.max_cutoff_divisor
    }

    /// `(sin(w), cos(w))` through the configured backend.
    pub fn sin_cos(&self, w: f32) -> (f32, f32) {
        match self.trig {
            TrigMode::Libm => (libm::sinf(w), libm::cosf(w)),
            TrigMode::Polynomial => (poly_sin(w), poly_cos(w)),
        }
    }

    /// Rejects values that would make the filter unstable or the driver
    /// ill-defined.
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(StretchError::invalid(
                "sample_rate",
                "must be finite and positive",
            ));
        }
        if self.interpolation_window == 0 {
            return Err(StretchError::invalid(
                "interpolation_window",
                "must be at least 1",
            ));
        }
        // Anything at or above Nyquist puts w0 past π.
        if !(self.max_cutoff_divisor.is_finite() && self.max_cutoff_divisor > 2.0) {
            return Err(StretchError::invalid(
                "max_cutoff_divisor",
                "must be greater than 2",
            ));
        }
        if !(self.min_cutoff_hz.is_finite()
            && self.min_cutoff_hz > 0.0
            && self.min_cutoff_hz < self.max_cutoff_hz())
        {
            return Err(StretchError::invalid(
                "min_cutoff_hz",
                "must be positive and below the maximum cutoff",
            ));
        }
        let breakpoints = [
            self.highpass_base_hz,
            self.highpass_span_hz,
            self.lowpass_top_hz,
            self.lowpass_span_hz,
        ];
        if breakpoints.iter().any(|hz| !hz.is_finite()) {
            return Err(StretchError::invalid(
                "cutoff breakpoints",
                "must be finite",
            ));
        }
        if !(self.alpha_scale.is_finite() && self.alpha_scale > 0.0) {
            return Err(StretchError::invalid(
                "alpha_scale",
                "must be finite and positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.bypass_threshold) {
            return Err(StretchError::invalid(
                "bypass_threshold",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
