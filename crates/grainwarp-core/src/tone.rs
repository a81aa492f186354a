//! Bipolar tone control: one knob from low-pass through bypass to high-pass.
//!
//! Negative depths close a low-pass from `lowpass_top_hz` down toward
//! `lowpass_top_hz - lowpass_span_hz`; positive depths open a high-pass from
//! `highpass_base_hz` upward. Every cutoff is clamped to
//! `[min_cutoff_hz, sample_rate / max_cutoff_divisor]` before design, which
//! keeps the section stable and `w0` inside the polynomial trig's tuned range.
//!
//! Coefficients are designed once per [`ToneFilter::new`] or
//! [`ToneFilter::retune`]; nothing is recomputed per sample.

use core::f32::consts::TAU;

use crate::biquad::{Biquad, BiquadCoefficients};
use crate::config::StretchConfig;
use crate::error::{Result, StretchError};

/// Which response a depth selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMode {
    /// Identity transfer.
    Bypass,
    /// Attenuate above the cutoff.
    Lowpass,
    /// Attenuate below the cutoff.
    Highpass,
}

/// A filter depth validated to lie within `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FilterDepth(f32);

impl FilterDepth {
    /// No filtering.
    pub const BYPASS: Self = Self(0.0);

    /// Validates a raw depth. NaN and values outside `[-1, 1]` are rejected.
    pub fn new(depth: f32) -> Result<Self> {
        if (-1.0..=1.0).contains(&depth) {
            Ok(Self(depth))
        } else {
            Err(StretchError::invalid(
                "filter_depth",
                "must be within [-1, 1]",
            ))
        }
    }

    /// The raw depth.
    pub fn get(self) -> f32 {
        self.0
    }

    /// Response selected by this depth under `config`'s bypass band.
    pub fn mode(self, config: &StretchConfig) -> ToneMode {
        if self.0.abs() < config.bypass_threshold {
            ToneMode::Bypass
        } else if self.0 > 0.0 {
            ToneMode::Highpass
        } else {
            ToneMode::Lowpass
        }
    }
}

/// Clamped cutoff for `depth`, or `None` when the depth bypasses.
///
/// # Errors
///
/// Returns [`StretchError::InvalidArgument`] when `config` fails
/// [`StretchConfig::validate`].
pub fn cutoff_hz(depth: FilterDepth, config: &StretchConfig) -> Result<Option<f32>> {
    config.validate()?;
    Ok(clamped_cutoff(depth, config))
}

/// Normalized biquad coefficients for `depth`.
///
/// # Errors
///
/// Returns [`StretchError::InvalidArgument`] when `config` fails
/// [`StretchConfig::validate`].
pub fn tone_coefficients(depth: FilterDepth, config: &StretchConfig) -> Result<BiquadCoefficients> {
    config.validate()?;
    Ok(design(depth, config))
}

// Both helpers assume a validated config: `clamp` panics on inverted bounds.
fn clamped_cutoff(depth: FilterDepth, config: &StretchConfig) -> Option<f32> {
    let d = depth.get();
    let raw = match depth.mode(config) {
        ToneMode::Bypass => return None,
        ToneMode::Highpass => config.highpass_base_hz + d * config.highpass_span_hz,
        ToneMode::Lowpass => config.lowpass_top_hz - d.abs() * config.lowpass_span_hz,
    };
    Some(raw.clamp(config.min_cutoff_hz, config.max_cutoff_hz()))
}

fn design(depth: FilterDepth, config: &StretchConfig) -> BiquadCoefficients {
    let Some(cutoff) = clamped_cutoff(depth, config) else {
        return BiquadCoefficients::IDENTITY;
    };
    let w0 = TAU * cutoff / config.sample_rate;
    let (sin_w0, cos_w0) = config.sin_cos(w0);
    let alpha = sin_w0 * config.alpha_scale;

    if depth.mode(config) == ToneMode::Highpass {
        BiquadCoefficients::highpass(cos_w0, alpha)
    } else {
        BiquadCoefficients::lowpass(cos_w0, alpha)
    }
}

/// Depth-controlled biquad with its own delay line.
///
/// A fresh filter per call reproduces the classic single-call behaviour.
/// Keeping one alive and handing it to
/// [`stretch_with_filter`](crate::stretch_with_filter) on every call carries
/// the delay line across call boundaries.
#[derive(Debug, Clone)]
pub struct ToneFilter {
    depth: FilterDepth,
    mode: ToneMode,
    cutoff_hz: Option<f32>,
    biquad: Biquad,
}

impl ToneFilter {
    /// Designs a filter for `depth` with a silent delay line.
    pub fn new(depth: f32, config: &StretchConfig) -> Result<Self> {
        config.validate()?;
        let depth = FilterDepth::new(depth)?;
        Ok(Self {
            depth,
            mode: depth.mode(config),
            cutoff_hz: clamped_cutoff(depth, config),
            biquad: Biquad::with_coefficients(design(depth, config)),
        })
    }

    /// An identity filter.
    pub fn bypass() -> Self {
        Self {
            depth: FilterDepth::BYPASS,
            mode: ToneMode::Bypass,
            cutoff_hz: None,
            biquad: Biquad::new(),
        }
    }

    /// Redesigns for a new depth, keeping the delay line.
    pub fn retune(&mut self, depth: f32, config: &StretchConfig) -> Result<()> {
        config.validate()?;
        let depth = FilterDepth::new(depth)?;
        self.depth = depth;
        self.mode = depth.mode(config);
        self.cutoff_hz = clamped_cutoff(depth, config);
        self.biquad.set_coefficients(design(depth, config));
        Ok(())
    }

    /// Filters one sample.
    ///
    /// In bypass the delay line still records the signal (identity
    /// coefficients), so a later [`retune`](Self::retune) starts from real
    /// history instead of silence.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.biquad.process(input)
    }

    /// Silences the delay line.
    pub fn reset(&mut self) {
        self.biquad.clear();
    }

    /// Depth this filter was designed for.
    pub fn depth(&self) -> FilterDepth {
        self.depth
    }

    /// Selected response.
    pub fn mode(&self) -> ToneMode {
        self.mode
    }

    /// Clamped cutoff in Hz, `None` in bypass.
    pub fn cutoff_hz(&self) -> Option<f32> {
        self.cutoff_hz
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.biquad.coefficients()
    }
}

impl Default for ToneFilter {
    fn default() -> Self {
        Self::bypass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrigMode;

    fn depth(d: f32) -> FilterDepth {
        FilterDepth::new(d).unwrap()
    }

    #[test]
    fn depth_rejects_out_of_range() {
        for d in [-1.01, 1.01, f32::NAN, f32::INFINITY] {
            assert!(FilterDepth::new(d).is_err(), "{d} accepted");
        }
        assert!(FilterDepth::new(-1.0).is_ok());
        assert!(FilterDepth::new(1.0).is_ok());
    }

    #[test]
    fn mode_selection() {
        let config = StretchConfig::default();
        assert_eq!(depth(0.0).mode(&config), ToneMode::Bypass);
        assert_eq!(depth(0.009).mode(&config), ToneMode::Bypass);
        assert_eq!(depth(-0.009).mode(&config), ToneMode::Bypass);
        assert_eq!(depth(0.01).mode(&config), ToneMode::Highpass);
        assert_eq!(depth(-0.01).mode(&config), ToneMode::Lowpass);
    }

    #[test]
    fn cutoff_breakpoints() {
        let config = StretchConfig::default();
        assert_eq!(cutoff_hz(depth(0.0), &config).unwrap(), None);
        assert!((cutoff_hz(depth(0.5), &config).unwrap().unwrap() - 2500.0).abs() < 0.01);
        assert!((cutoff_hz(depth(1.0), &config).unwrap().unwrap() - 4500.0).abs() < 0.01);
        assert!((cutoff_hz(depth(-0.5), &config).unwrap().unwrap() - 7000.0).abs() < 0.01);
        assert!((cutoff_hz(depth(-1.0), &config).unwrap().unwrap() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn cutoff_is_clamped() {
        let config = StretchConfig {
            lowpass_top_hz: 30000.0,
            lowpass_span_hz: 40000.0,
            ..StretchConfig::default()
        };
        let top = cutoff_hz(depth(-0.02), &config).unwrap().unwrap();
        assert!((top - config.max_cutoff_hz()).abs() < 0.01);
        let bottom = cutoff_hz(depth(-1.0), &config).unwrap().unwrap();
        assert_eq!(bottom, config.min_cutoff_hz);
    }

    #[test]
    fn inverted_cutoff_bounds_are_rejected() {
        let config = StretchConfig {
            min_cutoff_hz: 20000.0,
            ..StretchConfig::default()
        };
        assert!(cutoff_hz(depth(-0.5), &config).is_err());
        assert!(tone_coefficients(depth(0.5), &config).is_err());
        let nan = StretchConfig {
            min_cutoff_hz: f32::NAN,
            ..StretchConfig::default()
        };
        assert!(cutoff_hz(depth(0.5), &nan).is_err());
        assert!(ToneFilter::new(0.5, &config).is_err());
    }

    #[test]
    fn bypass_coefficients_are_identity() {
        let config = StretchConfig::default();
        assert_eq!(
            tone_coefficients(depth(0.005), &config).unwrap(),
            BiquadCoefficients::IDENTITY
        );
    }

    #[test]
    fn every_depth_designs_a_stable_section() {
        for trig in [TrigMode::Libm, TrigMode::Polynomial] {
            for sr in [22050.0, 44100.0, 48000.0, 96000.0] {
                let config = StretchConfig::default().with_sample_rate(sr).with_trig(trig);
                for i in -100..=100 {
                    let c = tone_coefficients(depth(i as f32 / 100.0), &config).unwrap();
                    assert!(c.is_stable(), "depth {} at {sr} Hz ({trig:?})", i as f32 / 100.0);
                }
            }
        }
    }

    #[test]
    fn retune_keeps_history() {
        let config = StretchConfig::default();
        let mut filter = ToneFilter::new(-0.5, &config).unwrap();
        for _ in 0..500 {
            filter.process(1000.0);
        }
        filter.retune(-0.4, &config).unwrap();
        // A settled low-pass fed DC stays near DC through a retune.
        let y = filter.process(1000.0);
        assert!((y - 1000.0).abs() < 50.0, "retune jumped to {y}");
        assert_eq!(filter.mode(), ToneMode::Lowpass);
    }

    #[test]
    fn fresh_filter_starts_silent() {
        let config = StretchConfig::default();
        let mut filter = ToneFilter::new(-0.5, &config).unwrap();
        let first = filter.process(1000.0);
        assert!(first < 1000.0 * 0.5, "no ramp-in: {first}");
    }

    #[test]
    fn bypass_filter_is_exact() {
        let mut filter = ToneFilter::bypass();
        for x in [-32768.0, -1.0, 0.0, 1.0, 12345.0, 32767.0] {
            assert_eq!(filter.process(x), x);
        }
    }

    #[test]
    fn retune_rejects_bad_depth() {
        let config = StretchConfig::default();
        let mut filter = ToneFilter::bypass();
        assert!(filter.retune(2.0, &config).is_err());
        assert_eq!(filter.mode(), ToneMode::Bypass);
    }
}
