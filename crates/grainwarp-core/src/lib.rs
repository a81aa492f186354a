//! Grainwarp Core - grain stretch, pitch and tone kernel for 16-bit PCM
//!
//! This crate turns a borrowed mono 16-bit source buffer into a resampled,
//! tonally filtered, volume-scaled sequence of samples written into a
//! caller-supplied output buffer. A call is a bounded computation: no
//! allocation, no I/O, no locking.
//!
//! # Core Abstractions
//!
//! ## Stretch Driver
//!
//! - [`stretch`] - One call, fresh filter state (the classic contract)
//! - [`stretch_with_filter`] - Threads a caller-owned [`ToneFilter`] across calls
//! - [`write_bytes`] - Positional entry point over little-endian byte buffers
//!
//! ## Parameters
//!
//! - [`StretchParameters`] - Validated block sizes, target length and pitch rate
//! - [`StretchRequest`] - Grain length and rates, turned into parameters per chunk
//! - [`StretchConfig`] - Tuned constants (crossfade window, cutoff breakpoints)
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR filter over a two-sample delay line
//! - [`ToneFilter`] - Bipolar depth control: low-pass below zero, high-pass above
//!
//! ## PCM
//!
//! - [`PcmSource`] / [`PcmSink`] - Sample access over `[i16]` or byte buffers
//! - [`narrow`] - Saturating `f32` to `i16` conversion
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! grainwarp-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use grainwarp_core::{StretchConfig, StretchParameters, stretch};
//!
//! let source: Vec<i16> = (0..32).map(|i| i * 100).collect();
//! let mut output = vec![0i16; 32];
//! let params = StretchParameters::new(8, 8, 32, 32, 1.0).unwrap();
//!
//! let bytes = stretch(
//!     output.as_mut_slice(),
//!     source.as_slice(),
//!     &params,
//!     1.0,
//!     0.0,
//!     &StretchConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(bytes, 64);
//! assert_eq!(output, source);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod config;
pub mod error;
pub mod fast_math;
pub mod params;
pub mod pcm;
pub mod stretch;
pub mod tone;

pub use biquad::{Biquad, BiquadCoefficients};
pub use config::{
    ALPHA_SCALE, BYPASS_THRESHOLD, DEFAULT_SAMPLE_RATE, HIGHPASS_BASE_HZ, HIGHPASS_SPAN_HZ,
    INTERPOLATION_WINDOW, LOWPASS_SPAN_HZ, LOWPASS_TOP_HZ, MAX_CUTOFF_DIVISOR, MIN_CUTOFF_HZ,
    StretchConfig, TrigMode,
};
pub use error::{BufferKind, Result, StretchError};
pub use fast_math::{poly_cos, poly_sin};
pub use params::{StretchParameters, StretchRequest, tempo_ratio};
pub use pcm::{LeBytes, LeBytesMut, PcmSink, PcmSource, narrow};
pub use stretch::{stretch, stretch_with_filter, write_bytes};
pub use tone::{FilterDepth, ToneFilter, ToneMode, cutoff_hz, tone_coefficients};
