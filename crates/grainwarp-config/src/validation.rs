//! Preset validation.
//!
//! Render settings are range-checked here; tuning constants are checked by
//! [`StretchConfig::validate`](grainwarp_core::StretchConfig::validate) in the
//! kernel crate. [`validate_preset`] collects every problem instead of
//! stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use grainwarp_config::{RenderSettings, validate_render};
//!
//! validate_render(&RenderSettings::default()).expect("defaults are valid");
//!
//! let loud = RenderSettings { volume: 10.0, ..RenderSettings::default() };
//! assert!(validate_render(&loud).is_err());
//! ```

use grainwarp_core::StretchError;
use thiserror::Error;

use crate::preset::Preset;
use crate::render::RenderSettings;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Tuning constants rejected by the kernel.
    #[error("invalid tuning: {0}")]
    Tuning(#[from] StretchError),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Preset has an empty name.
    #[error("preset name must not be empty")]
    EmptyName,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Inclusive range for each render setting.
pub const RENDER_RANGES: &[(&str, f32, f32)] = &[
    ("grain_seconds", 0.0, 1.0),
    ("stretch_rate", 0.05, 8.0),
    ("pitch_rate", 0.05, 8.0),
    ("volume", 0.0, 4.0),
    ("filter_depth", -1.0, 1.0),
    ("chunk_seconds", 0.001, 60.0),
];

fn render_values(settings: &RenderSettings) -> [f32; 6] {
    [
        settings.grain_seconds,
        settings.stretch_rate,
        settings.pitch_rate,
        settings.volume,
        settings.filter_depth,
        settings.chunk_seconds,
    ]
}

fn collect_render_errors(settings: &RenderSettings, errors: &mut Vec<ValidationError>) {
    for (&(param, min, max), value) in RENDER_RANGES.iter().zip(render_values(settings)) {
        // NaN fails both comparisons
        if !(value >= min && value <= max) {
            errors.push(ValidationError::OutOfRange {
                param: param.to_string(),
                value,
                min,
                max,
            });
        }
    }
}

fn into_result(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Checks every render setting against [`RENDER_RANGES`].
pub fn validate_render(settings: &RenderSettings) -> ValidationResult<()> {
    let mut errors = Vec::new();
    collect_render_errors(settings, &mut errors);
    into_result(errors)
}

/// Checks a preset's name, tuning and render settings.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();
    if preset.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if let Err(e) = preset.tuning.validate() {
        errors.push(ValidationError::Tuning(e));
    }
    collect_render_errors(&preset.render, &mut errors);
    into_result(errors)
}
