//! Preset and render-settings management for grainwarp.
//!
//! A preset pairs the kernel's tuning constants
//! ([`StretchConfig`](grainwarp_core::StretchConfig)) with the per-render
//! controls ([`RenderSettings`]) and is stored as TOML.
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Range-check render settings and tuning constants
//! - **Paths**: Platform-specific user preset directory and lookup
//! - **Factory Presets**: Built-in presets for common treatments
//!
//! # Example
//!
//! ```rust,no_run
//! use grainwarp_config::{Preset, RenderSettings, paths::user_presets_dir};
//!
//! let preset = Preset::new("Slowmo")
//!     .with_description("Quarter speed, dark")
//!     .with_render(RenderSettings {
//!         stretch_rate: 0.25,
//!         filter_depth: -0.6,
//!         ..RenderSettings::default()
//!     });
//!
//! preset.validate().unwrap();
//! preset.save(user_presets_dir().join("slowmo.toml")).unwrap();
//! ```

mod error;
mod preset;
mod render;

/// Platform-specific preset directory and preset lookup.
pub mod paths;

/// Render-settings and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{find_preset, resolve_preset, user_presets_dir};
pub use preset::Preset;
pub use render::{RenderSettings, VOLUME_GATE};
pub use validation::{
    RENDER_RANGES, ValidationError, ValidationResult, validate_preset, validate_render,
};

/// Re-export of the kernel tuning types stored in presets.
pub use grainwarp_core::{StretchConfig, TrigMode};
