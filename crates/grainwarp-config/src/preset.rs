//! Preset file format and operations.

use grainwarp_core::StretchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::render::RenderSettings;
use crate::validation::validate_preset;

/// A named pairing of tuning constants and render settings.
///
/// # TOML Format
///
/// ```toml
/// name = "Halftime"
/// description = "Half speed, same pitch"
///
/// [tuning]
/// sample_rate = 44100.0
/// interpolation_window = 10
/// trig = "libm"
///
/// [render]
/// grain_seconds = 0.02
/// stretch_rate = 0.5
/// ```
///
/// Both tables are optional and any missing key takes its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kernel tuning constants.
    #[serde(default)]
    pub tuning: StretchConfig,

    /// Grain, rate, level and tone controls.
    #[serde(default)]
    pub render: RenderSettings,
}

impl Preset {
    /// Create a preset with default tuning and settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tuning: StretchConfig::default(),
            render: RenderSettings::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the tuning constants.
    pub fn with_tuning(mut self, tuning: StretchConfig) -> Self {
        self.tuning = tuning;
        self
    }

    /// Replace the render settings.
    pub fn with_render(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_preset(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_preset_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_preset(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check name, tuning and render settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_preset(self)?;
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainwarp_core::TrigMode;
    use tempfile::TempDir;

    #[test]
    fn test_preset_new() {
        let preset = Preset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert_eq!(preset.tuning, StretchConfig::default());
        assert_eq!(preset.render, RenderSettings::default());
    }

    #[test]
    fn test_preset_builder() {
        let preset = Preset::new("Slow")
            .with_description("Half speed")
            .with_tuning(StretchConfig::default().with_sample_rate(48000.0))
            .with_render(RenderSettings {
                stretch_rate: 0.5,
                ..RenderSettings::default()
            });

        assert_eq!(preset.description.as_deref(), Some("Half speed"));
        assert_eq!(preset.tuning.sample_rate, 48000.0);
        assert_eq!(preset.render.stretch_rate, 0.5);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let preset = Preset::from_toml(r#"name = "Bare""#).unwrap();
        assert_eq!(preset.name, "Bare");
        assert_eq!(preset.tuning, StretchConfig::default());
        assert_eq!(preset.render, RenderSettings::default());
    }

    #[test]
    fn test_partial_tables() {
        let toml = r#"
name = "Partial"

[tuning]
interpolation_window = 4
trig = "polynomial"

[render]
filter_depth = -0.5
"#;
        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.tuning.interpolation_window, 4);
        assert_eq!(preset.tuning.trig, TrigMode::Polynomial);
        assert_eq!(preset.tuning.lowpass_top_hz, StretchConfig::default().lowpass_top_hz);
        assert_eq!(preset.render.filter_depth, -0.5);
        assert_eq!(preset.render.volume, 1.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let preset = Preset::new("Round").with_description("trip").with_render(RenderSettings {
            pitch_rate: 1.5,
            continuous_filter: true,
            ..RenderSettings::default()
        });
        let toml = preset.to_toml().unwrap();
        assert_eq!(Preset::from_toml(&toml).unwrap(), preset);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("p.toml");
        let preset = Preset::new("Saved");
        preset.save(&path).unwrap();
        assert_eq!(Preset::load(&path).unwrap(), preset);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Preset::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadPreset { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Preset::from_toml("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_validate() {
        assert!(Preset::new("ok").validate().is_ok());
        let mut bad = Preset::new("bad");
        bad.render.stretch_rate = 0.0;
        assert!(matches!(bad.validate(), Err(ConfigError::Validation(_))));
    }
}
