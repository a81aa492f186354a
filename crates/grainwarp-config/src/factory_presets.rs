//! Factory presets bundled with grainwarp.
//!
//! Always available without external files. Each is a starting point for a
//! common treatment: plain playback, darkened lo-fi, a thinned-out top end,
//! half-speed and a pitched-up double-time voice.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "lofi", "thin", "halftime", "chipmunk"];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("lofi", LOFI_PRESET),
    ("thin", THIN_PRESET),
    ("halftime", HALFTIME_PRESET),
    ("chipmunk", CHIPMUNK_PRESET),
];

/// Default preset - unity playback, no filtering.
const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Unity speed and pitch, filter bypassed"
"#;

/// Lo-fi preset - dark, slightly slowed, polynomial trig.
const LOFI_PRESET: &str = r#"
name = "Lofi"
description = "Dark low-pass, long grains, a touch slower"

[tuning]
trig = "polynomial"

[render]
grain_seconds = 0.03
stretch_rate = 0.9
volume = 0.9
filter_depth = -0.7
continuous_filter = true
"#;

/// Thin preset - high-pass for a small-speaker sound.
const THIN_PRESET: &str = r#"
name = "Thin"
description = "High-pass that strips the low end"

[render]
filter_depth = 0.6
continuous_filter = true
"#;

/// Halftime preset - half speed, original pitch.
const HALFTIME_PRESET: &str = r#"
name = "Halftime"
description = "Half speed at the original pitch"

[render]
grain_seconds = 0.02
stretch_rate = 0.5
"#;

/// Chipmunk preset - octave up at the original duration.
const CHIPMUNK_PRESET: &str = r#"
name = "Chipmunk"
description = "One octave up, original duration"

[render]
grain_seconds = 0.01
stretch_rate = 0.5
pitch_rate = 2.0
filter_depth = 0.2
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use grainwarp_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {:?}", preset.name, preset.description);
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name, case-insensitive.
///
/// # Example
///
/// ```rust
/// use grainwarp_config::get_factory_preset;
///
/// let preset = get_factory_preset("halftime").unwrap();
/// assert_eq!(preset.render.stretch_rate, 0.5);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name matches any factory preset (case-insensitive).
///
/// ```rust
/// use grainwarp_config::is_factory_preset;
///
/// assert!(is_factory_preset("Lofi"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
