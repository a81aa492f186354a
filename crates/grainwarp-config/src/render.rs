//! Per-render controls stored alongside the tuning constants in a preset.

use grainwarp_core::{StretchRequest, tempo_ratio};
use serde::{Deserialize, Serialize};

/// Volumes below this are rendered as silence.
pub const VOLUME_GATE: f32 = 0.02;

/// Grain, rate, level and tone controls for one render.
///
/// # TOML Format
///
/// ```toml
/// [render]
/// grain_seconds = 0.015
/// stretch_rate = 0.5
/// pitch_rate = 1.0
/// volume = 0.8
/// filter_depth = -0.4
/// chunk_seconds = 0.25
/// continuous_filter = true
/// ```
///
/// Missing keys take their [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Grain (stretch block) length in seconds.
    pub grain_seconds: f32,
    /// Playback speed without pitch change. 0.5 is half speed.
    pub stretch_rate: f32,
    /// Read-rate multiplier. 2.0 is an octave up.
    pub pitch_rate: f32,
    /// Linear output gain.
    pub volume: f32,
    /// Tone control in `[-1, 1]`: low-pass below zero, high-pass above.
    pub filter_depth: f32,
    /// Length of each source chunk handed to the kernel, in seconds.
    pub chunk_seconds: f32,
    /// Keep the tone filter's state running from one chunk to the next.
    pub continuous_filter: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            grain_seconds: 0.015,
            stretch_rate: 1.0,
            pitch_rate: 1.0,
            volume: 1.0,
            filter_depth: 0.0,
            chunk_seconds: 0.25,
            continuous_filter: false,
        }
    }
}

impl RenderSettings {
    /// Volume with the silence gate applied.
    pub fn effective_volume(&self) -> f32 {
        if self.volume < VOLUME_GATE {
            0.0
        } else {
            self.volume
        }
    }

    /// The kernel-facing part of these settings.
    pub fn request(&self) -> StretchRequest {
        StretchRequest {
            grain_seconds: self.grain_seconds,
            stretch_rate: self.stretch_rate,
            pitch_rate: self.pitch_rate,
        }
    }

    /// Sets the stretch rate so material at `source_bpm` plays at `bpm`.
    pub fn with_tempo(mut self, bpm: f32, source_bpm: f32) -> Self {
        self.stretch_rate = tempo_ratio(bpm, source_bpm);
        self
    }

    /// Chunk length in samples at `sample_rate`, at least one.
    pub fn chunk_samples(&self, sample_rate: u32) -> usize {
        ((self.chunk_seconds * sample_rate as f32).round() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_gate_silences_quiet_settings() {
        let mut s = RenderSettings {
            volume: 0.019,
            ..RenderSettings::default()
        };
        assert_eq!(s.effective_volume(), 0.0);
        s.volume = 0.02;
        assert_eq!(s.effective_volume(), 0.02);
        s.volume = 1.5;
        assert_eq!(s.effective_volume(), 1.5);
    }

    #[test]
    fn request_carries_rates() {
        let s = RenderSettings {
            grain_seconds: 0.02,
            stretch_rate: 0.5,
            pitch_rate: 2.0,
            ..RenderSettings::default()
        };
        let r = s.request();
        assert_eq!(r.grain_seconds, 0.02);
        assert_eq!(r.stretch_rate, 0.5);
        assert_eq!(r.pitch_rate, 2.0);
    }

    #[test]
    fn tempo_sets_stretch_rate() {
        let s = RenderSettings::default().with_tempo(90.0, 120.0);
        assert_eq!(s.stretch_rate, 0.75);
    }

    #[test]
    fn chunk_samples_rounds() {
        let s = RenderSettings::default();
        assert_eq!(s.chunk_samples(44100), 11025);
        let tiny = RenderSettings {
            chunk_seconds: 0.0,
            ..RenderSettings::default()
        };
        assert_eq!(tiny.chunk_samples(44100), 1);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let s: RenderSettings = toml::from_str("volume = 0.5").unwrap();
        assert_eq!(s.volume, 0.5);
        assert_eq!(s.stretch_rate, 1.0);
        assert!(!s.continuous_filter);
    }
}
