//! Errors raised while loading, saving and resolving presets.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::ValidationError;

/// Preset I/O, TOML and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset file could not be read.
    #[error("cannot read preset '{path}': {source}")]
    ReadPreset {
        /// File that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A preset file could not be written.
    #[error("cannot write preset '{path}': {source}")]
    WritePreset {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The directory holding a preset could not be created.
    #[error("cannot create preset directory '{path}': {source}")]
    CreatePresetDir {
        /// Directory that was created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Preset text is not valid TOML for a [`Preset`](crate::Preset).
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A preset could not be rendered to TOML.
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory preset, user preset or file matches the name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// The preset parsed but holds unusable values.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn read_preset(path: &Path, source: io::Error) -> Self {
        Self::ReadPreset {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_preset(path: &Path, source: io::Error) -> Self {
        Self::WritePreset {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn create_preset_dir(path: &Path, source: io::Error) -> Self {
        Self::CreatePresetDir {
            path: path.to_path_buf(),
            source,
        }
    }
}
