//! Error types for the stretch kernel.
//!
//! Every failure is detected before the first buffer access and is
//! deterministic: the same arguments always produce the same error.

use thiserror::Error;

/// Which of the two PCM buffers failed a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// The read-only source buffer.
    Source,
    /// The caller-supplied output buffer.
    Output,
}

impl core::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Errors reported by parameter validation and the stretch driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StretchError {
    /// A numeric argument is outside its valid domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A buffer is shorter than the access pattern derived from the parameters.
    #[error("{buffer} buffer too small: need {required} samples, have {available}")]
    BufferTooSmall {
        /// The buffer that is too small.
        buffer: BufferKind,
        /// Samples the call would touch.
        required: usize,
        /// Samples the buffer holds.
        available: usize,
    },
}

impl StretchError {
    /// Create an invalid argument error.
    pub const fn invalid(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { name, reason }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, StretchError>;
