//! WAV file I/O for grainwarp.
//!
//! The stretch kernel works on mono 16-bit PCM. This crate gets audio in and
//! out of that shape:
//!
//! - [`read_wav`] loads any PCM or float WAV as mono `i16`, mixing channels
//!   down and rescaling other bit depths
//! - [`write_wav`] stores mono `i16` samples as a 16-bit WAV
//! - [`read_wav_info`] reads the header only
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grainwarp_io::{read_wav, write_wav};
//!
//! let (samples, info) = read_wav("input.wav")?;
//! write_wav("copy.wav", &samples, info.sample_rate)?;
//! # Ok::<(), grainwarp_io::Error>(())
//! ```

mod wav;

pub use wav::{WavFormat, WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's sample format cannot be converted to 16-bit PCM.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
