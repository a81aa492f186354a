//! 16-bit PCM buffer access.
//!
//! The driver works in `f32` sample units (full scale ±32768) and only meets
//! the 16-bit type at two points: reading the source and storing the result.
//! [`PcmSource`] and [`PcmSink`] abstract those two points so the same driver
//! runs over `[i16]` slices and over raw little-endian byte buffers handed in
//! by a host.

use libm::roundf;

/// Read-only, random-access mono 16-bit samples.
pub trait PcmSource {
    /// Number of whole samples available.
    fn len(&self) -> usize;

    /// Sample at `index`. Callers guarantee `index < self.len()`.
    fn sample(&self, index: usize) -> i16;

    /// Whether no samples are available.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write-only, random-access mono 16-bit samples.
pub trait PcmSink {
    /// Number of whole samples that fit.
    fn capacity(&self) -> usize;

    /// Stores `value` at `index`. Callers guarantee `index < self.capacity()`.
    fn set_sample(&mut self, index: usize, value: i16);
}

impl PcmSource for [i16] {
    #[inline]
    fn len(&self) -> usize {
        <[i16]>::len(self)
    }

    #[inline]
    fn sample(&self, index: usize) -> i16 {
        self[index]
    }
}

impl PcmSink for [i16] {
    #[inline]
    fn capacity(&self) -> usize {
        self.len()
    }

    #[inline]
    fn set_sample(&mut self, index: usize, value: i16) {
        self[index] = value;
    }
}

/// Little-endian 16-bit samples viewed over a byte buffer.
///
/// A trailing odd byte is not part of any sample.
#[derive(Debug, Clone, Copy)]
pub struct LeBytes<'a>(pub &'a [u8]);

impl PcmSource for LeBytes<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len() / 2
    }

    #[inline]
    fn sample(&self, index: usize) -> i16 {
        let i = index * 2;
        i16::from_le_bytes([self.0[i], self.0[i + 1]])
    }
}

/// Mutable little-endian 16-bit samples viewed over a byte buffer.
#[derive(Debug)]
pub struct LeBytesMut<'a>(pub &'a mut [u8]);

impl PcmSink for LeBytesMut<'_> {
    #[inline]
    fn capacity(&self) -> usize {
        self.0.len() / 2
    }

    #[inline]
    fn set_sample(&mut self, index: usize, value: i16) {
        let i = index * 2;
        self.0[i..i + 2].copy_from_slice(&value.to_le_bytes());
    }
}

/// Saturating conversion from `f32` sample units to `i16`.
///
/// Rounds to nearest, clamps to `[-32768, 32767]` instead of wrapping, and
/// maps NaN to silence.
#[inline]
pub fn narrow(x: f32) -> i16 {
    if x.is_nan() {
        return 0;
    }
    roundf(x).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}
