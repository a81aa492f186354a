//! Polynomial sine and cosine for filter coefficient design.
//!
//! Targets without a usable `sinf`/`cosf` (or where the table-free code size
//! matters more than the last few bits) can select
//! [`TrigMode::Polynomial`](crate::TrigMode::Polynomial). Everything else uses
//! `libm`, which is the default.
//!
//! | Function | Replaces | Valid input | Max abs error |
//! |----------|----------|-------------|---------------|
//! | [`poly_sin`] | `libm::sinf` | any finite angle | < 0.005 |
//! | [`poly_cos`] | `libm::cosf` | any finite angle | < 0.02 |
//! | [`poly_cos`] | `libm::cosf` | `|x| ≤ 2π / 2.5` | < 0.005 |
//!
//! The coefficient mapper only ever asks for `w0 < 2π / 2.5`, where the
//! resulting cutoff error stays well below one semitone.

use core::f32::consts::{FRAC_PI_2, PI, TAU};
use libm::floorf;

/// Fifth-order odd polynomial sine.
///
/// The angle is reduced into `[0, 2π)`, folded onto `[-π/2, π/2]` by the
/// half-wave symmetries, then evaluated as `t − t³/6 + t⁵/120`.
///
/// # Accuracy
///
/// Maximum absolute error: < 0.005, reached at `±π/2`. Error is below 1e-4
/// for `|t| < 0.6`.
///
/// # Examples
///
/// ```
/// use grainwarp_core::fast_math::poly_sin;
///
/// assert!(poly_sin(0.0).abs() < 1e-6);
/// assert!((poly_sin(core::f32::consts::FRAC_PI_2) - 1.0).abs() < 0.005);
/// ```
#[inline]
pub fn poly_sin(x: f32) -> f32 {
    let r = x - TAU * floorf(x / TAU);
    let t = if r < FRAC_PI_2 {
        r
    } else if r < 3.0 * FRAC_PI_2 {
        PI - r
    } else {
        r - TAU
    };
    let t2 = t * t;
    t * (1.0 - t2 / 6.0 * (1.0 - t2 / 20.0))
}

/// Polynomial cosine, `sin(x + π/2)` evaluated through the half angle.
///
/// Computed as `1 − 2·sin²(x/2)` so the result never exceeds 1. The direct
/// form `poly_sin(x + π/2)` peaks at ~1.0045 near `x = 0`, and a biquad
/// designed with `cos(w0) ≥ 1` has a pole on or outside the unit circle.
///
/// # Accuracy
///
/// Maximum absolute error: < 0.005 for `|x| ≤ 2π / 2.5`, < 0.02 elsewhere
/// (worst near `x = π`).
///
/// # Examples
///
/// ```
/// use grainwarp_core::fast_math::poly_cos;
///
/// assert!((poly_cos(0.0) - 1.0).abs() < 1e-6);
/// assert!(poly_cos(0.01) < 1.0);
/// ```
#[inline]
pub fn poly_cos(x: f32) -> f32 {
    let s = poly_sin(0.5 * x);
    1.0 - 2.0 * s * s
}
