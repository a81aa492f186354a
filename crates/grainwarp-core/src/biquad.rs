//! Biquad (bi-quadratic) filter structure.
//!
//! A second-order IIR section over a two-sample delay line. Coefficients are
//! kept separate from the delay line so they can be swapped between calls
//! without a discontinuity in the filter's memory.

/// Normalized biquad coefficients (`a0 == 1`).
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward gain on `x[n]`.
    pub b0: f32,
    /// Feedforward gain on `x[n-1]`.
    pub b1: f32,
    /// Feedforward gain on `x[n-2]`.
    pub b2: f32,
    /// Feedback gain on `y[n-1]`.
    pub a1: f32,
    /// Feedback gain on `y[n-2]`.
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Low-pass section for a precomputed `cos(w0)` and damping `alpha`.
    ///
    /// Unity gain at DC, zero gain at Nyquist.
    pub fn lowpass(cos_w0: f32, alpha: f32) -> Self {
        let norm = 1.0 / (1.0 + alpha);
        let b1 = (1.0 - cos_w0) * norm;
        Self {
            b0: b1 * 0.5,
            b1,
            b2: b1 * 0.5,
            a1: -2.0 * cos_w0 * norm,
            a2: (1.0 - alpha) * norm,
        }
    }

    /// High-pass section for a precomputed `cos(w0)` and damping `alpha`.
    ///
    /// Zero gain at DC, unity gain at Nyquist.
    pub fn highpass(cos_w0: f32, alpha: f32) -> Self {
        let norm = 1.0 / (1.0 + alpha);
        let b1 = -(1.0 + cos_w0) * norm;
        Self {
            b0: -b1 * 0.5,
            b1,
            b2: -b1 * 0.5,
            a1: -2.0 * cos_w0 * norm,
            a2: (1.0 - alpha) * norm,
        }
    }

    /// Whether both poles lie strictly inside the unit circle.
    ///
    /// Stability triangle: `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Direct Form I biquad with its delay line.
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self::with_coefficients(BiquadCoefficients::IDENTITY)
    }

    /// Creates a biquad with the given coefficients and a silent delay line.
    pub fn with_coefficients(coefficients: BiquadCoefficients) -> Self {
        Self {
            coefficients,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the coefficients, keeping the delay line.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay line without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
