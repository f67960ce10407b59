//! Time-domain excitation.

use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

/// A Gaussian-enveloped sinusoidal pulse.
///
/// ```text
/// amplitude(t) = exp(-½ ((t − t0) / spread)²) · sin(2π t / period)
/// ```
///
/// Stateless: the amplitude depends only on the step index. With the
/// defaults the envelope is negligible (< 1e-6) after roughly step 105,
/// long before the pulse reaches the far edge of a 300-cell grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianPulse {
    /// Envelope centre, in steps. Default: 40.
    pub t0: f64,
    /// Envelope standard deviation, in steps. Default: 12.
    pub spread: f64,
    /// Carrier period, in steps. Default: 20.
    pub period: f64,
}

impl Default for GaussianPulse {
    fn default() -> Self {
        Self {
            t0: 40.0,
            spread: 12.0,
            period: 20.0,
        }
    }
}

impl GaussianPulse {
    /// Source amplitude injected at `step`.
    pub fn amplitude(&self, step: u64) -> f64 {
        let t = step as f64;
        let z = (t - self.t0) / self.spread;
        (-0.5 * z * z).exp() * (2.0 * PI * t / self.period).sin()
    }

    /// Check that the pulse parameters produce finite amplitudes.
    ///
    /// # Errors
    ///
    /// [`SourceError`] naming the first parameter that is not finite, or
    /// that is not strictly positive where required.
    pub fn validate(&self) -> Result<(), SourceError> {
        if !self.t0.is_finite() {
            return Err(SourceError::NonFiniteOffset { value: self.t0 });
        }
        if !(self.spread > 0.0 && self.spread.is_finite()) {
            return Err(SourceError::InvalidSpread { value: self.spread });
        }
        if !(self.period > 0.0 && self.period.is_finite()) {
            return Err(SourceError::InvalidPeriod { value: self.period });
        }
        Ok(())
    }
}

/// Errors from [`GaussianPulse::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceError {
    /// The envelope centre `t0` is NaN or infinite.
    NonFiniteOffset {
        /// The rejected value.
        value: f64,
    },
    /// The envelope spread is NaN, infinite, zero, or negative.
    InvalidSpread {
        /// The rejected value.
        value: f64,
    },
    /// The carrier period is NaN, infinite, zero, or negative.
    InvalidPeriod {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteOffset { value } => write!(f, "t0 must be finite, got {value}"),
            Self::InvalidSpread { value } => {
                write!(f, "spread must be finite and > 0, got {value}")
            }
            Self::InvalidPeriod { value } => {
                write!(f, "period must be finite and > 0, got {value}")
            }
        }
    }
}

impl Error for SourceError {}
