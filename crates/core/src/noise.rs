//! Gaussian noise via the Box-Muller transform.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::{DpError, Result};
use crate::gradient::{GradientVector, ShapeSpec};
use crate::tensor::{Scalar, Tensor};

/// Box-Muller transform: map two uniform draws to one standard normal draw.
///
/// `u1` must lie in (0, 1]; zero would send the logarithm to -infinity.
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    debug_assert!(u1 > 0.0 && u1 <= 1.0, "u1 must be in (0, 1], got {u1}");
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// One standard normal draw from `rng`.
///
/// `gen::<f64>()` yields values in [0, 1); reflecting the first draw to
/// `1.0 - x` keeps it strictly positive for the logarithm.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    box_muller(u1, u2)
}

/// Overwrite a tensor with i.i.d. Gaussian(0, stddev) values.
///
/// A zero stddev writes exact zeros without consuming the generator.
pub fn fill_gaussian<R: Rng + ?Sized>(tensor: &mut Tensor, stddev: f64, rng: &mut R) {
    debug_assert!(
        stddev.is_finite() && stddev >= 0.0,
        "stddev must be non-negative and finite, got {stddev}"
    );
    if stddev == 0.0 {
        tensor.fill(0.0 as Scalar);
        return;
    }
    tensor.mapv_inplace(|_| (stddev * standard_normal(rng)) as Scalar);
}

/// A fresh noise vector shaped by `spec`, elementwise Gaussian(0, stddev).
pub fn gaussian_like<R: Rng + ?Sized>(spec: &ShapeSpec, stddev: f64, rng: &mut R) -> GradientVector {
    let mut out = spec.zeros();
    if stddev == 0.0 {
        return out;
    }
    for t in out.iter_mut() {
        fill_gaussian(t, stddev, rng);
    }
    out
}

/// Gaussian mechanism calibrated by a noise multiplier and sensitivity bound.
#[derive(Clone, Copy, Debug)]
pub struct GaussianMechanism {
    noise_multiplier: f64,
    sensitivity: f64,
}

impl GaussianMechanism {
    /// Create a mechanism. The multiplier may be zero (no noise); the
    /// sensitivity must be positive.
    pub fn new(noise_multiplier: f64, sensitivity: f64) -> Result<Self> {
        if !noise_multiplier.is_finite() || noise_multiplier < 0.0 {
            return Err(DpError::config(format!(
                "noise multiplier must be non-negative and finite, got {noise_multiplier}"
            )));
        }
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(DpError::config(format!(
                "sensitivity must be positive and finite, got {sensitivity}"
            )));
        }
        Ok(Self {
            noise_multiplier,
            sensitivity,
        })
    }

    /// Noise standard deviation: multiplier times sensitivity.
    pub fn stddev(&self) -> f64 {
        self.noise_multiplier * self.sensitivity
    }

    /// Draw one noise vector shaped by `spec`.
    pub fn noise_like<R: Rng + ?Sized>(&self, spec: &ShapeSpec, rng: &mut R) -> GradientVector {
        gaussian_like(spec, self.stddev(), rng)
    }
}
