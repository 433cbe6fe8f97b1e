//! Step-level privacy configuration.

use crate::error::{DpError, Result};

/// Privacy parameters for one training step.
///
/// Immutable per step; validated before any computation touches them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrivacyParams {
    /// Clipping norm C applied to each sample's gradient.
    pub clip_norm: f64,
    /// Learning rate eta for the parameter update.
    pub learning_rate: f64,
    /// Noise multiplier sigma; the injected noise has stddev sigma * C.
    pub noise_multiplier: f64,
}

impl PrivacyParams {
    /// Create validated parameters.
    pub fn new(clip_norm: f64, learning_rate: f64, noise_multiplier: f64) -> Result<Self> {
        let params = Self {
            clip_norm,
            learning_rate,
            noise_multiplier,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.clip_norm.is_finite() || self.clip_norm <= 0.0 {
            return Err(DpError::config(format!(
                "clip_norm must be positive and finite, got {}",
                self.clip_norm
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(DpError::config(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !self.noise_multiplier.is_finite() || self.noise_multiplier < 0.0 {
            return Err(DpError::config(format!(
                "noise_multiplier must be non-negative and finite, got {}",
                self.noise_multiplier
            )));
        }
        Ok(())
    }

    /// Standard deviation of the injected noise (sigma * C).
    pub fn noise_stddev(&self) -> f64 {
        self.noise_multiplier * self.clip_norm
    }
}
