//! Per-sample gradient clipping for bounded sensitivity.

use crate::error::{DpError, Result};
use crate::gradient::{global_l2_norm, GradientVector, ShapeSpec};
use crate::tensor::Scalar;

/// Result of clipping one sample's gradient.
#[derive(Clone, Copy, Debug)]
pub struct ClipReport {
    /// Global L2 norm before clipping.
    pub original_norm: f64,
    /// Whether clipping changed the gradient.
    pub clipped: bool,
    /// Scale factor applied (1.0 if not clipped).
    pub scale: f64,
}

/// Scale factor that bounds `norm` to `clip_norm`.
///
/// Norms within the bound map to 1.0, including a zero norm, so zero
/// gradients pass through untouched with no division.
pub fn clip_factor(norm: f64, clip_norm: f64) -> f64 {
    if norm <= clip_norm {
        1.0
    } else {
        clip_norm / norm
    }
}

/// Clip a gradient vector to a maximum global L2 norm in place.
///
/// Direction is preserved; only the magnitude changes. The norm is taken
/// over every element of every tensor in the vector.
pub fn clip_in_place(grads: &mut GradientVector, clip_norm: f64) -> Result<ClipReport> {
    if !clip_norm.is_finite() || clip_norm <= 0.0 {
        return Err(DpError::config(format!(
            "clip_norm must be positive and finite, got {clip_norm}"
        )));
    }

    let norm = global_l2_norm(grads);
    let scale = clip_factor(norm, clip_norm);
    if scale != 1.0 {
        for t in grads.iter_mut() {
            t.mapv_inplace(|v| v * (scale as Scalar));
        }
    }
    Ok(ClipReport {
        original_norm: norm,
        clipped: scale != 1.0,
        scale,
    })
}

/// Validate a sample's shapes against the model spec, then clip.
///
/// `sample` is the batch index reported if the gradient provider handed
/// back a malformed vector.
pub fn clip_sample(
    grads: &mut GradientVector,
    spec: &ShapeSpec,
    clip_norm: f64,
    sample: usize,
) -> Result<ClipReport> {
    spec.check(grads, sample)?;
    clip_in_place(grads, clip_norm)
}
