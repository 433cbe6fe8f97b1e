//! Batch aggregation of clipped gradients.

use crate::error::{DpError, Result};
use crate::gradient::GradientVector;
use crate::tensor::{Scalar, Tensor};

/// Elementwise mean of a non-empty batch of same-shaped gradient vectors.
///
/// Accumulates strictly in sample index order and divides by the batch size
/// once at the end, so identical inputs reproduce bit-identical output.
pub fn mean_gradient(samples: &[GradientVector]) -> Result<GradientVector> {
    let first = samples.first().ok_or(DpError::EmptyBatch)?;

    let mut sum: GradientVector = first.iter().map(|t| Tensor::zeros(t.raw_dim())).collect();

    for (index, sample) in samples.iter().enumerate() {
        if sample.len() != sum.len() {
            return Err(DpError::shape_mismatch(
                index,
                format!("expected {} tensors, got {}", sum.len(), sample.len()),
            ));
        }
        for (acc, t) in sum.iter_mut().zip(sample.iter()) {
            if acc.raw_dim() != t.raw_dim() {
                return Err(DpError::shape_mismatch(
                    index,
                    format!("expected shape {:?}, got {:?}", acc.shape(), t.shape()),
                ));
            }
            *acc += t;
        }
    }

    let n = samples.len() as f64;
    for acc in sum.iter_mut() {
        acc.mapv_inplace(|v| v / (n as Scalar));
    }
    Ok(sum)
}
