//! Per-sample gradient vectors and shape validation.

use ndarray::{Dimension, IxDyn};

use crate::error::{DpError, Result};
use crate::tensor::{squared_l2_norm, Tensor};

/// One sample's gradient: one tensor per model parameter group, in the
/// model's parameter order.
pub type GradientVector = Vec<Tensor>;

/// Expected tensor shapes for every parameter group of a model.
///
/// Captured once from the parameters and used to reject malformed gradient
/// vectors before they reach clipping or aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeSpec {
    shapes: Vec<IxDyn>,
}

impl ShapeSpec {
    /// Capture the shapes of a parameter slice.
    pub fn from_params(params: &[Tensor]) -> Self {
        Self {
            shapes: params.iter().map(|p| p.raw_dim()).collect(),
        }
    }

    /// Number of parameter groups.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the spec describes zero parameter groups.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of scalar elements across all groups.
    pub fn element_count(&self) -> usize {
        self.shapes.iter().map(|s| s.size()).sum()
    }

    /// Check a gradient vector against the expected shapes.
    ///
    /// `sample` is the batch index reported on mismatch.
    pub fn check(&self, grads: &[Tensor], sample: usize) -> Result<()> {
        if grads.len() != self.shapes.len() {
            return Err(DpError::shape_mismatch(
                sample,
                format!(
                    "expected {} tensors, got {}",
                    self.shapes.len(),
                    grads.len()
                ),
            ));
        }
        for (i, (grad, shape)) in grads.iter().zip(self.shapes.iter()).enumerate() {
            if grad.raw_dim() != *shape {
                return Err(DpError::shape_mismatch(
                    sample,
                    format!(
                        "tensor {i}: expected shape {:?}, got {:?}",
                        shape.slice(),
                        grad.shape()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// A zero gradient vector with these shapes.
    pub fn zeros(&self) -> GradientVector {
        self.shapes
            .iter()
            .map(|s| Tensor::zeros(s.clone()))
            .collect()
    }
}

/// Global L2 norm across every element of every tensor in the vector.
pub fn global_l2_norm(grads: &[Tensor]) -> f64 {
    let mut sum_sq = 0.0_f64;
    for t in grads {
        sum_sq += squared_l2_norm(t);
    }
    sum_sq.sqrt()
}
