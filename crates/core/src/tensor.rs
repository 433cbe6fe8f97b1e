//! Tensor aliases and norm primitives.

use ndarray::ArrayD;

/// Element type for gradients and parameters (f64 unless the `f32`
/// feature is enabled).
#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

/// Element type for gradients and parameters (f64 unless the `f32`
/// feature is enabled).
#[cfg(feature = "f32")]
pub type Scalar = f32;

/// Dynamic-dimensional tensor.
pub type Tensor = ArrayD<Scalar>;

/// Sum of squared elements, accumulated in f64.
pub fn squared_l2_norm(t: &Tensor) -> f64 {
    let mut sum_sq: f64 = 0.0;
    for &v in t.iter() {
        let v = v as f64;
        sum_sq += v * v;
    }
    sum_sq
}

/// L2 norm of a single tensor. Non-finite elements propagate to the result.
pub fn l2_norm(t: &Tensor) -> f64 {
    squared_l2_norm(t).sqrt()
}
