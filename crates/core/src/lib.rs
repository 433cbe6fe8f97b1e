//! Numeric core for differentially private SGD steps.
//!
//! This crate provides framework-agnostic building blocks for one private
//! training step: per-sample clipping, ordered mean aggregation, and
//! Box-Muller Gaussian noise calibrated by a clipping norm.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod clipping;
pub mod error;
pub mod gradient;
pub mod noise;
pub mod params;
pub mod tensor;

pub use aggregate::mean_gradient;
pub use clipping::{clip_factor, clip_in_place, clip_sample, ClipReport};
pub use error::{DpError, Result};
pub use gradient::{global_l2_norm, GradientVector, ShapeSpec};
pub use noise::{box_muller, fill_gaussian, gaussian_like, standard_normal, GaussianMechanism};
pub use params::PrivacyParams;
pub use tensor::{l2_norm, squared_l2_norm, Scalar, Tensor};

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::{
        box_muller, clip_factor, clip_in_place, clip_sample, fill_gaussian, gaussian_like,
        global_l2_norm, l2_norm, mean_gradient, standard_normal, ClipReport, DpError,
        GaussianMechanism, GradientVector, PrivacyParams, Result, Scalar, ShapeSpec, Tensor,
    };
}
