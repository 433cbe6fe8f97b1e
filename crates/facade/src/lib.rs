//! Differentially private SGD steps with committed, auditable noise seeds.
//!
//! One call runs a whole private step: per-sample gradients from a
//! caller-supplied provider are clipped, averaged in batch order, offset by
//! a single Gaussian noise vector, and folded into the model parameters.
//! The noise randomness can be bound to a (training run, step, batch)
//! context through a commit-reveal seed, so an auditor can later check
//! that it was not chosen after the fact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod training;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dpsgd_commit as commit;
pub use dpsgd_core as core;

pub use dpsgd_commit::{CommittedSeed, Commitment, Seed, SeedCommitter, StepContext};
pub use dpsgd_core::{
    ClipReport, DpError, GaussianMechanism, GradientVector, PrivacyParams, Result, Scalar,
    ShapeSpec, Tensor,
};
pub use training::{provider_fn, FnProvider, GradientProvider, PrivateStep, StepReport};

/// Convenience prelude covering the private-step workflow.
pub mod prelude {
    pub use crate::training::{provider_fn, FnProvider, GradientProvider, PrivateStep, StepReport};
    pub use dpsgd_commit::prelude::*;
    pub use dpsgd_core::prelude::*;
}
