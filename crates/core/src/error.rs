//! Error types for private training operations.

/// Errors that can occur while preparing or applying a private step.
#[derive(Debug, thiserror::Error)]
pub enum DpError {
    /// Rejected configuration (clip norm, learning rate, noise multiplier).
    #[error("configuration error: {msg}")]
    Config {
        /// Human-readable error description.
        msg: String,
    },

    /// Gradient tensors disagree with the expected parameter shapes.
    #[error("shape mismatch at sample {sample}: {msg}")]
    ShapeMismatch {
        /// Index of the offending sample within the batch.
        sample: usize,
        /// Human-readable error description.
        msg: String,
    },

    /// A batch with zero samples was submitted for aggregation.
    #[error("empty batch: at least one sample is required")]
    EmptyBatch,

    /// The secure random source failed or is unavailable.
    #[error("entropy source failure: {msg}")]
    Entropy {
        /// Human-readable error description.
        msg: String,
    },

    /// The digest engine failed.
    #[error("digest engine failure: {msg}")]
    Hash {
        /// Human-readable error description.
        msg: String,
    },

    /// The external gradient provider failed for one sample.
    #[error("gradient computation failed at sample {sample}: {msg}")]
    Computation {
        /// Index of the offending sample within the batch.
        sample: usize,
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for private training operations.
pub type Result<T> = std::result::Result<T, DpError>;

impl DpError {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config { msg: msg.into() }
    }

    /// Create a shape mismatch error for a given sample index.
    pub fn shape_mismatch<S: Into<String>>(sample: usize, msg: S) -> Self {
        Self::ShapeMismatch {
            sample,
            msg: msg.into(),
        }
    }

    /// Create an entropy failure error.
    pub fn entropy<S: Into<String>>(msg: S) -> Self {
        Self::Entropy { msg: msg.into() }
    }

    /// Create a digest failure error.
    pub fn hash<S: Into<String>>(msg: S) -> Self {
        Self::Hash { msg: msg.into() }
    }

    /// Create a gradient computation error for a given sample index.
    pub fn computation<S: Into<String>>(sample: usize, msg: S) -> Self {
        Self::Computation {
            sample,
            msg: msg.into(),
        }
    }

    /// Whether this error is a cryptographic failure that must never be
    /// recovered by substituting weaker primitives.
    pub fn is_fail_closed(&self) -> bool {
        matches!(self, Self::Entropy { .. } | Self::Hash { .. })
    }
}
