//! Step context identifying one noise draw.

use std::fmt;

/// Identifies one (training run, step, batch) for seed derivation.
///
/// Uniqueness across invocations is the caller's responsibility, e.g. by
/// monotonically increasing the step and batch counters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StepContext {
    /// Opaque training run identifier.
    pub training_id: String,
    /// Step index within the run.
    pub step: u64,
    /// Batch identifier within the step.
    pub batch_id: u64,
}

impl StepContext {
    /// Create a context.
    pub fn new(training_id: impl Into<String>, step: u64, batch_id: u64) -> Self {
        Self {
            training_id: training_id.into(),
            step,
            batch_id,
        }
    }

    /// Canonical byte encoding fed into the commitment.
    ///
    /// The training id is length-prefixed and the counters are fixed-width,
    /// so no choice of field values can collide across field boundaries.
    pub fn encode(&self) -> Vec<u8> {
        let id = self.training_id.as_bytes();
        let mut out = Vec::with_capacity(8 + id.len() + 16);
        out.extend_from_slice(&(id.len() as u64).to_le_bytes());
        out.extend_from_slice(id);
        out.extend_from_slice(&self.step.to_le_bytes());
        out.extend_from_slice(&self.batch_id.to_le_bytes());
        out
    }
}

impl fmt::Display for StepContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.training_id, self.step, self.batch_id)
    }
}
