//! Commit-reveal derivation of audit-bound noise seeds.
//!
//! Each training step can bind its noise randomness to a
//! (training run, step, batch) context before the noise is drawn: a fresh
//! secret key is committed under the context, blinded, and XOR-folded into
//! an unbiased 32-byte seed. Publishing the commitment ahead of the draw
//! lets an auditor verify later that the randomness was not chosen after
//! seeing its effect.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod engine;
pub mod protocol;
pub mod seed;

pub use context::StepContext;
pub use engine::{Digest32, DigestEngine, EntropySource, OsEntropy, Sha256Engine, DIGEST_SIZE};
pub use protocol::{blind, commit, xor_bytes, CommittedSeed, SeedCommitter};
pub use seed::{Commitment, Seed};

/// Common imports for seed derivation.
pub mod prelude {
    pub use crate::{
        blind, commit, xor_bytes, CommittedSeed, Commitment, DigestEngine, EntropySource,
        OsEntropy, Seed, SeedCommitter, Sha256Engine, StepContext, DIGEST_SIZE,
    };
}
