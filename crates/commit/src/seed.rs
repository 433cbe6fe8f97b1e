//! Seed and commitment values.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::engine::{Digest32, DIGEST_SIZE};

/// An unbiased 32-byte noise seed derived by the commit-reveal protocol.
///
/// The seed stays with the caller; debug output shows only a prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; DIGEST_SIZE]);

impl Seed {
    /// Wrap raw seed bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering, exactly 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// A deterministic stream RNG keyed by this seed.
    ///
    /// Driving the noise draw from this generator makes the draw
    /// reproducible for audit once the seed is reconstructed.
    pub fn to_rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::from_seed(self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}..)", hex::encode(&self.0[..8]))
    }
}

/// Commitment binding a secret key to a step context.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Commitment(Digest32);

impl Commitment {
    /// Wrap raw commitment bytes.
    pub fn from_bytes(bytes: Digest32) -> Self {
        Self(bytes)
    }

    /// Raw commitment bytes.
    pub fn as_bytes(&self) -> &Digest32 {
        &self.0
    }

    /// Lowercase hex rendering, exactly 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({}..)", hex::encode(&self.0[..8]))
    }
}
