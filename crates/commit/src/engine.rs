//! Digest and entropy boundaries for the seed protocol.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use dpsgd_core::{DpError, Result};

/// Output size of the digest primitive in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A fixed-size digest value.
pub type Digest32 = [u8; DIGEST_SIZE];

/// One-way digest primitive with a fixed 32-byte output.
///
/// Deterministic. A failing engine is fatal; the step is aborted rather
/// than recovered.
pub trait DigestEngine {
    /// Digest an input byte string.
    fn digest(&self, input: &[u8]) -> Result<Digest32>;
}

/// SHA-256 digest engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Engine;

impl DigestEngine for Sha256Engine {
    fn digest(&self, input: &[u8]) -> Result<Digest32> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        Ok(hasher.finalize().into())
    }
}

/// Cryptographically secure byte generator.
///
/// A failing source is fatal; implementations must never fall back to a
/// weaker generator.
pub trait EntropySource {
    /// Fill `buf` with fresh random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// Operating-system entropy source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| DpError::entropy(e.to_string()))
    }
}
