//! Commit-reveal seed derivation.
//!
//! One derivation runs five steps: encode the context, draw a fresh secret
//! key k, commit c = H(k || context), blind r = H(c), output s = k XOR r,
//! then wipe k and r. XOR against the uniform k keeps s uniform no matter
//! what structure r carries, and a commitment published before the noise
//! draw binds the eventual seed to its step context.

use zeroize::{Zeroize, Zeroizing};

use dpsgd_core::Result;

use crate::context::StepContext;
use crate::engine::{Digest32, DigestEngine, EntropySource, OsEntropy, Sha256Engine, DIGEST_SIZE};
use crate::seed::{Commitment, Seed};

/// Commit to a key under a context: H(k || context).
pub fn commit<D: DigestEngine>(engine: &D, key: &[u8], context: &[u8]) -> Result<Commitment> {
    let mut buf = Vec::with_capacity(key.len() + context.len());
    buf.extend_from_slice(key);
    buf.extend_from_slice(context);
    let digest = engine.digest(&buf);
    // The buffer holds a copy of the secret key; wipe before propagating.
    buf.zeroize();
    Ok(Commitment::from_bytes(digest?))
}

/// Blind value derived from a commitment: H(c).
pub fn blind<D: DigestEngine>(engine: &D, commitment: &Commitment) -> Result<Digest32> {
    engine.digest(commitment.as_bytes())
}

/// Byte-wise XOR of two digest-sized values.
pub fn xor_bytes(a: &Digest32, b: &Digest32) -> Digest32 {
    let mut out = [0u8; DIGEST_SIZE];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}

/// A derived seed together with the commitment that binds it.
#[derive(Clone, Debug)]
pub struct CommittedSeed {
    /// The unbiased noise seed.
    pub seed: Seed,
    /// Commitment over the secret key and context. Callers keep it next to
    /// the context in their audit trail.
    pub commitment: Commitment,
}

/// Derives audit-bound noise seeds via commit-reveal.
#[derive(Clone, Debug, Default)]
pub struct SeedCommitter<D = Sha256Engine, E = OsEntropy> {
    digest: D,
    entropy: E,
}

impl SeedCommitter {
    /// Committer over SHA-256 and the operating-system entropy source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DigestEngine, E: EntropySource> SeedCommitter<D, E> {
    /// Committer over caller-supplied engines.
    pub fn with_engines(digest: D, entropy: E) -> Self {
        Self { digest, entropy }
    }

    /// Derive a fresh committed seed for one step context.
    ///
    /// The secret key is resampled on every call, so repeating a context
    /// still produces a distinct seed. Entropy or digest failure aborts
    /// the derivation; no weaker source is substituted.
    pub fn generate(&mut self, context: &StepContext) -> Result<CommittedSeed> {
        let encoded = context.encode();

        // k and r are wiped on every exit path, including engine failures.
        let mut key = Zeroizing::new([0u8; DIGEST_SIZE]);
        self.entropy.fill(&mut *key)?;

        let commitment = commit(&self.digest, &*key, &encoded)?;
        let r = Zeroizing::new(blind(&self.digest, &commitment)?);

        let seed = Seed::from_bytes(xor_bytes(&key, &r));
        Ok(CommittedSeed { seed, commitment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpsgd_core::DpError;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    /// Entropy source returning a fixed byte pattern, for pinning k.
    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
            buf.fill(self.0);
            Ok(())
        }
    }

    /// Entropy source that always fails.
    struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill(&mut self, _buf: &mut [u8]) -> Result<()> {
            Err(DpError::entropy("entropy source exhausted"))
        }
    }

    /// Digest engine that always fails.
    struct FailingDigest;

    impl DigestEngine for FailingDigest {
        fn digest(&self, _input: &[u8]) -> Result<Digest32> {
            Err(DpError::hash("digest backend unavailable"))
        }
    }

    #[test]
    fn repeated_generate_yields_distinct_seeds() {
        let mut committer = SeedCommitter::new();
        let ctx = StepContext::new("trainingABC", 100, 5);
        let first = committer.generate(&ctx).unwrap();
        let second = committer.generate(&ctx).unwrap();

        assert_ne!(first.seed.as_bytes(), second.seed.as_bytes());
        assert_ne!(first.seed.to_hex(), second.seed.to_hex());
        assert_eq!(first.seed.to_hex().len(), 64);
        assert_eq!(second.seed.to_hex().len(), 64);
    }

    #[test]
    fn hex_seed_is_lowercase_hex() {
        let mut committer = SeedCommitter::new();
        let ctx = StepContext::new("trainingABC", 100, 5);
        let hex = committer.generate(&ctx).unwrap().seed.to_hex();
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fixed_key_makes_derivation_deterministic() {
        // With k pinned, the protocol is a pure function of the context.
        let ctx = StepContext::new("run", 3, 1);
        let mut a = SeedCommitter::with_engines(Sha256Engine, FixedEntropy(0x5a));
        let mut b = SeedCommitter::with_engines(Sha256Engine, FixedEntropy(0x5a));
        let sa = a.generate(&ctx).unwrap();
        let sb = b.generate(&ctx).unwrap();
        assert_eq!(sa.seed.as_bytes(), sb.seed.as_bytes());
        assert_eq!(sa.commitment, sb.commitment);
    }

    #[test]
    fn commitment_depends_on_context() {
        let mut committer = SeedCommitter::with_engines(Sha256Engine, FixedEntropy(0x11));
        let c1 = committer.generate(&StepContext::new("run", 1, 1)).unwrap();
        let c2 = committer.generate(&StepContext::new("run", 1, 2)).unwrap();
        assert_ne!(c1.commitment, c2.commitment);
        assert_ne!(c1.seed.as_bytes(), c2.seed.as_bytes());
    }

    #[test]
    fn commit_depends_on_key() {
        let ctx = StepContext::new("run", 1, 1).encode();
        let c1 = commit(&Sha256Engine, &[1u8; DIGEST_SIZE], &ctx).unwrap();
        let c2 = commit(&Sha256Engine, &[2u8; DIGEST_SIZE], &ctx).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn xor_round_trips() {
        let a = [0x3cu8; DIGEST_SIZE];
        let b = [0xA5u8; DIGEST_SIZE];
        let x = xor_bytes(&a, &b);
        assert_eq!(xor_bytes(&x, &b), a);
        assert_eq!(xor_bytes(&a, &[0u8; DIGEST_SIZE]), a);
    }

    #[test]
    fn entropy_failure_aborts_with_no_seed() {
        let mut committer = SeedCommitter::with_engines(Sha256Engine, FailingEntropy);
        let err = committer
            .generate(&StepContext::new("run", 0, 0))
            .unwrap_err();
        assert!(matches!(err, DpError::Entropy { .. }));
    }

    #[test]
    fn digest_failure_aborts_with_no_seed() {
        let mut committer = SeedCommitter::with_engines(FailingDigest, FixedEntropy(1));
        let err = committer
            .generate(&StepContext::new("run", 0, 0))
            .unwrap_err();
        assert!(matches!(err, DpError::Hash { .. }));
    }

    #[test]
    fn commitment_avalanche_over_context_changes() {
        // Flipping a single context character should flip about half of the
        // commitment bits. Average the observed fraction over many trials
        // with independently drawn keys.
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut total_fraction = 0.0;
        let trials = 100usize;

        for trial in 0..trials {
            let mut key = [0u8; DIGEST_SIZE];
            rng.fill_bytes(&mut key);

            let base = StepContext::new(format!("training{trial}"), 100, 5);
            let mut mutated_id = base.training_id.clone().into_bytes();
            // Change one character, cycling the position across trials.
            let pos = trial % mutated_id.len();
            mutated_id[pos] ^= 0x01;
            let mutated = StepContext::new(String::from_utf8(mutated_id).unwrap(), 100, 5);

            let c1 = commit(&Sha256Engine, &key, &base.encode()).unwrap();
            let c2 = commit(&Sha256Engine, &key, &mutated.encode()).unwrap();

            let differing: u32 = c1
                .as_bytes()
                .iter()
                .zip(c2.as_bytes().iter())
                .map(|(x, y)| (x ^ y).count_ones())
                .sum();
            total_fraction += differing as f64 / (DIGEST_SIZE as f64 * 8.0);
        }

        let mean_fraction = total_fraction / trials as f64;
        assert!(
            (mean_fraction - 0.5).abs() < 0.05,
            "avalanche fraction {mean_fraction} strays from 0.5"
        );
    }
}
