//! One private training step over externally supplied gradients.

use std::marker::PhantomData;

use rand::Rng;

use dpsgd_commit::{Commitment, DigestEngine, EntropySource, SeedCommitter, StepContext};
use dpsgd_core::{
    clip_sample, gaussian_like, mean_gradient, DpError, GradientVector, PrivacyParams, Result,
    Scalar, ShapeSpec, Tensor,
};

/// Computes one sample's gradient against the current model parameters.
///
/// The step pipeline has no dependency on how gradients are produced;
/// hosts plug in their autodiff or analytic gradients here. One call per
/// sample.
pub trait GradientProvider {
    /// Per-sample input type.
    type Sample;

    /// Gradient of the loss at `sample` with respect to every parameter
    /// tensor, in parameter order.
    fn compute(&self, model: &[Tensor], sample: &Self::Sample) -> Result<GradientVector>;
}

/// Adapter implementing [`GradientProvider`] for a closure.
pub struct FnProvider<S, F> {
    f: F,
    _sample: PhantomData<fn(&S)>,
}

/// Wrap a closure as a [`GradientProvider`].
pub fn provider_fn<S, F>(f: F) -> FnProvider<S, F>
where
    F: Fn(&[Tensor], &S) -> Result<GradientVector>,
{
    FnProvider {
        f,
        _sample: PhantomData,
    }
}

impl<S, F> GradientProvider for FnProvider<S, F>
where
    F: Fn(&[Tensor], &S) -> Result<GradientVector>,
{
    type Sample = S;

    fn compute(&self, model: &[Tensor], sample: &S) -> Result<GradientVector> {
        (self.f)(model, sample)
    }
}

/// Summary of one applied private step.
#[derive(Clone, Debug)]
pub struct StepReport {
    /// Number of samples in the batch.
    pub batch_size: usize,
    /// Pre-clipping gradient norm of each sample, in batch order.
    pub sample_norms: Vec<f64>,
    /// How many samples were clipped.
    pub clipped: usize,
    /// Standard deviation of the injected noise.
    pub noise_stddev: f64,
}

/// One privatized SGD transition per batch.
///
/// Every fallible stage (gradients, clipping, aggregation, noise) finishes
/// before the first parameter write, so a failing step leaves the model
/// untouched.
#[derive(Clone, Copy, Debug)]
pub struct PrivateStep {
    params: PrivacyParams,
}

impl PrivateStep {
    /// Create a step runner, validating the parameters.
    pub fn new(params: PrivacyParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The step's privacy parameters.
    pub fn params(&self) -> &PrivacyParams {
        &self.params
    }

    /// Run one private step: clip each sample's gradient, average in batch
    /// order, add one noise vector (stddev sigma * C), and update every
    /// parameter as `p -= eta * (mean + noise)`.
    ///
    /// Noise is drawn once, after averaging, never per sample. The caller
    /// owns the generator; pass a [`dpsgd_commit::Seed`] stream to make
    /// the draw reproducible for audit.
    pub fn run<P, R>(
        &self,
        provider: &P,
        model: &mut [Tensor],
        batch: &[P::Sample],
        rng: &mut R,
    ) -> Result<StepReport>
    where
        P: GradientProvider,
        R: Rng + ?Sized,
    {
        if batch.is_empty() {
            return Err(DpError::EmptyBatch);
        }

        let spec = ShapeSpec::from_params(model);
        let clip_norm = self.params.clip_norm;

        let mut clipped_grads: Vec<GradientVector> = Vec::with_capacity(batch.len());
        let mut sample_norms = Vec::with_capacity(batch.len());
        let mut clipped = 0usize;

        for (index, sample) in batch.iter().enumerate() {
            let mut grads = provider
                .compute(model, sample)
                .map_err(|e| DpError::computation(index, e.to_string()))?;
            let report = clip_sample(&mut grads, &spec, clip_norm, index)?;
            sample_norms.push(report.original_norm);
            if report.clipped {
                clipped += 1;
            }
            clipped_grads.push(grads);
        }

        let mut update = mean_gradient(&clipped_grads)?;
        let noise_stddev = self.params.noise_stddev();
        let noise = gaussian_like(&spec, noise_stddev, rng);
        for (u, n) in update.iter_mut().zip(noise.iter()) {
            *u += n;
        }

        // Every fallible stage is done; apply the update in one pass.
        let eta = self.params.learning_rate;
        for (param, u) in model.iter_mut().zip(update.iter()) {
            param.zip_mut_with(u, |p, &g| *p -= (eta as Scalar) * g);
        }

        Ok(StepReport {
            batch_size: batch.len(),
            sample_norms,
            clipped,
            noise_stddev,
        })
    }

    /// Run one private step with noise keyed by a committed seed for
    /// `context`.
    ///
    /// The commitment comes back for the caller's audit trail; the secret
    /// key behind it never leaves the committer.
    pub fn run_committed<P, D, E>(
        &self,
        provider: &P,
        model: &mut [Tensor],
        batch: &[P::Sample],
        committer: &mut SeedCommitter<D, E>,
        context: &StepContext,
    ) -> Result<(StepReport, Commitment)>
    where
        P: GradientProvider,
        D: DigestEngine,
        E: EntropySource,
    {
        let committed = committer.generate(context)?;
        let mut rng = committed.seed.to_rng();
        let report = self.run(provider, model, batch, &mut rng)?;
        Ok((report, committed.commitment))
    }
}
