use dpsgd::{provider_fn, PrivacyParams, PrivateStep, Result, SeedCommitter, StepContext, Tensor};

fn make_tensor(v: &[f64]) -> Tensor {
    ndarray::Array1::from_vec(v.to_vec()).into_dyn()
}

fn main() -> Result<()> {
    // One scalar weight fit to y = 2x; per-sample gradient of (w*x - y)^2.
    let provider = provider_fn(|model: &[Tensor], sample: &(f64, f64)| {
        let w = model[0][[0]];
        let (x, y) = *sample;
        Ok(vec![make_tensor(&[2.0 * (w * x - y) * x])])
    });

    let params = PrivacyParams::new(1.0, 0.01, 1.1)?;
    let step = PrivateStep::new(params)?;
    let mut committer = SeedCommitter::new();

    let mut model = vec![make_tensor(&[0.0])];
    let batch = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0), (0.5, 1.0)];

    for t in 0..5u64 {
        let context = StepContext::new("demo-run", t, 0);
        let (report, commitment) =
            step.run_committed(&provider, &mut model, &batch, &mut committer, &context)?;
        println!(
            "step {t}: w = {:+.4}, clipped {}/{}, commitment {}",
            model[0][[0]],
            report.clipped,
            report.batch_size,
            commitment.to_hex()
        );
    }
    Ok(())
}
