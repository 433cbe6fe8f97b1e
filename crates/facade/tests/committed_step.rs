use dpsgd::{
    provider_fn, GradientVector, PrivacyParams, PrivateStep, Seed, SeedCommitter, StepContext,
    Tensor,
};

fn make_tensor(v: &[f64]) -> Tensor {
    ndarray::Array1::from_vec(v.to_vec()).into_dyn()
}

fn echo_provider() -> impl dpsgd::GradientProvider<Sample = GradientVector> {
    provider_fn(|_model: &[Tensor], sample: &GradientVector| Ok(sample.clone()))
}

#[test]
fn repeated_committed_steps_bind_distinct_seeds() {
    let mut committer = SeedCommitter::new();
    let context = StepContext::new("trainingABC", 100, 5);

    let first = committer.generate(&context).unwrap();
    let second = committer.generate(&context).unwrap();

    assert_ne!(first.seed.as_bytes(), second.seed.as_bytes());
    assert_ne!(first.commitment.to_hex(), second.commitment.to_hex());
    assert_eq!(first.seed.to_hex().len(), 64);
    assert_eq!(first.commitment.to_hex().len(), 64);
}

#[test]
fn seeded_noise_reproduces_the_exact_update() {
    let provider = echo_provider();
    let step = PrivateStep::new(PrivacyParams::new(1.0, 0.01, 1.1).unwrap()).unwrap();
    let batch = vec![
        vec![make_tensor(&[3.0, 4.0])],
        vec![make_tensor(&[0.3, 0.4])],
    ];
    let seed = Seed::from_bytes([9u8; 32]);

    let mut model_a = vec![make_tensor(&[0.5, -0.5])];
    let mut rng = seed.to_rng();
    step.run(&provider, &mut model_a, &batch, &mut rng).unwrap();

    let mut model_b = vec![make_tensor(&[0.5, -0.5])];
    let mut rng = seed.to_rng();
    step.run(&provider, &mut model_b, &batch, &mut rng).unwrap();

    assert_eq!(model_a, model_b);
}

#[test]
fn commit_then_run_leaves_an_auditable_trail() {
    let provider = echo_provider();
    let step = PrivateStep::new(PrivacyParams::new(1.0, 0.1, 0.5).unwrap()).unwrap();
    let mut committer = SeedCommitter::new();
    let mut model = vec![make_tensor(&[1.0, 1.0])];
    let batch = vec![vec![make_tensor(&[0.1, -0.2])]];

    let mut transcript: Vec<(String, String)> = Vec::new();
    for t in 0..3u64 {
        let context = StepContext::new("auditable-run", t, 0);
        let (report, commitment) = step
            .run_committed(&provider, &mut model, &batch, &mut committer, &context)
            .unwrap();
        assert_eq!(report.batch_size, 1);
        transcript.push((context.to_string(), commitment.to_hex()));
    }

    // Three steps, three distinct context/commitment pairs.
    assert_eq!(transcript.len(), 3);
    assert_ne!(transcript[0].1, transcript[1].1);
    assert_ne!(transcript[1].1, transcript[2].1);
    assert_eq!(transcript[0].0, "auditable-run|0|0");
}

#[test]
fn committed_runs_differ_without_a_pinned_seed() {
    let provider = echo_provider();
    let step = PrivateStep::new(PrivacyParams::new(1.0, 0.1, 1.0).unwrap()).unwrap();
    let mut committer = SeedCommitter::new();
    let context = StepContext::new("fresh-noise", 0, 0);
    let batch = vec![vec![make_tensor(&[0.2, 0.2])]];

    let mut model_a = vec![make_tensor(&[0.0, 0.0])];
    step.run_committed(&provider, &mut model_a, &batch, &mut committer, &context)
        .unwrap();

    let mut model_b = vec![make_tensor(&[0.0, 0.0])];
    step.run_committed(&provider, &mut model_b, &batch, &mut committer, &context)
        .unwrap();

    // The key is resampled per call, so the noise streams diverge.
    assert_ne!(model_a, model_b);
}
