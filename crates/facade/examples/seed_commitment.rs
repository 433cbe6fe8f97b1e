use dpsgd::{Result, SeedCommitter, StepContext};

fn main() -> Result<()> {
    let mut committer = SeedCommitter::new();
    let context = StepContext::new("trainingABC", 100, 5);
    let committed = committer.generate(&context)?;

    println!("Context:           {context}");
    println!("Commitment (hex):  {}", committed.commitment.to_hex());
    println!("Seed (hex):        {}", committed.seed.to_hex());
    println!("Seed size (bytes): {}", committed.seed.as_bytes().len());
    Ok(())
}
