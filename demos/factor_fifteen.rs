//! Factors 15 with the bundled state-vector simulator and prints every stage.

use qshor::{FactorOutcome, Resolution, Shor, ShorConfig, ShorError, factor};

fn main() -> Result<(), ShorError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("--- qshor Example: factoring N = 15 ---");

    // --- Top-level entry point ---
    let (f1, f2) = factor(15, 7)?;
    println!("\nfactor(15, 7) = ({:?}, {:?})", f1, f2);

    // --- Full run with the model and distribution kept ---
    let config = ShorConfig::default().with_counting_width(6).with_shots(512);
    let run = Shor::with_config(config).run(15, 7)?;

    if let Some(model) = &run.model {
        println!("\nPhase oracle model:\n{}", model);
    }
    if let Some(distribution) = &run.distribution {
        println!("Outcome distribution:\n{}", distribution);
    }

    match &run.outcome {
        FactorOutcome::Factors { pair, via: Resolution::Period(estimate) } => {
            println!("Found {} from {}", pair, estimate);
        }
        FactorOutcome::Factors { pair, via: Resolution::CommonFactor } => {
            println!("Found {} from a shared factor", pair);
        }
        FactorOutcome::NotFound(reason) => println!("No factors: {}", reason),
    }

    // --- Bases sharing a factor with 15 skip simulation ---
    for a in [3, 5, 6, 10] {
        println!("a = {:>2}: {}", a, Shor::new().factor(15, a)?);
    }

    Ok(())
}
