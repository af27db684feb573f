//! Scaling report for degree reduction.
//!
//! Reduces random PUBOs of increasing size and degree and reports how many
//! ancillas and penalty blocks the reduction needs, how large the resulting
//! QUBO is, and how long the full labeled `to_qubo` pipeline takes.
//!
//! Pass `--json` to print one JSON summary per line instead of the tables.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use pubo_core::{Format, Label, Polynomial, Result};

const NUM_VARIABLES: [usize; 4] = [16, 32, 64, 128];
const MAX_DEGREES: [usize; 5] = [3, 4, 6, 8, 12];
const TERMS_PER_VARIABLE: usize = 4;

fn random_pubo(rng: &mut StdRng, n: usize, max_degree: usize) -> Result<Polynomial<usize>> {
    let mut p = Polynomial::new(Format::Pubo);
    for _ in 0..n * TERMS_PER_VARIABLE {
        let degree = rng.gen_range(1..=max_degree);
        let key: Vec<usize> = (0..degree).map(|_| rng.gen_range(0..n)).collect();
        p.accumulate(key, f64::from(rng.gen_range(-20i32..=20)))?;
    }
    Ok(p)
}

fn main() -> Result<()> {
    env_logger::init();
    let json = std::env::args().any(|arg| arg == "--json");
    let mut rng = StdRng::seed_from_u64(12345);

    if !json {
        println!("================================================================");
        println!("  SCALING: ancilla-based degree reduction");
        println!("================================================================\n");
        println!(
            "  {:>5} {:>6} {:>7} {:>9} {:>9} {:>9} {:>10}",
            "n", "degree", "terms", "ancillas", "penalties", "qubo", "time_us"
        );
        println!("  {}", "-".repeat(62));
    }

    for &n in &NUM_VARIABLES {
        for &max_degree in &MAX_DEGREES {
            let pubo = random_pubo(&mut rng, n, max_degree)?;
            let labeled = pubo.try_relabel(|&i| Ok(Label::from(format!("v{i}"))))?;

            let start = Instant::now();
            let qubo = labeled.to_qubo()?;
            let elapsed = start.elapsed();

            let summary = qubo.reduction_summary();
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "max_degree": max_degree,
                        "input_terms": pubo.num_terms(),
                        "time_us": elapsed.as_micros() as u64,
                        "summary": summary,
                    })
                );
            } else {
                println!(
                    "  {:>5} {:>6} {:>7} {:>9} {:>9} {:>9} {:>10}",
                    summary.num_variables,
                    max_degree,
                    pubo.num_terms(),
                    summary.num_ancillas,
                    summary.penalty_blocks,
                    summary.num_terms,
                    elapsed.as_micros()
                );
            }
        }
    }

    Ok(())
}
