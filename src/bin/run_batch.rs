//! Run projections for every plan in a plans CSV
//!
//! Outputs one summary row per plan for comparison across a book of plans

use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use rayon::prelude::*;

use swp_engine::plan::{load_plans, PlanRow};
use swp_engine::{InvalidInput, Projection, ProjectionConfig, ProjectionEngine};

fn main() {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "plans.csv".to_string());

    let start = Instant::now();
    println!("Loading plans from {}...", path);

    let plans = load_plans(&path).expect("Failed to load plans");
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    let config = ProjectionConfig::default();

    println!("Running projections...");
    let proj_start = Instant::now();

    // Each plan projects independently
    let results: Vec<(&PlanRow, Result<Projection, InvalidInput>)> = plans
        .par_iter()
        .map(|row| {
            let engine = ProjectionEngine::new(config.clone());
            (row, engine.project(&row.plan))
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let output_path = "batch_summary.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(
        file,
        "PlanID,Months,DurationYears,FinalCorpus,TotalWithdrawals,TotalReturns"
    )
    .unwrap();

    let mut failures = 0usize;
    for (row, result) in &results {
        match result {
            Ok(projection) => {
                let s = &projection.summary;
                writeln!(
                    file,
                    "{},{},{:.1},{:.2},{:.2},{:.2}",
                    row.plan_id,
                    s.months,
                    s.duration_years,
                    s.final_corpus_value,
                    s.total_withdrawals,
                    s.total_returns,
                )
                .unwrap();
            }
            Err(e) => {
                failures += 1;
                log::warn!("plan {} rejected: {}", row.plan_id, e);
            }
        }
    }

    println!("Output written to {}", output_path);

    println!("\nBatch Summary:");
    println!("  Plans run: {}", results.len() - failures);
    println!("  Plans rejected: {}", failures);
    if let Some((row, Ok(projection))) = results.iter().find(|(_, r)| r.is_ok()) {
        println!(
            "  Plan {}: {} months, final corpus {:.0}",
            row.plan_id,
            projection.summary.months,
            projection.summary.final_corpus_value
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
}
