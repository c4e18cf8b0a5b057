//! SWP Engine CLI
//!
//! Runs a single systematic withdrawal projection and prints the monthly
//! and yearly breakdowns with summary statistics.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use swp_engine::format::format_currency;
use swp_engine::{ProjectionConfig, ProjectionEngine, SwpPlan, DEFAULT_MAX_MONTHS};

#[derive(Debug, Parser)]
#[command(name = "swp", about = "Systematic withdrawal plan projection")]
struct Args {
    /// Initial invested corpus
    #[arg(long)]
    corpus: f64,

    /// Scheduled monthly withdrawal amount
    #[arg(long)]
    withdrawal: f64,

    /// Annual return rate in percent (e.g. 8 for 8%)
    #[arg(long)]
    return_rate: f64,

    /// Annual inflation rate in percent, steps the withdrawal up yearly
    #[arg(long)]
    inflation_rate: f64,

    /// First withdrawal month (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Hard cap on projection length in months
    #[arg(long, default_value_t = DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Write the full monthly breakdown to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start_date = args.start_date.unwrap_or_else(|| Local::now().date_naive());

    let plan = SwpPlan {
        start_date,
        annual_return_rate: args.return_rate / 100.0,
        annual_inflation_rate: args.inflation_rate / 100.0,
        initial_corpus: args.corpus,
        monthly_withdrawal: args.withdrawal,
    };

    let engine = ProjectionEngine::new(ProjectionConfig {
        max_months: args.max_months,
    });
    let projection = engine.project(&plan)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    println!("SWP Projection ({} months):", projection.periods.len());
    println!(
        "{:>6} {:>8} {:>16} {:>14} {:>14} {:>16}",
        "Period", "Month", "Beginning", "Return", "Withdrawal", "Ending"
    );
    println!("{}", "-".repeat(80));

    for row in projection.periods.iter().take(24) {
        println!(
            "{:>6} {:>8} {:>16.2} {:>14.2} {:>14.2} {:>16.2}",
            row.period_index,
            row.month_label(),
            row.beginning_value,
            row.period_return,
            row.withdrawal,
            row.ending_value,
        );
    }
    if projection.periods.len() > 24 {
        println!("... ({} more months)", projection.periods.len() - 24);
    }

    println!("\nYearly breakdown:");
    println!(
        "{:>5} {:>6} {:>16} {:>14} {:>14} {:>16}",
        "Year", "CalYr", "Beginning", "Withdrawal", "Return", "Ending"
    );
    println!("{}", "-".repeat(80));
    for year in &projection.years {
        println!(
            "{:>5} {:>6} {:>16.2} {:>14.2} {:>14.2} {:>16.2}",
            year.year_index,
            year.calendar_year,
            year.beginning_value,
            year.total_withdrawal,
            year.total_return,
            year.ending_value,
        );
    }

    let summary = &projection.summary;
    println!("\nSummary:");
    println!("  Final Corpus Value: {}", format_currency(summary.final_corpus_value));
    println!("  Total Withdrawals:  {}", format_currency(summary.total_withdrawals));
    println!("  Total Returns:      {}", format_currency(summary.total_returns));
    println!("  Duration:           {:.1} Years", summary.duration_years);

    if let Some(csv_path) = &args.csv {
        let mut file = File::create(csv_path)
            .with_context(|| format!("Unable to create {}", csv_path.display()))?;

        writeln!(file, "Period,Month,Year,BeginningValue,Return,Withdrawal,EndingValue")?;
        for row in &projection.periods {
            writeln!(
                file,
                "{},{},{},{:.2},{:.2},{:.2},{:.2}",
                row.period_index,
                row.month_label(),
                row.date.year(),
                row.beginning_value,
                row.period_return,
                row.withdrawal,
                row.ending_value,
            )?;
        }

        println!("\nFull results written to: {}", csv_path.display());
    }

    Ok(())
}
