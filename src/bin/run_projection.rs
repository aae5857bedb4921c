//! Run a projection from a JSON input bundle
//!
//! Prints the headline figures and writes the monthly ledger as CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use unit_economics::assumptions::{load_headcount_csv, load_inputs};
use unit_economics::projection::write_ledger_csv;
use unit_economics::{HeadcountSchedule, ProjectionResult, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_projection", about = "Project monthly customers, revenue and unit economics")]
struct Args {
    /// JSON file with assumptions, headcount and scenarios
    #[arg(short, long)]
    input: PathBuf,

    /// Extra headcount lines as CSV (role,count,fullyLoadedMonthlyCost,startMonth,endMonth)
    #[arg(long)]
    headcount_csv: Option<PathBuf>,

    /// Where to write the monthly ledger
    #[arg(short, long, default_value = "projection_output.csv")]
    output: PathBuf,

    /// Calendar date of month 1, used to label ledger rows (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Print the full result as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let mut inputs = load_inputs(&args.input)
        .with_context(|| format!("Failed to load inputs from {}", args.input.display()))?;

    if let Some(path) = &args.headcount_csv {
        let file = File::open(path)
            .with_context(|| format!("Failed to open headcount CSV {}", path.display()))?;
        let lines = load_headcount_csv(file)
            .with_context(|| format!("Failed to read headcount CSV {}", path.display()))?;
        info!("Loaded {} headcount lines from {}", lines.len(), path.display());
        inputs.headcount.extend(lines);
    }

    let assumptions = inputs.assumption_set();
    let headcount: HeadcountSchedule = inputs.headcount_schedule();
    let runner = ScenarioRunner::new(assumptions, headcount);

    let base = runner.run_base();
    let scenarios = runner.run_all(&inputs.scenarios);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_ledger_csv(&base.rows, BufWriter::new(file), args.start_date)
        .context("Failed to write ledger")?;

    if args.json {
        let report = serde_json::json!({ "base": base, "scenarios": scenarios });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary("Base", &base);
        for outcome in &scenarios {
            print_summary(&outcome.name, &outcome.result);
        }
    }

    info!("Ledger written to {} in {:?}", args.output.display(), start.elapsed());
    Ok(())
}

fn print_summary(name: &str, result: &ProjectionResult) {
    println!("\n{}:", name);
    println!("  Months projected:   {}", result.rows.len());
    println!("  Ending customers:   {}", result.ending_customers);
    println!("  MRR:                ${:.0}", result.mrr);
    println!("  ARR:                ${:.0}", result.arr);
    println!("  Total revenue:      ${:.0}", result.totals.revenue);
    println!("  Total net:          ${:.0}", result.totals.net);
    println!("  Peak burn:          ${:.0}", result.peak_cumulative_burn);
    println!("  Break-even month:   {}", optional(result.break_even_month.map(|m| m.to_string())));
    println!("  Margin / cust / mo: ${:.2}", result.gross_margin_per_customer_per_month);
    println!("  LTV:                {}", optional(result.ltv.map(|v| format!("${:.0}", v))));
    println!("  CAC payback:        {}", optional(result.payback_months.map(|v| format!("{:.1} months", v))));
    println!("  LTV / CAC:          {}", optional(result.ltv_to_cac_ratio.map(|v| format!("{:.2}x", v))));
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}
