//! payroll-runner: headless performance-based-pay batch runner.
//!
//! Usage:
//!   payroll-runner --data-dir ./data --db payroll.db
//!   payroll-runner --data-dir ./data --technician "Alice Smith" --json
//!   payroll-runner --sample 42 --sample-techs 12 --sample-jobs 200

use anyhow::Result;
use pbp_core::{
    batch::{BatchRunner, BatchSummary},
    config::PayrollConfig,
    context::RunContext,
    ledger::Ledger,
    payout::{PayoutEntry, SkipReason, TechnicianPayouts},
    roster::Roster,
    sample,
    store::PayrollStore,
};
use std::env;

#[derive(serde::Serialize)]
struct TechnicianReport {
    technician: String,
    total:      f64,
    entries:    Vec<PayoutEntry>,
}

#[derive(serde::Serialize)]
struct BatchReport {
    summary:     BatchSummary,
    technicians: Vec<TechnicianReport>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let run_id = string_arg(&args, "--run-id");
    let technician = string_arg(&args, "--technician");
    let sample_seed = seed_arg(&args)?;
    let sample_techs = parse_arg(&args, "--sample-techs", 12usize);
    let sample_jobs = parse_arg(&args, "--sample-jobs", 200usize);
    let json = args.iter().any(|a| a == "--json");

    let config = PayrollConfig::load(data_dir)?;

    let (roster, ledger) = match sample_seed {
        Some(seed) => {
            let data = sample::generate(seed, sample_techs, sample_jobs);
            (Roster::from_entries(&data.roster)?, Ledger::from_rows(&data.rows, &config)?)
        }
        None => (
            Roster::load(&config.roster_path(data_dir))?,
            Ledger::load(&config.ledger_path(data_dir), &config)?,
        ),
    };

    let ctx = match run_id {
        Some(id) => RunContext::with_run_id(id, config),
        None => RunContext::new(config),
    };

    if !json {
        println!("Performance-based pay: payroll-runner");
        println!("  run_id:    {}", ctx.run_id);
        match sample_seed {
            Some(seed) => println!("  input:     sample seed {seed}"),
            None => println!("  data_dir:  {data_dir}"),
        }
        println!("  db:        {db}");
        println!("  roster:    {} technicians", roster.len());
        println!("  ledger:    {} jobs, {} malformed rows", ledger.records.len(), ledger.malformed.len());
        println!();
    }

    let mut store = PayrollStore::open(db)?;
    store.migrate()?;

    let mut runner = BatchRunner::new(&ctx, &roster);
    match technician {
        Some(name) => {
            let payouts = runner.run_one(name, &ledger, &mut store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&payouts)?);
            } else {
                print_technician(&payouts);
            }
        }
        None => {
            let summary = runner.run(&ledger, &mut store)?;
            if json {
                let report = build_report(&store, &roster, summary)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&store, &roster, &summary)?;
            }
        }
    }
    log::info!("run={} finished", ctx.run_id);
    Ok(())
}

fn build_report(store: &PayrollStore, roster: &Roster, summary: BatchSummary) -> Result<BatchReport> {
    let mut technicians = Vec::new();
    for profile in roster.profiles() {
        if let Some(s) = store.technician_summary(&summary.run_id, &profile.name)? {
            technicians.push(TechnicianReport {
                technician: s.technician,
                total:      s.total,
                entries:    store.payout_entries_for(&summary.run_id, &profile.name)?,
            });
        }
    }
    Ok(BatchReport { summary, technicians })
}

fn print_technician(payouts: &TechnicianPayouts) {
    println!("=== {} ===", payouts.technician);
    if payouts.entries.is_empty() {
        println!("  (no payable jobs)");
    }
    for e in &payouts.entries {
        println!(
            "  {} | {} | {} | pool ${:.2} | {} {}% | ${:.2}",
            e.completion_date, e.customer_name, e.item_name, e.total_pool_amount,
            e.role_for_job, e.split_percentage, e.technician_share
        );
        println!("      team: {}", e.team_details);
    }
    println!("  total: ${:.2} across {} jobs", payouts.total, payouts.entries.len());
    for reason in SkipReason::ALL {
        let n = payouts.skipped_for(reason);
        if n > 0 {
            println!("  skipped ({reason}): {n}");
        }
    }
}

fn print_summary(store: &PayrollStore, roster: &Roster, summary: &BatchSummary) -> Result<()> {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:            {}", summary.run_id);
    println!("  technicians:       {}", summary.technicians_visited);
    println!("  paid technicians:  {}", summary.technicians_paid);
    println!("  payout rows:       {}", summary.rows_emitted);
    println!("  total paid:        ${:.2}", summary.total_paid);
    println!("  ledger records:    {}", summary.ledger_records);
    println!("  malformed rows:    {}", summary.malformed_rows);
    println!("  skipped duplicate: {}", summary.skipped.duplicate);
    println!("  skipped inelig.:   {}", summary.skipped.ineligible);

    println!();
    println!("=== TECHNICIAN TOTALS ===");
    for profile in roster.profiles() {
        if let Some(s) = store.technician_summary(&summary.run_id, &profile.name)? {
            println!(
                "  {:<24} class {} | {:>3} jobs | ${:.2}",
                s.technician, profile.skill_class, s.entry_count, s.total
            );
        }
    }
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

/// `--sample SEED`. A seed that does not parse is an error.
fn seed_arg(args: &[String]) -> Result<Option<u64>> {
    match string_arg(args, "--sample") {
        Some(raw) => match raw.parse() {
            Ok(seed) => Ok(Some(seed)),
            Err(_) => anyhow::bail!("--sample expects an integer seed, got '{raw}'"),
        },
        None => Ok(None),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sample_seed_must_be_an_integer() {
        assert_eq!(seed_arg(&args(&["payroll-runner", "--sample", "42"])).unwrap(), Some(42));
        assert_eq!(seed_arg(&args(&["payroll-runner", "--json"])).unwrap(), None);

        let err = seed_arg(&args(&["payroll-runner", "--sample", "abc"])).unwrap_err();
        assert!(err.to_string().contains("'abc'"));
    }
}
