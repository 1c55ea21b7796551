//! `vna reconcile` command.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use vna_reconcile::{ReconcileReport, list_scenarios, reconcile_all, reconcile_scenario};

use crate::opts::{RootOpts, resolve_root};
use crate::prompt;

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Reconcile a single scenario
    #[arg(long, conflicts_with = "all")]
    pub scenario: Option<String>,

    /// Reconcile every scenario under the root
    #[arg(long)]
    pub all: bool,
}

pub fn cmd_reconcile(opts: &RootOpts, args: &ReconcileArgs) -> Result<()> {
    let root = resolve_root(opts)?;

    if let Some(id) = &args.scenario {
        let report = reconcile_scenario(&root, id)?;
        return print_report(opts, &report);
    }
    if args.all {
        return run_all(opts, &root);
    }

    // No selection: interactive menu.
    let scenarios = list_scenarios(&root)?;
    if scenarios.is_empty() {
        anyhow::bail!("no scenario directories under {}", root.display());
    }
    println!("Scenarios under {}:", root.display());
    for (i, id) in scenarios.iter().enumerate() {
        println!("  {}) {}", i + 1, id);
    }
    let Some(choice) = prompt::read_line("Select scenario (number, name, or a=all): ")? else {
        println!("Cancelled.");
        return Ok(());
    };
    if choice == "a" || choice.eq_ignore_ascii_case("all") {
        return run_all(opts, &root);
    }
    let id = match choice.parse::<usize>() {
        Ok(n) if (1..=scenarios.len()).contains(&n) => scenarios[n - 1].clone(),
        Ok(_) => anyhow::bail!("selection out of range"),
        Err(_) if scenarios.iter().any(|s| s == &choice) => choice,
        Err(_) => anyhow::bail!("unknown scenario '{choice}'"),
    };
    let report = reconcile_scenario(&root, &id)?;
    print_report(opts, &report)
}

fn run_all(opts: &RootOpts, root: &Path) -> Result<()> {
    let summary = reconcile_all(root)?;
    if summary.succeeded.is_empty() && summary.failed.is_empty() {
        anyhow::bail!("no scenario directories under {}", root.display());
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for report in &summary.succeeded {
            print_human(report);
        }
        for failure in &summary.failed {
            eprintln!("failed {}: {}", failure.scenario_id, failure.reason);
        }
        println!(
            "{} scenario(s) reconciled, {} failed",
            summary.succeeded.len(),
            summary.failed.len()
        );
    }

    if !summary.failed.is_empty() {
        anyhow::bail!("{} scenario(s) failed", summary.failed.len());
    }
    Ok(())
}

fn print_report(opts: &RootOpts, report: &ReconcileReport) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_human(report);
    }
    Ok(())
}

fn print_human(report: &ReconcileReport) {
    println!(
        "{}: {} added, {} updated, {} unchanged, {} removed ({} total)",
        report.scenario_id,
        report.added,
        report.updated,
        report.unchanged,
        report.removed,
        report.total
    );
}
