//! `vna alias` command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use vna_manifest::search_assets;
use vna_reconcile::{assets_dir, list_scenarios};

use crate::opts::{RootOpts, resolve_root};
use crate::prompt;

#[derive(Args, Debug)]
pub struct AliasArgs {
    /// Scenario holding the asset (required in one-shot mode)
    #[arg(long)]
    pub scenario: Option<String>,

    /// Asset identifier to alias
    pub asset_id: Option<String>,

    /// Alias to attach
    pub alias: Option<String>,
}

pub fn cmd_alias(opts: &RootOpts, args: &AliasArgs) -> Result<()> {
    let root = resolve_root(opts)?;
    match (&args.asset_id, &args.alias) {
        (Some(asset_id), Some(alias)) => {
            let Some(scenario) = &args.scenario else {
                anyhow::bail!("--scenario is required when passing <ASSET_ID> <ALIAS>");
            };
            add_and_save(&root, scenario, asset_id, alias)
        }
        (None, None) => interactive(&root),
        _ => anyhow::bail!("one-shot mode needs both <ASSET_ID> and <ALIAS>"),
    }
}

fn add_and_save(root: &Path, scenario_id: &str, asset_id: &str, alias: &str) -> Result<()> {
    let dir = assets_dir(root, scenario_id);
    let mut manifest = vna_manifest::load(&dir)
        .with_context(|| format!("load manifest for scenario '{scenario_id}'"))?;
    vna_manifest::add_alias(&mut manifest, asset_id, alias)?;
    manifest.touch();
    vna_manifest::save(&dir, &manifest)
        .with_context(|| format!("write manifest for scenario '{scenario_id}'"))?;
    println!("alias '{alias}' -> '{asset_id}' ({scenario_id})");
    Ok(())
}

fn interactive(root: &Path) -> Result<()> {
    let scenarios = list_scenarios(root)?;
    if scenarios.is_empty() {
        anyhow::bail!("no scenario directories under {}", root.display());
    }
    println!("Scenarios under {}:", root.display());
    for (i, id) in scenarios.iter().enumerate() {
        println!("  {}) {}", i + 1, id);
    }
    let Some(choice) = prompt::read_line("Select scenario (number or name): ")? else {
        println!("Cancelled.");
        return Ok(());
    };
    let scenario = match choice.parse::<usize>() {
        Ok(n) if (1..=scenarios.len()).contains(&n) => scenarios[n - 1].clone(),
        Ok(_) => anyhow::bail!("selection out of range"),
        Err(_) if scenarios.iter().any(|s| s == &choice) => choice,
        Err(_) => anyhow::bail!("unknown scenario '{choice}'"),
    };

    let dir = assets_dir(root, &scenario);
    let mut manifest = vna_manifest::load(&dir)
        .with_context(|| format!("load manifest for scenario '{scenario}'"))?;

    // Search loop over identifiers until one is picked. Empty input at any
    // prompt cancels without touching the manifest.
    let asset_id = loop {
        let Some(query) = prompt::read_line("Search assets: ")? else {
            println!("Cancelled.");
            return Ok(());
        };
        let matches: Vec<String> = search_assets(&manifest, &query)
            .into_iter()
            .map(str::to_string)
            .collect();
        if matches.is_empty() {
            println!("No matches.");
            continue;
        }
        for (i, id) in matches.iter().enumerate() {
            println!("  {}) {}", i + 1, id);
        }
        let Some(pick) = prompt::read_line("Select asset (number): ")? else {
            println!("Cancelled.");
            return Ok(());
        };
        match pick.parse::<usize>() {
            Ok(n) if (1..=matches.len()).contains(&n) => break matches[n - 1].clone(),
            _ => {
                println!("Invalid selection, search again.");
            }
        }
    };

    let Some(alias) = prompt::read_line(&format!("Alias for '{asset_id}': "))? else {
        println!("Cancelled.");
        return Ok(());
    };
    vna_manifest::add_alias(&mut manifest, &asset_id, &alias)?;
    manifest.touch();
    vna_manifest::save(&dir, &manifest)
        .with_context(|| format!("write manifest for scenario '{scenario}'"))?;
    println!("alias '{alias}' -> '{asset_id}' ({scenario})");
    Ok(())
}
