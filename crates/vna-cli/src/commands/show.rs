//! `vna manifest show` command.

use anyhow::{Context, Result};
use clap::Args;
use vna_reconcile::assets_dir;

use crate::opts::{RootOpts, resolve_root};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario whose manifest to print
    #[arg(long)]
    pub scenario: String,

    /// Output canonical JSON without formatting
    #[arg(long)]
    pub raw: bool,
}

pub fn cmd_show(opts: &RootOpts, args: &ShowArgs) -> Result<()> {
    let root = resolve_root(opts)?;
    let dir = assets_dir(&root, &args.scenario);
    let manifest = vna_manifest::load(&dir)
        .with_context(|| format!("load manifest for scenario '{}'", args.scenario))?;

    if args.raw {
        println!("{}", serde_json::to_string(&manifest)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    }
    Ok(())
}
