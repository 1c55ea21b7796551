//! Global CLI options and scenarios-root resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct RootOpts {
    /// Scenarios root directory (env: VNA_SCENARIOS_ROOT)
    #[arg(short = 'r', long, global = true, env = "VNA_SCENARIOS_ROOT")]
    pub root: Option<PathBuf>,

    /// JSON output instead of human text
    #[arg(long, global = true)]
    pub json: bool,
}

/// Resolve the scenarios root.
///
/// Priority:
/// 1. `--root` / `-r` flag
/// 2. `VNA_SCENARIOS_ROOT` env var (handled by Clap)
/// 3. `scenarios/` under the current directory
/// 4. Error
pub fn resolve_root(opts: &RootOpts) -> Result<PathBuf> {
    if let Some(root) = &opts.root {
        return Ok(root.clone());
    }
    let cwd = std::env::current_dir().context("get current directory")?;
    let candidate = cwd.join("scenarios");
    if candidate.is_dir() {
        return Ok(candidate);
    }
    anyhow::bail!(
        "No scenarios root. Pass --root <DIR>, set VNA_SCENARIOS_ROOT, \
         or run from a directory containing scenarios/"
    );
}
