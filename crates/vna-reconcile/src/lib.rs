//! Offline reconciliation of scenario asset trees against their manifests.

mod reconcile;
mod scan;

pub use reconcile::{
    IdentifierConflict, ReconcileReport, ReconcileSummary, ScenarioFailure, assets_dir,
    infer_type, list_scenarios, reconcile_all, reconcile_scenario,
};
pub use scan::{EXCLUDED_CATEGORIES, ScannedAsset, scan_assets};

use std::{io, path::PathBuf};

pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("scenario '{scenario_id}' has no assets directory at {dir:?}")]
    MissingAssetsDir { scenario_id: String, dir: PathBuf },
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("walking {dir:?}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    Manifest(#[from] vna_manifest::ManifestError),
    #[error(
        "identifier conflicts in scenario '{scenario_id}': {}; manifest left untouched",
        render_conflicts(.conflicts)
    )]
    IdentifierConflicts {
        scenario_id: String,
        conflicts: Vec<IdentifierConflict>,
    },
}

fn render_conflicts(conflicts: &[IdentifierConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("{} <- [{}]", c.identifier, c.paths.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
