//! Manifest reconciliation against the on-disk asset tree.

use std::collections::{BTreeMap, HashMap, HashSet, btree_map::Entry};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use vna_manifest::{
    AssetEntry, AssetType, Manifest, correlation_key, correlation_key_of, identifier_for,
};

use crate::scan::scan_assets;
use crate::{ReconcileError, ReconcileResult};

fn type_for_category(category: &str) -> Option<AssetType> {
    match category {
        "bgm" | "se" | "voice" => Some(AssetType::Audio),
        "img" => Some(AssetType::Image),
        "vid" => Some(AssetType::Video),
        _ => None,
    }
}

fn type_for_ext(ext: &str) -> Option<AssetType> {
    match ext {
        "mp3" | "ogg" | "wav" | "m4a" | "flac" | "opus" => Some(AssetType::Audio),
        "png" | "jpg" | "jpeg" | "webp" | "gif" | "bmp" => Some(AssetType::Image),
        "mp4" | "webm" | "mov" => Some(AssetType::Video),
        _ => None,
    }
}

/// Infer the asset type from its category, falling back to the extension.
pub fn infer_type(category: &str, ext: &str) -> AssetType {
    type_for_category(category)
        .or_else(|| type_for_ext(ext))
        .unwrap_or(AssetType::Unknown)
}

/// Outcome counters for one scenario's reconciliation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ReconcileReport {
    pub scenario_id: String,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub total: usize,
}

/// Two or more files claiming one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct IdentifierConflict {
    pub identifier: String,
    pub paths: Vec<String>,
}

/// Aggregate outcome of a multi-scenario run.
#[derive(Debug, Default, Serialize)]
pub struct ReconcileSummary {
    pub succeeded: Vec<ReconcileReport>,
    pub failed: Vec<ScenarioFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioFailure {
    pub scenario_id: String,
    pub reason: String,
}

/// The asset directory for one scenario.
pub fn assets_dir(scenarios_root: &Path, scenario_id: &str) -> PathBuf {
    scenarios_root.join(scenario_id).join("assets")
}

/// Bring a scenario's manifest into agreement with its asset tree.
///
/// Identifiers are retained for any discovered file whose correlation key
/// (`category:basename`) matches a prior entry, so a moved file keeps its
/// identifier and aliases. Identifier conflicts abort the run before
/// anything is written. Note the correlation heuristic's known limit: two
/// different logical assets that ever pass through the same
/// category+basename will be treated as the same asset.
pub fn reconcile_scenario(
    scenarios_root: &Path,
    scenario_id: &str,
) -> ReconcileResult<ReconcileReport> {
    let dir = assets_dir(scenarios_root, scenario_id);
    if !dir.is_dir() {
        return Err(ReconcileError::MissingAssetsDir {
            scenario_id: scenario_id.to_string(),
            dir,
        });
    }
    let previous = vna_manifest::try_load(&dir)?;
    let discovered = scan_assets(&dir)?;

    // Index prior identifiers by correlation key; the key, not the
    // identifier, is what recognizes a moved file.
    let mut existing: HashMap<String, (String, AssetEntry)> = HashMap::new();
    if let Some(prev) = &previous {
        for (id, entry) in &prev.assets {
            let Some(key) = correlation_key_of(&entry.path) else {
                tracing::warn!("entry '{id}' has no derivable correlation key, dropping");
                continue;
            };
            if existing
                .insert(key.clone(), (id.clone(), entry.clone()))
                .is_some()
            {
                tracing::warn!("duplicate correlation key '{key}' in prior manifest");
            }
        }
    }

    let mut report = ReconcileReport {
        scenario_id: scenario_id.to_string(),
        ..Default::default()
    };
    let mut assets: BTreeMap<String, AssetEntry> = BTreeMap::new();
    let mut conflicts: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut matched: HashSet<String> = HashSet::new();

    for file in &discovered {
        let key = correlation_key(&file.category, &file.stem);
        let (id, aliases) = match existing.get(&key) {
            Some((id, entry)) => {
                matched.insert(key);
                if entry.path != file.rel_path {
                    tracing::info!("moved {} -> {} (id {id})", entry.path, file.rel_path);
                    report.updated += 1;
                } else {
                    report.unchanged += 1;
                }
                (id.clone(), entry.aliases.clone())
            }
            None => {
                let id = identifier_for(&file.category, &file.stem);
                tracing::debug!("added {} (id {id})", file.rel_path);
                report.added += 1;
                (id, Vec::new())
            }
        };

        match assets.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(AssetEntry {
                    path: file.rel_path.clone(),
                    ext: file.ext.clone(),
                    asset_type: infer_type(&file.category, &file.ext),
                    aliases,
                });
            }
            Entry::Occupied(slot) => {
                conflicts
                    .entry(slot.key().clone())
                    .or_insert_with(|| vec![slot.get().path.clone()])
                    .push(file.rel_path.clone());
            }
        }
    }

    if let Some(prev) = &previous {
        for (id, entry) in &prev.assets {
            let Some(key) = correlation_key_of(&entry.path) else {
                continue;
            };
            if !matched.contains(&key) {
                tracing::info!("missing on disk, dropping '{id}' ({})", entry.path);
                report.removed += 1;
            }
        }
    }

    if !conflicts.is_empty() {
        let conflicts = conflicts
            .into_iter()
            .map(|(identifier, paths)| IdentifierConflict { identifier, paths })
            .collect();
        return Err(ReconcileError::IdentifierConflicts {
            scenario_id: scenario_id.to_string(),
            conflicts,
        });
    }

    report.total = assets.len();
    let mut manifest = Manifest::new(scenario_id);
    manifest.assets = assets;
    manifest.rebuild_alias_map();
    vna_manifest::save(&dir, &manifest)?;
    tracing::info!(
        "reconciled '{scenario_id}': {} added, {} updated, {} unchanged, {} removed",
        report.added,
        report.updated,
        report.unchanged,
        report.removed
    );
    Ok(report)
}

/// Direct subdirectories of the root that contain an `assets/` directory,
/// sorted by name.
pub fn list_scenarios(scenarios_root: &Path) -> ReconcileResult<Vec<String>> {
    let read_dir = fs::read_dir(scenarios_root).map_err(|source| ReconcileError::Io {
        path: scenarios_root.to_path_buf(),
        source,
    })?;
    let mut ids = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| ReconcileError::Io {
            path: scenarios_root.to_path_buf(),
            source,
        })?;
        if !entry.path().join("assets").is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        ids.push(name);
    }
    ids.sort();
    Ok(ids)
}

/// Reconcile every scenario under the root, sequentially.
///
/// A failing scenario is tallied and does not stop the rest.
pub fn reconcile_all(scenarios_root: &Path) -> ReconcileResult<ReconcileSummary> {
    let mut summary = ReconcileSummary::default();
    for scenario_id in list_scenarios(scenarios_root)? {
        match reconcile_scenario(scenarios_root, &scenario_id) {
            Ok(report) => summary.succeeded.push(report),
            Err(err) => {
                tracing::warn!("scenario '{scenario_id}' failed: {err}");
                summary.failed.push(ScenarioFailure {
                    scenario_id,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(summary)
}
