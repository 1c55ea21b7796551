//! Persisted catalog shapes and identifier helpers.
//!
//! An identifier is `{category}/{basename-without-extension}`, where the
//! category is the top-level directory under a scenario's asset root. The
//! correlation key `{category}:{basename}` is the same pair in a different
//! dress; reconciliation uses it to recognize a moved file as the same
//! asset.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

/// Broad media classification for a managed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Audio,
    Image,
    Video,
    Unknown,
}

/// One managed media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Path relative to the scenario's asset root, `/`-separated. The only
    /// field that changes once an entry exists (on file moves).
    pub path: String,
    /// Lowercase file extension without the dot.
    pub ext: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Human-assigned alternate names, in assignment order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// The persisted catalog for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: u32,
    pub generated_at: String,
    pub scenario_id: String,
    pub assets: BTreeMap<String, AssetEntry>,
    /// Derived alias -> identifier index. Recomputed on every write, never
    /// hand-edited.
    pub alias_map: BTreeMap<String, String>,
}

impl Manifest {
    /// Empty manifest for a scenario, stamped with the current time.
    pub fn new(scenario_id: impl Into<String>) -> Self {
        let mut manifest = Self {
            version: MANIFEST_VERSION,
            generated_at: String::new(),
            scenario_id: scenario_id.into(),
            assets: BTreeMap::new(),
            alias_map: BTreeMap::new(),
        };
        manifest.touch();
        manifest
    }

    /// Stamp a fresh generation time.
    pub fn touch(&mut self) {
        self.generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    }

    /// Recompute `alias_map` from every entry's alias list.
    ///
    /// The derived map is always a pure function of the alias lists. A
    /// duplicate alias keeps its first owner in identifier order; later
    /// occurrences are dropped with a warning.
    pub fn rebuild_alias_map(&mut self) {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (id, entry) in &self.assets {
            for alias in &entry.aliases {
                match map.entry(alias.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(id.clone());
                    }
                    Entry::Occupied(owner) => {
                        tracing::warn!(
                            "alias '{alias}' already owned by '{}', dropping duplicate on '{id}'",
                            owner.get()
                        );
                    }
                }
            }
        }
        self.alias_map = map;
    }
}

/// Top-level directory component of a relative asset path, or `None` for a
/// file sitting directly at the asset root.
pub fn category_of(path: &str) -> Option<&str> {
    match path.split_once('/') {
        Some((category, rest)) if !category.is_empty() && !rest.is_empty() => Some(category),
        _ => None,
    }
}

/// File stem of the final path segment (name without extension).
pub fn stem_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Lowercase extension of the final path segment, without the dot.
pub fn ext_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => String::new(),
    }
}

/// The stable identifier minted for a category + stem pair.
pub fn identifier_for(category: &str, stem: &str) -> String {
    format!("{category}/{stem}")
}

/// The move-detection key for a category + stem pair.
pub fn correlation_key(category: &str, stem: &str) -> String {
    format!("{category}:{stem}")
}

/// Correlation key derived from an entry's stored path, or `None` when the
/// path carries no category directory.
pub fn correlation_key_of(path: &str) -> Option<String> {
    Some(correlation_key(category_of(path)?, stem_of(path)))
}
