//! Asset directory scanning.

use std::path::{Component, Path};

use vna_manifest::{MANIFEST_FILE, ext_of, stem_of};
use walkdir::{DirEntry, WalkDir};

use crate::{ReconcileError, ReconcileResult};

/// Top-level category directories managed outside the manifest.
pub const EXCLUDED_CATEGORIES: &[&str] = &["characters", "backgrounds"];

/// One media file discovered under an asset root.
#[derive(Debug, Clone)]
pub struct ScannedAsset {
    /// `/`-separated path relative to the asset root.
    pub rel_path: String,
    pub category: String,
    pub stem: String,
    pub ext: String,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_excluded_category(entry: &DirEntry) -> bool {
    entry.depth() == 1
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_CATEGORIES.contains(&name))
}

fn rel_path_string(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(os) => parts.push(os.to_str()?.to_string()),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// Recursively list managed media files under `assets_dir`, sorted by path.
///
/// Dotfiles, `.gitkeep`, the manifest itself, and the unmanaged
/// character/background subtrees are skipped. Files sitting directly at
/// the asset root carry no category directory and therefore no
/// identifier; they are skipped with a warning.
pub fn scan_assets(assets_dir: &Path) -> ReconcileResult<Vec<ScannedAsset>> {
    let mut found = Vec::new();
    let walker = WalkDir::new(assets_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || (!is_hidden(entry) && !is_excluded_category(entry))
        });

    for entry in walker {
        let entry = entry.map_err(|source| ReconcileError::Walk {
            dir: assets_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name == MANIFEST_FILE || name == ".gitkeep" {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let Some(rel_path) = rel_path_string(rel) else {
            tracing::warn!("skipping non-UTF-8 path under {}", assets_dir.display());
            continue;
        };
        let Some(category) = vna_manifest::category_of(&rel_path) else {
            tracing::warn!("skipping uncategorized file '{rel_path}' (no category directory)");
            continue;
        };
        found.push(ScannedAsset {
            category: category.to_string(),
            stem: stem_of(&rel_path).to_string(),
            ext: ext_of(&rel_path),
            rel_path,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, b"x").expect("write");
    }

    #[test]
    fn scan_skips_hidden_excluded_and_uncategorized() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        touch(root, "se/explosion-02.mp3");
        touch(root, "se/sub/rumble.ogg");
        touch(root, "bgm/theme.ogg");
        touch(root, "se/.hidden.mp3");
        touch(root, "se/.gitkeep");
        touch(root, "characters/ayu/base.png");
        touch(root, "backgrounds/school.png");
        touch(root, "loose.mp3");
        touch(root, "manifest.json");

        let assets = scan_assets(root).expect("scan");
        let paths: Vec<&str> = assets.iter().map(|a| a.rel_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["bgm/theme.ogg", "se/explosion-02.mp3", "se/sub/rumble.ogg"]
        );

        let rumble = &assets[2];
        assert_eq!(rumble.category, "se");
        assert_eq!(rumble.stem, "rumble");
        assert_eq!(rumble.ext, "ogg");
    }

    #[test]
    fn nested_manifest_name_is_not_special() {
        // Only the top-level manifest.json is the store; a media file that
        // happens to share the name deeper down is still skipped by name,
        // matching the exclusion rule applied during scanning.
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "img/manifest.json");
        let assets = scan_assets(tmp.path()).expect("scan");
        assert!(assets.is_empty());
    }
}
