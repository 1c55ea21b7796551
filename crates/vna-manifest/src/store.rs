//! Manifest persistence against `manifest.json` in a scenario's asset
//! directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{MANIFEST_VERSION, Manifest, ManifestError, ManifestResult, io_error};

/// File name of the persisted manifest inside an assets directory.
pub const MANIFEST_FILE: &str = "manifest.json";

pub fn manifest_path(assets_dir: &Path) -> PathBuf {
    assets_dir.join(MANIFEST_FILE)
}

/// Load the manifest, returning `None` when none has been written yet.
pub fn try_load(assets_dir: &Path) -> ManifestResult<Option<Manifest>> {
    let path = manifest_path(assets_dir);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(path, err)),
    };
    let manifest: Manifest =
        serde_json::from_slice(&bytes).map_err(|source| ManifestError::Decode { path, source })?;
    if manifest.version != MANIFEST_VERSION {
        return Err(ManifestError::UnsupportedVersion {
            found: manifest.version,
            supported: MANIFEST_VERSION,
        });
    }
    Ok(Some(manifest))
}

/// Load the manifest, failing when none exists.
pub fn load(assets_dir: &Path) -> ManifestResult<Manifest> {
    try_load(assets_dir)?.ok_or_else(|| ManifestError::Missing {
        path: manifest_path(assets_dir),
    })
}

/// Write the manifest as pretty UTF-8 JSON.
///
/// Serialization happens fully in memory before the file is touched, so an
/// encode failure never truncates the previous manifest.
pub fn save(assets_dir: &Path, manifest: &Manifest) -> ManifestResult<()> {
    let path = manifest_path(assets_dir);
    let mut bytes = serde_json::to_vec_pretty(manifest).map_err(ManifestError::Encode)?;
    bytes.push(b'\n');
    fs::write(&path, bytes).map_err(|err| io_error(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetEntry, AssetType};
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_none() {
        let dir = TempDir::new().expect("tmp");
        assert!(try_load(dir.path()).expect("try_load").is_none());
        assert!(matches!(
            load(dir.path()),
            Err(ManifestError::Missing { .. })
        ));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().expect("tmp");
        let mut manifest = Manifest::new("demo");
        manifest.assets.insert(
            "se/explosion-02".into(),
            AssetEntry {
                path: "se/explosion-02.mp3".into(),
                ext: "mp3".into(),
                asset_type: AssetType::Audio,
                aliases: vec!["boom".into()],
            },
        );
        manifest.rebuild_alias_map();
        save(dir.path(), &manifest).expect("save");

        let loaded = load(dir.path()).expect("load");
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = TempDir::new().expect("tmp");
        let raw = r#"{
            "version": 99,
            "generatedAt": "2026-01-01T00:00:00Z",
            "scenarioId": "demo",
            "assets": {},
            "aliasMap": {}
        }"#;
        std::fs::write(manifest_path(dir.path()), raw).expect("seed");
        assert!(matches!(
            try_load(dir.path()),
            Err(ManifestError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn malformed_manifest_is_a_decode_error() {
        let dir = TempDir::new().expect("tmp");
        std::fs::write(manifest_path(dir.path()), b"{not json").expect("seed");
        assert!(matches!(
            try_load(dir.path()),
            Err(ManifestError::Decode { .. })
        ));
    }
}
