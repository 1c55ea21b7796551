//! Scenario asset manifests: data model, persistence, and the alias registry.

pub mod alias;
mod model;
mod store;

pub use alias::{AliasError, AliasResult, add_alias, search_assets};
pub use model::{
    AssetEntry, AssetType, MANIFEST_VERSION, Manifest, category_of, correlation_key,
    correlation_key_of, ext_of, identifier_for, stem_of,
};
pub use store::{MANIFEST_FILE, load, manifest_path, save, try_load};

use std::{io, path::PathBuf};

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no manifest at {path:?}")]
    Missing { path: PathBuf },
    #[error("malformed manifest at {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("manifest serialization failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unsupported manifest version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.into(),
        source: err,
    }
}
