//! Alias registry: secondary names layered over stable identifiers.

use crate::Manifest;

pub type AliasResult<T> = Result<T, AliasError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    #[error("unknown asset id '{0}'")]
    UnknownAsset(String),
    #[error("alias '{0}' would shadow an existing asset identifier")]
    AliasShadowsIdentifier(String),
    #[error("asset '{id}' already carries alias '{alias}'")]
    AlreadyAliased { id: String, alias: String },
    #[error("alias '{alias}' already points at '{owner}'")]
    AliasOwnedByOther { alias: String, owner: String },
}

/// Attach `alias` to `asset_id`, enforcing global alias uniqueness.
///
/// Validation order: the asset must exist; the alias must not collide with
/// any identifier (aliases are never allowed to be indistinguishable from
/// primary identifiers); the alias must not already be claimed. On success
/// the alias is appended to the entry's list and the derived map rebuilt
/// from scratch. Persisting the manifest is the caller's responsibility.
pub fn add_alias(manifest: &mut Manifest, asset_id: &str, alias: &str) -> AliasResult<()> {
    if !manifest.assets.contains_key(asset_id) {
        return Err(AliasError::UnknownAsset(asset_id.to_string()));
    }
    if manifest.assets.contains_key(alias) {
        return Err(AliasError::AliasShadowsIdentifier(alias.to_string()));
    }
    if let Some(owner) = manifest.alias_map.get(alias) {
        if owner == asset_id {
            return Err(AliasError::AlreadyAliased {
                id: asset_id.to_string(),
                alias: alias.to_string(),
            });
        }
        return Err(AliasError::AliasOwnedByOther {
            alias: alias.to_string(),
            owner: owner.clone(),
        });
    }

    if let Some(entry) = manifest.assets.get_mut(asset_id) {
        entry.aliases.push(alias.to_string());
    }
    manifest.rebuild_alias_map();
    Ok(())
}

/// Identifiers containing `query` case-insensitively, in manifest order.
pub fn search_assets<'a>(manifest: &'a Manifest, query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    manifest
        .assets
        .keys()
        .filter(|id| id.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}
